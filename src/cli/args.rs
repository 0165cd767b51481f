//! CLI argument definitions.
//!
//! This module defines all CLI arguments using clap's derive macros.
//! The main entry point is the [`Cli`] struct.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use std::time::Duration;

use crate::config::{RegistryConfig, ToolInfo, DEFAULT_REGISTRY_URL, DEFAULT_TIMEOUT_SECS};

/// freshen - Tell users when their installed tool is out of date.
#[derive(Debug, Parser)]
#[command(name = "freshen")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Registry package to check
    #[arg(long, global = true, env = "FRESHEN_PACKAGE", default_value = "ember-cli")]
    pub package: String,

    /// Name shown in update notices (defaults to the package name)
    #[arg(long, global = true)]
    pub name: Option<String>,

    /// Command users should run to update (defaults to `npm install -g <package>`)
    #[arg(long, global = true)]
    pub update_command: Option<String>,

    /// Path to the settings file (overrides the per-user default)
    #[arg(short, long, global = true, env = "FRESHEN_SETTINGS")]
    pub settings: Option<PathBuf>,

    /// Registry base URL
    #[arg(long, global = true, env = "FRESHEN_REGISTRY", default_value = DEFAULT_REGISTRY_URL)]
    pub registry: String,

    /// Registry request timeout in seconds
    #[arg(long, global = true, default_value_t = DEFAULT_TIMEOUT_SECS)]
    pub timeout: u64,

    /// Show verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Minimal output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

impl Cli {
    /// Tool identity from the package and override flags.
    pub fn tool_info(&self) -> ToolInfo {
        let mut tool = ToolInfo::for_package(&self.package);
        if let Some(name) = &self.name {
            tool = tool.with_display_name(name);
        }
        if let Some(command) = &self.update_command {
            tool = tool.with_update_command(command);
        }
        tool
    }

    /// Registry settings from the flags.
    pub fn registry_config(&self) -> RegistryConfig {
        RegistryConfig::new(&self.registry).with_timeout(Duration::from_secs(self.timeout))
    }
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Check the registry for a newer version (default if no command specified)
    Check(CheckArgs),

    /// Show persisted update-check settings
    Status(StatusArgs),

    /// Turn update checks on
    Enable,

    /// Turn update checks off
    Disable,

    /// Forget the cached version so the next check asks the registry
    Clear,
}

/// Arguments for the `check` command.
#[derive(Debug, Clone, Default, Args)]
pub struct CheckArgs {
    /// Installed version (skips running the tool)
    #[arg(long, conflicts_with = "bin")]
    pub local_version: Option<String>,

    /// Executable to run with `--version` to find the installed version
    #[arg(long)]
    pub bin: Option<String>,
}

/// Arguments for the `status` command.
#[derive(Debug, Clone, Default, Args)]
pub struct StatusArgs {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}
