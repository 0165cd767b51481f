//! Command dispatching.
//!
//! This module provides the core command infrastructure:
//! - [`Command`] trait for implementing commands
//! - [`CommandResult`] for uniform result reporting
//! - [`CommandContext`] for state shared by every command
//! - [`CommandDispatcher`] for routing CLI subcommands

use std::path::{Path, PathBuf};

use crate::cli::args::{CheckArgs, Cli, Commands};
use crate::config::{RegistryConfig, ToolInfo};
use crate::error::{FreshenError, Result};
use crate::settings::FileSettingsStore;
use crate::ui::UserInterface;

/// Trait for command implementations.
///
/// Each CLI subcommand implements this trait to provide its execution logic.
pub trait Command {
    /// Execute the command.
    ///
    /// # Arguments
    ///
    /// * `ui` - User interface for displaying output
    ///
    /// # Returns
    ///
    /// A [`CommandResult`] indicating success/failure and exit code.
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult>;
}

/// Result of command execution.
#[derive(Debug)]
pub struct CommandResult {
    /// Whether the command succeeded.
    pub success: bool,

    /// Exit code to use (0 for success, non-zero for failure).
    pub exit_code: i32,
}

impl CommandResult {
    /// Create a successful result.
    pub fn success() -> Self {
        Self {
            success: true,
            exit_code: 0,
        }
    }
}

/// Everything commands need from the global flags.
#[derive(Debug, Clone)]
pub struct CommandContext {
    /// Tool being checked.
    pub tool: ToolInfo,
    /// Registry to query.
    pub registry: RegistryConfig,
    /// Settings file location.
    pub settings_path: PathBuf,
}

impl CommandContext {
    /// Build the context from parsed CLI flags.
    ///
    /// Without `--settings`, the per-user default location is used.
    pub fn from_cli(cli: &Cli) -> Result<Self> {
        let tool = cli.tool_info();

        let settings_path = match &cli.settings {
            Some(path) => path.clone(),
            None => FileSettingsStore::default_path(&tool.package).ok_or_else(|| {
                FreshenError::ConfigValidationError {
                    message: "Could not determine a settings directory; pass --settings"
                        .to_string(),
                }
            })?,
        };

        Ok(Self {
            tool,
            registry: cli.registry_config(),
            settings_path,
        })
    }

    /// Open the settings store.
    pub fn open_settings(&self) -> Result<FileSettingsStore> {
        FileSettingsStore::open(&self.settings_path)
    }
}

/// Dispatches CLI commands to their implementations.
pub struct CommandDispatcher {
    context: CommandContext,
}

impl CommandDispatcher {
    /// Create a new dispatcher.
    pub fn new(context: CommandContext) -> Self {
        Self { context }
    }

    /// Get the settings path commands will use.
    pub fn settings_path(&self) -> &Path {
        &self.context.settings_path
    }

    /// Dispatch and execute a command.
    ///
    /// Routes the CLI subcommand to the appropriate command implementation
    /// and executes it.
    pub fn dispatch(&self, cli: &Cli, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        match &cli.command {
            Some(Commands::Check(args)) => {
                let cmd = super::check::CheckCommand::new(self.context.clone(), args.clone());
                cmd.execute(ui)
            }
            Some(Commands::Status(args)) => {
                let cmd = super::status::StatusCommand::new(self.context.clone(), args.clone());
                cmd.execute(ui)
            }
            Some(Commands::Enable) => {
                let cmd = super::settings::SetCheckCommand::new(self.context.clone(), true);
                cmd.execute(ui)
            }
            Some(Commands::Disable) => {
                let cmd = super::settings::SetCheckCommand::new(self.context.clone(), false);
                cmd.execute(ui)
            }
            Some(Commands::Clear) => {
                let cmd = super::settings::ClearCommand::new(self.context.clone());
                cmd.execute(ui)
            }
            None => {
                // Default to check command with default args
                let cmd =
                    super::check::CheckCommand::new(self.context.clone(), CheckArgs::default());
                cmd.execute(ui)
            }
        }
    }
}
