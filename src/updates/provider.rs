//! Discovery of the locally installed version.

use regex::Regex;
use std::process::Command;
use std::sync::LazyLock;

use crate::error::{FreshenError, Result};

static RE_VERSION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d+(?:\.\d+)+").expect("version regex is valid"));

/// Source of the locally installed version string.
pub trait VersionProvider {
    /// Resolve the local version.
    fn local_version(&self) -> Result<String>;
}

/// A version known up front.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StaticVersion(pub String);

impl StaticVersion {
    pub fn new(version: &str) -> Self {
        Self(version.to_string())
    }
}

impl VersionProvider for StaticVersion {
    fn local_version(&self) -> Result<String> {
        Ok(self.0.clone())
    }
}

/// Runs the tool (e.g. `ember --version`) and reads the version it prints.
#[derive(Debug, Clone)]
pub struct CommandVersionProvider {
    program: String,
    args: Vec<String>,
}

impl CommandVersionProvider {
    /// Run `program --version`.
    pub fn new(program: &str) -> Self {
        Self {
            program: program.to_string(),
            args: vec!["--version".to_string()],
        }
    }

    /// Replace the arguments passed to the program.
    pub fn with_args(mut self, args: &[&str]) -> Self {
        self.args = args.iter().map(|s| s.to_string()).collect();
        self
    }

    /// Program that is run.
    pub fn program(&self) -> &str {
        &self.program
    }
}

impl VersionProvider for CommandVersionProvider {
    fn local_version(&self) -> Result<String> {
        let unavailable = |message: String| FreshenError::LocalVersionUnavailable {
            program: self.program.clone(),
            message,
        };

        tracing::debug!("Running {} {:?} for local version", self.program, self.args);

        let output = Command::new(&self.program)
            .args(&self.args)
            .output()
            .map_err(|e| unavailable(e.to_string()))?;

        if !output.status.success() {
            return Err(unavailable(format!(
                "exited with code {:?}",
                output.status.code()
            )));
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        extract_version(&stdout)
            .ok_or_else(|| unavailable("no version number in output".to_string()))
    }
}

/// Find the first dotted version number in tool output.
///
/// `ember --version` prints several lines (`ember-cli: 3.1.0`, `node: ...`);
/// the first match wins.
pub fn extract_version(output: &str) -> Option<String> {
    RE_VERSION.find(output).map(|m| m.as_str().to_string())
}
