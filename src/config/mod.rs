//! Static configuration for an update check.
//!
//! [`ToolInfo`] names the tool being checked and how users update it.
//! [`RegistryConfig`] describes where and how the registry is queried.
//! Both default to checking ember-cli against the public npm registry.

use std::time::Duration;

/// Default registry endpoint. Plain HTTP on port 80.
pub const DEFAULT_REGISTRY_URL: &str = "http://registry.npmjs.org:80";

/// Default timeout for the registry request.
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Identity of the tool whose installed version is checked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolInfo {
    /// Package name on the registry (e.g. `ember-cli`, `@scope/tool`).
    pub package: String,
    /// Name shown to the user in notices.
    pub display_name: String,
    /// Command the user should run to update.
    pub update_command: String,
    /// Executable used to discover the installed version.
    pub binary: String,
}

impl Default for ToolInfo {
    fn default() -> Self {
        Self {
            package: "ember-cli".to_string(),
            display_name: "ember-cli".to_string(),
            update_command: "ember update".to_string(),
            binary: "ember".to_string(),
        }
    }
}

impl ToolInfo {
    /// Create tool info for a package, using the package name for display.
    pub fn new(package: &str, update_command: &str) -> Self {
        Self {
            package: package.to_string(),
            display_name: package.to_string(),
            update_command: update_command.to_string(),
            binary: package.rsplit('/').next().unwrap_or(package).to_string(),
        }
    }

    /// Tool info for a registry package with the usual npm update command.
    ///
    /// `ember-cli` maps to the default (`ember` binary, `ember update`).
    pub fn for_package(package: &str) -> Self {
        let default = Self::default();
        if package == default.package {
            return default;
        }
        Self::new(package, &format!("npm install -g {}", package))
    }

    /// Override the update command.
    pub fn with_update_command(mut self, command: &str) -> Self {
        self.update_command = command.to_string();
        self
    }

    /// Override the display name.
    pub fn with_display_name(mut self, name: &str) -> Self {
        self.display_name = name.to_string();
        self
    }

    /// Override the executable used for version discovery.
    pub fn with_binary(mut self, binary: &str) -> Self {
        self.binary = binary.to_string();
        self
    }
}

/// Where and how the registry is contacted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistryConfig {
    /// Base URL, without trailing slash.
    pub base_url: String,
    /// Request timeout.
    pub timeout: Duration,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_REGISTRY_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl RegistryConfig {
    /// Create a config for a custom registry URL with the default timeout.
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            ..Default::default()
        }
    }

    /// Set a custom timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}
