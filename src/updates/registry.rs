//! Registry lookup of the latest published version.
//!
//! Queries `GET <registry>/<package>/latest` and extracts the `version`
//! field from the JSON body.

use reqwest::blocking::Client;
use reqwest::header::CONTENT_TYPE;
use serde_json::Value;
use thiserror::Error;

use super::version::VERSION;
use crate::config::RegistryConfig;

/// Errors from a registry lookup.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Connection, timeout, or body read failure.
    #[error("{0}")]
    Transport(#[from] reqwest::Error),

    /// The registry answered with a non-success status.
    #[error("HTTP {status} fetching {url}")]
    Status { status: u16, url: String },

    /// The body was not valid JSON.
    #[error("Invalid JSON in registry response: {0}")]
    InvalidJson(#[from] serde_json::Error),

    /// The body had no string `version` field.
    #[error("No version in registry response for '{package}'")]
    MissingVersion { package: String },
}

/// Source of the latest published version of a package.
pub trait RegistryClient {
    /// Fetch the latest version string for `package`.
    fn latest_version(&self, package: &str) -> Result<String, FetchError>;
}

/// npm registry client over blocking HTTP.
#[derive(Debug, Clone, Default)]
pub struct NpmRegistry {
    config: RegistryConfig,
}

impl NpmRegistry {
    /// Create a client for the given registry.
    pub fn new(config: RegistryConfig) -> Self {
        Self { config }
    }

    /// Get the registry configuration.
    pub fn config(&self) -> &RegistryConfig {
        &self.config
    }

    /// URL of the "latest" document for a package.
    pub fn latest_url(&self, package: &str) -> String {
        format!(
            "{}/{}/latest",
            self.config.base_url.trim_end_matches('/'),
            encode_package(package)
        )
    }
}

impl RegistryClient for NpmRegistry {
    fn latest_version(&self, package: &str) -> Result<String, FetchError> {
        let client = Client::builder()
            .user_agent(format!("freshen/{}", VERSION))
            .timeout(self.config.timeout)
            .build()?;

        let url = self.latest_url(package);
        tracing::debug!("Fetching latest version from {}", url);

        let response = client
            .get(&url)
            .header(CONTENT_TYPE, "application/json")
            .send()?;

        if !response.status().is_success() {
            return Err(FetchError::Status {
                status: response.status().as_u16(),
                url,
            });
        }

        let body = response.text()?;
        parse_latest(&body, package)
    }
}

/// Extract the `version` field from a "latest" document.
pub fn parse_latest(body: &str, package: &str) -> Result<String, FetchError> {
    let json: Value = serde_json::from_str(body)?;

    json.get("version")
        .and_then(|v| v.as_str())
        .filter(|v| !v.is_empty())
        .map(String::from)
        .ok_or_else(|| FetchError::MissingVersion {
            package: package.to_string(),
        })
}

/// Scoped names keep the `@` but encode the separator (`@scope%2Fname`).
fn encode_package(package: &str) -> String {
    package.replace('/', "%2F")
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;
    use std::time::Duration;

    fn registry_for(server: &MockServer) -> NpmRegistry {
        NpmRegistry::new(RegistryConfig::new(&server.base_url()))
    }

    #[test]
    fn latest_url_for_plain_package() {
        let registry = NpmRegistry::default();
        assert_eq!(
            registry.latest_url("ember-cli"),
            "http://registry.npmjs.org:80/ember-cli/latest"
        );
    }

    #[test]
    fn latest_url_encodes_scoped_package() {
        let registry = NpmRegistry::new(RegistryConfig::new("http://localhost:4873"));
        assert_eq!(
            registry.latest_url("@angular/cli"),
            "http://localhost:4873/@angular%2Fcli/latest"
        );
    }

    #[test]
    fn parse_latest_extracts_version() {
        let body = r#"{"name":"ember-cli","version":"3.2.0","dist":{}}"#;
        assert_eq!(parse_latest(body, "ember-cli").unwrap(), "3.2.0");
    }

    #[test]
    fn parse_latest_missing_version() {
        let err = parse_latest(r#"{"name":"ember-cli"}"#, "ember-cli").unwrap_err();
        assert!(matches!(err, FetchError::MissingVersion { .. }));
        assert!(err.to_string().contains("ember-cli"));
    }

    #[test]
    fn parse_latest_non_string_version() {
        let err = parse_latest(r#"{"version":3}"#, "ember-cli").unwrap_err();
        assert!(matches!(err, FetchError::MissingVersion { .. }));
    }

    #[test]
    fn parse_latest_invalid_json() {
        let err = parse_latest("Not Found", "ember-cli").unwrap_err();
        assert!(matches!(err, FetchError::InvalidJson(_)));
    }

    // --- Mock HTTP tests ---

    #[test]
    fn fetch_sends_json_content_type_and_reads_version() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(GET)
                .path("/ember-cli/latest")
                .header("Content-Type", "application/json");
            then.status(200)
                .header("Content-Type", "application/json")
                .body(r#"{"version":"3.2.0"}"#);
        });

        let version = registry_for(&server).latest_version("ember-cli").unwrap();

        mock.assert();
        assert_eq!(version, "3.2.0");
    }

    #[test]
    fn fetch_returns_error_on_404() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/no-such-package/latest");
            then.status(404).body(r#"{"error":"Not found"}"#);
        });

        let err = registry_for(&server)
            .latest_version("no-such-package")
            .unwrap_err();

        assert!(matches!(err, FetchError::Status { status: 404, .. }));
        assert!(err.to_string().contains("404"), "Error should mention 404: {}", err);
    }

    #[test]
    fn fetch_returns_error_on_html_body() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/ember-cli/latest");
            then.status(200).body("<html>captive portal</html>");
        });

        let err = registry_for(&server).latest_version("ember-cli").unwrap_err();
        assert!(matches!(err, FetchError::InvalidJson(_)));
    }

    #[test]
    fn fetch_returns_transport_error_when_unreachable() {
        let registry = NpmRegistry::new(
            RegistryConfig::new("http://127.0.0.1:1").with_timeout(Duration::from_secs(2)),
        );

        let err = registry.latest_version("ember-cli").unwrap_err();
        assert!(matches!(err, FetchError::Transport(_)));
    }
}
