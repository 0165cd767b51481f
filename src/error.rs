//! Error types for freshen operations.
//!
//! This module defines [`FreshenError`], the primary error type used throughout
//! the crate, and a [`Result`] type alias for convenience.
//!
//! # Error Handling Strategy
//!
//! - Use `FreshenError` for domain errors that callers handle distinctly
//! - Registry failures have their own type, [`FetchError`](crate::updates::FetchError),
//!   because the update check recovers from them instead of propagating
//! - Use `anyhow::Error` (via `FreshenError::Other`) for unexpected errors

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for freshen operations.
#[derive(Debug, Error)]
pub enum FreshenError {
    /// Settings file exists but could not be parsed.
    #[error("Failed to parse settings at {path}: {message}")]
    SettingsParseError { path: PathBuf, message: String },

    /// Settings could not be written back to disk.
    #[error("Failed to save settings to {path}: {message}")]
    SettingsWriteError { path: PathBuf, message: String },

    /// The locally installed version could not be determined.
    #[error("Could not determine local version of '{program}': {message}")]
    LocalVersionUnavailable { program: String, message: String },

    /// Invalid flag or option combination.
    #[error("Invalid configuration: {message}")]
    ConfigValidationError { message: String },

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic wrapped error for anyhow interop.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result type alias for freshen operations.
pub type Result<T> = std::result::Result<T, FreshenError>;
