//! Freshen - Tell users when their installed tool is out of date.
//!
//! Freshen asks the npm registry for the latest published version of a
//! package, compares it with the installed version, and prints an update
//! notice. Registry lookups are throttled to one per day; in between, the
//! version cached in the settings file is used.
//!
//! # Modules
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`config`] - Tool identity and registry location
//! - [`error`] - Error types and result aliases
//! - [`settings`] - Persisted update-check settings
//! - [`ui`] - Terminal output
//! - [`updates`] - Version comparison, registry lookup, and the update checker
//!
//! # Example
//!
//! ```
//! use freshen::updates::is_update_needed;
//!
//! assert!(is_update_needed("3.1.0", "3.2.0"));
//! assert!(!is_update_needed("2.10.0", "2.9.9"));
//! ```
//!
//! For checks against a live registry, see the integration tests.

pub mod cli;
pub mod config;
pub mod error;
pub mod settings;
pub mod ui;
pub mod updates;

pub use error::{FreshenError, Result};
