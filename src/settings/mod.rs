//! Persisted update-check settings.
//!
//! This module provides the [`SettingsStore`] persistence trait with a
//! file-backed and an in-memory implementation, and the read-only
//! [`SettingsSnapshot`] the update checker makes its decisions from.

pub mod snapshot;
pub mod store;

pub use snapshot::{SettingsSnapshot, UpdateCheckPreference};
pub use store::{keys, FileSettingsStore, MemorySettingsStore, SettingsStore};
