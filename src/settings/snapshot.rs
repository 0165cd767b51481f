//! Read-only view of persisted update-check settings.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::store::{keys, FileSettingsStore, SettingsStore};

/// Whether the user wants update checks.
///
/// `Unspecified` covers both a missing settings file and a file without a
/// `checkForUpdates` key; it behaves as enabled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UpdateCheckPreference {
    Enabled,
    Disabled,
    #[default]
    Unspecified,
}

impl UpdateCheckPreference {
    /// Interpret a raw `checkForUpdates` value.
    ///
    /// Non-boolean values follow the usual truthiness rules: zero, the
    /// empty string and `false` disable.
    pub fn from_value(value: Option<&Value>) -> Self {
        let enabled = match value {
            None | Some(Value::Null) => return Self::Unspecified,
            Some(Value::Bool(b)) => *b,
            Some(Value::Number(n)) => n.as_f64().is_some_and(|f| f != 0.0),
            Some(Value::String(s)) => !s.is_empty(),
            Some(Value::Array(_)) | Some(Value::Object(_)) => true,
        };

        if enabled {
            Self::Enabled
        } else {
            Self::Disabled
        }
    }

    /// Whether a check should run.
    pub fn is_enabled(&self) -> bool {
        !matches!(self, Self::Disabled)
    }
}

/// Settings relevant to the update check, as read at startup.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SettingsSnapshot {
    /// User preference for update checks.
    pub check_for_updates: UpdateCheckPreference,
    /// Epoch milliseconds of the last successful check.
    pub last_version_check: Option<i64>,
    /// Last version resolved from the registry.
    pub newest_version: Option<String>,
}

impl SettingsSnapshot {
    /// Snapshot with checks explicitly enabled and no history.
    pub fn enabled() -> Self {
        Self {
            check_for_updates: UpdateCheckPreference::Enabled,
            ..Default::default()
        }
    }

    /// Snapshot with checks explicitly disabled.
    pub fn disabled() -> Self {
        Self {
            check_for_updates: UpdateCheckPreference::Disabled,
            ..Default::default()
        }
    }

    /// Set the last check time, builder style.
    pub fn with_last_check(mut self, millis: i64) -> Self {
        self.last_version_check = Some(millis);
        self
    }

    /// Set the cached newest version, builder style.
    pub fn with_newest_version(mut self, version: &str) -> Self {
        self.newest_version = Some(version.to_string());
        self
    }

    /// Read a snapshot from any store.
    pub fn load(store: &dyn SettingsStore) -> Self {
        let check_for_updates =
            UpdateCheckPreference::from_value(store.get(keys::CHECK_FOR_UPDATES).as_ref());

        // Timestamps written by other tools may be floats. Non-positive
        // values are not real check times.
        let last_version_check = store.get(keys::LAST_VERSION_CHECK).and_then(|v| {
            v.as_i64()
                .or_else(|| v.as_f64().map(|f| f as i64))
                .filter(|&ms| ms > 0)
        });

        let newest_version = store
            .get(keys::NEWEST_VERSION)
            .and_then(|v| v.as_str().map(String::from))
            .filter(|s| !s.is_empty());

        Self {
            check_for_updates,
            last_version_check,
            newest_version,
        }
    }

    /// Read a snapshot from a file store, or `None` when no file exists.
    pub fn from_file(store: &FileSettingsStore) -> Option<Self> {
        store.exists().then(|| Self::load(store))
    }

    /// Resolve the effective preference of an optional snapshot.
    pub fn preference(snapshot: Option<&Self>) -> UpdateCheckPreference {
        snapshot
            .map(|s| s.check_for_updates)
            .unwrap_or(UpdateCheckPreference::Unspecified)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::MemorySettingsStore;
    use serde_json::json;
    use tempfile::TempDir;

    #[test]
    fn preference_from_bool() {
        assert_eq!(
            UpdateCheckPreference::from_value(Some(&json!(true))),
            UpdateCheckPreference::Enabled
        );
        assert_eq!(
            UpdateCheckPreference::from_value(Some(&json!(false))),
            UpdateCheckPreference::Disabled
        );
    }

    #[test]
    fn preference_missing_or_null_is_unspecified() {
        assert_eq!(
            UpdateCheckPreference::from_value(None),
            UpdateCheckPreference::Unspecified
        );
        assert_eq!(
            UpdateCheckPreference::from_value(Some(&Value::Null)),
            UpdateCheckPreference::Unspecified
        );
    }

    #[test]
    fn preference_truthiness_of_other_values() {
        assert!(!UpdateCheckPreference::from_value(Some(&json!(0))).is_enabled());
        assert!(!UpdateCheckPreference::from_value(Some(&json!(""))).is_enabled());
        assert!(UpdateCheckPreference::from_value(Some(&json!(1))).is_enabled());
        assert!(UpdateCheckPreference::from_value(Some(&json!("yes"))).is_enabled());
    }

    #[test]
    fn unspecified_is_enabled() {
        assert!(UpdateCheckPreference::Unspecified.is_enabled());
        assert!(UpdateCheckPreference::Enabled.is_enabled());
        assert!(!UpdateCheckPreference::Disabled.is_enabled());
    }

    #[test]
    fn absent_snapshot_resolves_to_unspecified() {
        assert_eq!(
            SettingsSnapshot::preference(None),
            UpdateCheckPreference::Unspecified
        );
        let disabled = SettingsSnapshot::disabled();
        assert_eq!(
            SettingsSnapshot::preference(Some(&disabled)),
            UpdateCheckPreference::Disabled
        );
    }

    #[test]
    fn load_reads_all_keys() {
        let store = MemorySettingsStore::new()
            .with(keys::CHECK_FOR_UPDATES, true)
            .with(keys::LAST_VERSION_CHECK, 1_700_000_000_000i64)
            .with(keys::NEWEST_VERSION, "3.0.0");

        let snapshot = SettingsSnapshot::load(&store);
        assert_eq!(
            snapshot,
            SettingsSnapshot::enabled()
                .with_last_check(1_700_000_000_000)
                .with_newest_version("3.0.0")
        );
    }

    #[test]
    fn load_accepts_float_timestamp() {
        let store = MemorySettingsStore::new().with(keys::LAST_VERSION_CHECK, 1.5e12);
        let snapshot = SettingsSnapshot::load(&store);
        assert_eq!(snapshot.last_version_check, Some(1_500_000_000_000));
    }

    #[test]
    fn load_drops_non_positive_timestamps() {
        for value in [json!(-1e300), json!(i64::MIN), json!(-5), json!(0)] {
            let store = MemorySettingsStore::new().with(keys::LAST_VERSION_CHECK, value.clone());
            let snapshot = SettingsSnapshot::load(&store);
            assert_eq!(snapshot.last_version_check, None, "value {}", value);
        }
    }

    #[test]
    fn load_ignores_wrongly_typed_values() {
        let store = MemorySettingsStore::new()
            .with(keys::LAST_VERSION_CHECK, "yesterday")
            .with(keys::NEWEST_VERSION, 3);

        let snapshot = SettingsSnapshot::load(&store);
        assert!(snapshot.last_version_check.is_none());
        assert!(snapshot.newest_version.is_none());
        assert_eq!(
            snapshot.check_for_updates,
            UpdateCheckPreference::Unspecified
        );
    }

    #[test]
    fn from_file_is_none_without_file() {
        let temp = TempDir::new().unwrap();
        let store = FileSettingsStore::open(temp.path().join("missing.json")).unwrap();
        assert!(SettingsSnapshot::from_file(&store).is_none());
    }

    #[test]
    fn from_file_reads_existing_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("settings.json");
        std::fs::write(&path, r#"{"checkForUpdates": false}"#).unwrap();

        let store = FileSettingsStore::open(&path).unwrap();
        let snapshot = SettingsSnapshot::from_file(&store).unwrap();
        assert_eq!(snapshot.check_for_updates, UpdateCheckPreference::Disabled);
    }
}
