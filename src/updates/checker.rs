//! The update checker.
//!
//! [`UpdateChecker`] decides whether to trust the cached registry version or
//! ask the registry again, persists what it resolved, compares it against the
//! local version, and tells the user when an update exists.
//!
//! Failures of the check never escape: [`UpdateChecker::do_check`] reports
//! them through the UI and returns [`CheckOutcome::Recovered`].

use serde_json::json;
use thiserror::Error;

use super::clock::{Clock, SystemClock};
use super::provider::{CommandVersionProvider, StaticVersion, VersionProvider};
use super::registry::{FetchError, NpmRegistry, RegistryClient};
use super::version::is_update_needed;
use crate::config::ToolInfo;
use crate::error::FreshenError;
use crate::settings::{keys, SettingsSnapshot, SettingsStore};
use crate::ui::UserInterface;

/// How long a cached registry version is trusted (24 hours).
pub const THROTTLE_WINDOW_MS: i64 = 86_400_000;

/// Result of comparing the local version against the registry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateResult {
    /// Whether the registry version is newer than the local one.
    pub update_needed: bool,
    /// The resolved registry version.
    pub newest_version: String,
}

/// Where the newest version comes from for one check.
///
/// Decided before any I/O starts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckPlan {
    /// Last check is inside the throttle window; reuse its version.
    UseCached(String),
    /// Ask the registry.
    FetchRemote,
}

/// Outcome of [`UpdateChecker::do_check`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckOutcome {
    /// The check produced a result.
    Completed(UpdateResult),
    /// The check failed; the message has already been shown to the user.
    Recovered(String),
}

impl CheckOutcome {
    /// The result, if the check completed.
    pub fn result(&self) -> Option<&UpdateResult> {
        match self {
            Self::Completed(result) => Some(result),
            Self::Recovered(_) => None,
        }
    }
}

/// What [`UpdateChecker::check_for_updates`] did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckStatus {
    /// Checks are turned off in settings.
    Disabled,
    /// The local version is current.
    UpToDate(UpdateResult),
    /// A newer version exists and the user was told.
    UpdateAvailable(UpdateResult),
    /// The check failed and the error was reported.
    Failed(String),
}

/// Failures inside a single check.
#[derive(Debug, Error)]
enum CheckError {
    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error(transparent)]
    LocalVersion(#[from] FreshenError),
}

/// Checks whether the installed tool is behind the registry.
pub struct UpdateChecker {
    tool: ToolInfo,
    settings: Option<SettingsSnapshot>,
    version_provider: Box<dyn VersionProvider>,
    registry: Box<dyn RegistryClient>,
    clock: Box<dyn Clock>,
}

impl UpdateChecker {
    /// Create a checker.
    ///
    /// `settings` is `None` when no settings exist at all, which leaves
    /// checking enabled. Without an explicit `local_version`, the version is
    /// read from `<tool.binary> --version` when a check runs.
    pub fn new(
        tool: ToolInfo,
        settings: Option<SettingsSnapshot>,
        local_version: Option<&str>,
    ) -> Self {
        let version_provider: Box<dyn VersionProvider> = match local_version {
            Some(version) => Box::new(StaticVersion::new(version)),
            None => Box::new(CommandVersionProvider::new(&tool.binary)),
        };

        Self {
            tool,
            settings,
            version_provider,
            registry: Box::new(NpmRegistry::default()),
            clock: Box::new(SystemClock),
        }
    }

    /// Use a different source for the local version.
    pub fn with_version_provider(mut self, provider: impl VersionProvider + 'static) -> Self {
        self.version_provider = Box::new(provider);
        self
    }

    /// Use a different registry client.
    pub fn with_registry(mut self, registry: impl RegistryClient + 'static) -> Self {
        self.registry = Box::new(registry);
        self
    }

    /// Use a different clock.
    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }

    /// The tool being checked.
    pub fn tool(&self) -> &ToolInfo {
        &self.tool
    }

    /// Check for updates and print a notice when one exists.
    ///
    /// Does nothing when checks are disabled. Never fails; check errors are
    /// reported through `ui` and surface as [`CheckStatus::Failed`].
    pub fn check_for_updates(
        &self,
        ui: &mut dyn UserInterface,
        store: &mut dyn SettingsStore,
    ) -> CheckStatus {
        let preference = SettingsSnapshot::preference(self.settings.as_ref());
        if !preference.is_enabled() {
            tracing::debug!("Update check disabled in settings");
            return CheckStatus::Disabled;
        }

        match self.do_check(ui, store) {
            CheckOutcome::Completed(result) if result.update_needed => {
                let notice = self.notice(ui, &result);
                ui.message(&notice);
                CheckStatus::UpdateAvailable(result)
            }
            CheckOutcome::Completed(result) => CheckStatus::UpToDate(result),
            CheckOutcome::Recovered(message) => CheckStatus::Failed(message),
        }
    }

    /// Resolve the newest version, persist it, and compare.
    ///
    /// Any failure is written to `ui` and returned as
    /// [`CheckOutcome::Recovered`]; settings are left untouched in that case.
    pub fn do_check(
        &self,
        ui: &mut dyn UserInterface,
        store: &mut dyn SettingsStore,
    ) -> CheckOutcome {
        let now = self.clock.now_millis();
        let plan = self.plan(now);
        tracing::debug!("Update check plan: {:?}", plan);

        match self.run(plan, store, now) {
            Ok(result) => CheckOutcome::Completed(result),
            Err(e) => {
                let message = format!("There was an error checking NPM for an update: {}", e);
                ui.error(&message);
                CheckOutcome::Recovered(message)
            }
        }
    }

    /// Decide between the cached version and a registry fetch.
    ///
    /// The cache is used only when the last check is less than
    /// [`THROTTLE_WINDOW_MS`] old and a cached version exists.
    pub fn plan(&self, now: i64) -> CheckPlan {
        plan_check(self.settings.as_ref(), now)
    }

    fn run(
        &self,
        plan: CheckPlan,
        store: &mut dyn SettingsStore,
        now: i64,
    ) -> Result<UpdateResult, CheckError> {
        let local_version = self.version_provider.local_version()?;

        let newest_version = match plan {
            CheckPlan::UseCached(version) => version,
            CheckPlan::FetchRemote => self.registry.latest_version(&self.tool.package)?,
        };

        save_version_information(store, &newest_version, now);

        Ok(UpdateResult {
            update_needed: is_update_needed(&local_version, &newest_version),
            newest_version,
        })
    }

    fn notice(&self, ui: &dyn UserInterface, result: &UpdateResult) -> String {
        format!(
            "A new version of {} is available ({}). To install it, type {}.",
            self.tool.display_name,
            result.newest_version,
            ui.format_command(&self.tool.update_command)
        )
    }
}

/// Throttle decision for a settings snapshot at time `now`.
///
/// A last check stamped in the future counts as stale.
pub fn plan_check(settings: Option<&SettingsSnapshot>, now: i64) -> CheckPlan {
    let Some(settings) = settings else {
        return CheckPlan::FetchRemote;
    };

    match (settings.last_version_check, &settings.newest_version) {
        (Some(last), Some(version)) if is_recent(last, now) => {
            CheckPlan::UseCached(version.clone())
        }
        _ => CheckPlan::FetchRemote,
    }
}

fn is_recent(last: i64, now: i64) -> bool {
    (0..THROTTLE_WINDOW_MS).contains(&now.saturating_sub(last))
}

/// Record the resolved version so the next day's runs skip the registry.
///
/// A failed flush is logged and otherwise ignored; the check result stands.
fn save_version_information(store: &mut dyn SettingsStore, version: &str, now: i64) {
    store.set(keys::NEWEST_VERSION, json!(version));
    store.set(keys::LAST_VERSION_CHECK, json!(now));

    if let Err(e) = store.flush() {
        tracing::warn!("Could not save update check result: {}", e);
    }
}
