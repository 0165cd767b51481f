//! Status command implementation.
//!
//! The `freshen status` command shows what the update check has persisted.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::cli::args::StatusArgs;
use crate::error::Result;
use crate::settings::{SettingsSnapshot, UpdateCheckPreference};
use crate::ui::UserInterface;
use crate::updates::{plan_check, CheckPlan};

use super::dispatcher::{Command, CommandContext, CommandResult};

/// The status command implementation.
pub struct StatusCommand {
    context: CommandContext,
    args: StatusArgs,
}

/// Machine-readable status for `--json`.
#[derive(Debug, Serialize)]
struct StatusReport {
    package: String,
    settings_path: String,
    settings_exist: bool,
    check_for_updates: UpdateCheckPreference,
    last_version_check: Option<i64>,
    last_version_check_at: Option<String>,
    newest_version: Option<String>,
    next_remote_check_due: bool,
}

impl StatusCommand {
    /// Create a new status command.
    pub fn new(context: CommandContext, args: StatusArgs) -> Self {
        Self { context, args }
    }

    /// Get the command arguments.
    pub fn args(&self) -> &StatusArgs {
        &self.args
    }
}

impl Command for StatusCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let store = self.context.open_settings()?;
        let exists = store.exists();
        let snapshot = SettingsSnapshot::from_file(&store).unwrap_or_default();
        let now = Utc::now().timestamp_millis();

        let checked_at = snapshot
            .last_version_check
            .and_then(DateTime::<Utc>::from_timestamp_millis);
        let remote_due = plan_check(Some(&snapshot), now) == CheckPlan::FetchRemote;
        let stamped_in_future = snapshot.last_version_check.is_some_and(|last| last > now);

        if self.args.json {
            let report = StatusReport {
                package: self.context.tool.package.clone(),
                settings_path: store.path().display().to_string(),
                settings_exist: exists,
                check_for_updates: snapshot.check_for_updates,
                last_version_check: snapshot.last_version_check,
                last_version_check_at: checked_at.map(|t| t.to_rfc3339()),
                newest_version: snapshot.newest_version.clone(),
                next_remote_check_due: remote_due,
            };
            let json = serde_json::to_string_pretty(&report)
                .map_err(|e| anyhow::anyhow!("Failed to serialize status: {}", e))?;
            ui.message(&json);
            return Ok(CommandResult::success());
        }

        ui.message(&format!("Package: {}", self.context.tool.package));
        ui.message(&format!(
            "Settings: {}{}",
            store.path().display(),
            if exists { "" } else { " (not created yet)" }
        ));
        ui.message(&format!(
            "Update checks: {}",
            describe_preference(snapshot.check_for_updates)
        ));

        match checked_at {
            Some(at) => ui.message(&format!(
                "Last check: {} ({})",
                at.format("%Y-%m-%d %H:%M UTC"),
                format_age(now.saturating_sub(at.timestamp_millis()))
            )),
            None => ui.message("Last check: never"),
        }
        if stamped_in_future {
            ui.warning("Last check time is in the future; it will be ignored");
        }

        ui.message(&format!(
            "Newest version: {}",
            snapshot.newest_version.as_deref().unwrap_or("unknown")
        ));

        if remote_due {
            ui.message("Next check will query the registry");
        } else {
            ui.message("Next check will use the cached version");
        }

        Ok(CommandResult::success())
    }
}

fn describe_preference(preference: UpdateCheckPreference) -> &'static str {
    match preference {
        UpdateCheckPreference::Enabled => "enabled",
        UpdateCheckPreference::Disabled => "disabled",
        UpdateCheckPreference::Unspecified => "enabled (default)",
    }
}

/// Human-readable age of a timestamp difference in milliseconds.
fn format_age(millis: i64) -> String {
    let secs = millis.max(0) / 1000;
    match secs {
        0..=59 => "just now".to_string(),
        60..=3599 => format!("{} minutes ago", secs / 60),
        3600..=86_399 => format!("{} hours ago", secs / 3600),
        _ => format!("{} days ago", secs / 86_400),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{RegistryConfig, ToolInfo};
    use crate::ui::MockUI;
    use std::path::Path;
    use tempfile::TempDir;

    fn context(settings_path: &Path) -> CommandContext {
        CommandContext {
            tool: ToolInfo::default(),
            registry: RegistryConfig::default(),
            settings_path: settings_path.to_path_buf(),
        }
    }

    #[test]
    fn status_without_settings_file() {
        let temp = TempDir::new().unwrap();
        let cmd = StatusCommand::new(
            context(&temp.path().join("none.json")),
            StatusArgs::default(),
        );
        let mut ui = MockUI::new();

        let result = cmd.execute(&mut ui).unwrap();

        assert!(result.success);
        assert!(ui.has_message("(not created yet)"));
        assert!(ui.has_message("Update checks: enabled (default)"));
        assert!(ui.has_message("Last check: never"));
        assert!(ui.has_message("Newest version: unknown"));
        assert!(ui.has_message("Next check will query the registry"));
    }

    #[test]
    fn status_with_recent_check() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("settings.json");
        let recent = Utc::now().timestamp_millis() - 2 * 3_600_000;
        std::fs::write(
            &path,
            format!(
                r#"{{"checkForUpdates": true, "lastVersionCheck": {}, "newestVersion": "3.2.0"}}"#,
                recent
            ),
        )
        .unwrap();

        let cmd = StatusCommand::new(context(&path), StatusArgs::default());
        let mut ui = MockUI::new();
        cmd.execute(&mut ui).unwrap();

        assert!(ui.has_message("Update checks: enabled"));
        assert!(ui.has_message("2 hours ago"));
        assert!(ui.has_message("Newest version: 3.2.0"));
        assert!(ui.has_message("Next check will use the cached version"));
    }

    #[test]
    fn status_recent_check_without_cached_version_queries_registry() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("settings.json");
        let recent = Utc::now().timestamp_millis() - 60_000;
        std::fs::write(&path, format!(r#"{{"lastVersionCheck": {}}}"#, recent)).unwrap();

        let cmd = StatusCommand::new(context(&path), StatusArgs::default());
        let mut ui = MockUI::new();
        cmd.execute(&mut ui).unwrap();

        assert!(ui.has_message("Newest version: unknown"));
        assert!(ui.has_message("Next check will query the registry"));
        assert!(!ui.has_message("cached version"));
    }

    #[test]
    fn status_with_bad_timestamps_does_not_panic() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("settings.json");

        for last in ["-1e300", "-9223372036854775808", "9223372036854775807"] {
            std::fs::write(
                &path,
                format!(r#"{{"lastVersionCheck": {}, "newestVersion": "3.2.0"}}"#, last),
            )
            .unwrap();

            let cmd = StatusCommand::new(context(&path), StatusArgs::default());
            let mut ui = MockUI::new();
            cmd.execute(&mut ui).unwrap();

            assert!(ui.has_message("Next check will query the registry"));
        }
    }

    #[test]
    fn status_warns_about_future_check_time() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("settings.json");
        let future = Utc::now().timestamp_millis() + 3 * 86_400_000;
        std::fs::write(
            &path,
            format!(
                r#"{{"lastVersionCheck": {}, "newestVersion": "3.2.0"}}"#,
                future
            ),
        )
        .unwrap();

        let cmd = StatusCommand::new(context(&path), StatusArgs::default());
        let mut ui = MockUI::new();
        cmd.execute(&mut ui).unwrap();

        assert!(ui.has_warning("in the future"));
        assert!(ui.has_message("Next check will query the registry"));
    }

    #[test]
    fn status_json_output() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("settings.json");
        std::fs::write(
            &path,
            r#"{"checkForUpdates": false, "lastVersionCheck": 1000, "newestVersion": "1.0.0"}"#,
        )
        .unwrap();

        let cmd = StatusCommand::new(context(&path), StatusArgs { json: true });
        let mut ui = MockUI::new();
        cmd.execute(&mut ui).unwrap();

        assert_eq!(ui.messages().len(), 1);
        let parsed: serde_json::Value = serde_json::from_str(&ui.messages()[0]).unwrap();
        assert_eq!(parsed["package"], "ember-cli");
        assert_eq!(parsed["check_for_updates"], "disabled");
        assert_eq!(parsed["newest_version"], "1.0.0");
        assert_eq!(parsed["last_version_check"], 1000);
        assert_eq!(parsed["next_remote_check_due"], true);
    }

    #[test]
    fn format_age_buckets() {
        assert_eq!(format_age(5_000), "just now");
        assert_eq!(format_age(5 * 60_000), "5 minutes ago");
        assert_eq!(format_age(3 * 3_600_000), "3 hours ago");
        assert_eq!(format_age(2 * 86_400_000), "2 days ago");
        assert_eq!(format_age(-10), "just now");
    }
}
