//! Check command implementation.
//!
//! The `freshen check` command runs the throttled update check and prints a
//! notice when a newer version is published.

use crate::cli::args::CheckArgs;
use crate::error::Result;
use crate::settings::SettingsSnapshot;
use crate::ui::UserInterface;
use crate::updates::{CheckStatus, CommandVersionProvider, NpmRegistry, UpdateChecker};

use super::dispatcher::{Command, CommandContext, CommandResult};

/// The check command implementation.
pub struct CheckCommand {
    context: CommandContext,
    args: CheckArgs,
}

impl CheckCommand {
    /// Create a new check command.
    pub fn new(context: CommandContext, args: CheckArgs) -> Self {
        Self { context, args }
    }

    /// Get the command arguments.
    pub fn args(&self) -> &CheckArgs {
        &self.args
    }

    fn checker(&self, settings: Option<SettingsSnapshot>) -> UpdateChecker {
        let checker = UpdateChecker::new(
            self.context.tool.clone(),
            settings,
            self.args.local_version.as_deref(),
        )
        .with_registry(NpmRegistry::new(self.context.registry.clone()));

        match &self.args.bin {
            Some(bin) => checker.with_version_provider(CommandVersionProvider::new(bin)),
            None => checker,
        }
    }
}

impl Command for CheckCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let mut store = self.context.open_settings()?;
        let settings = SettingsSnapshot::from_file(&store);

        if ui.output_mode().shows_details() {
            ui.message(&format!("Settings: {}", store.path().display()));
        }

        let checker = self.checker(settings);
        let tool = &self.context.tool;

        // The check reports its own failures; the command itself succeeds.
        match checker.check_for_updates(ui, &mut store) {
            CheckStatus::Disabled => {
                if ui.output_mode().shows_details() {
                    ui.message(&format!(
                        "Update checks for {} are disabled (run `freshen enable`)",
                        tool.display_name
                    ));
                }
            }
            CheckStatus::UpToDate(result) => {
                ui.success(&format!(
                    "{} is up to date (latest: {})",
                    tool.display_name, result.newest_version
                ));
            }
            CheckStatus::UpdateAvailable(_) | CheckStatus::Failed(_) => {}
        }

        Ok(CommandResult::success())
    }
}
