//! Settings commands.
//!
//! `freshen enable`, `freshen disable` and `freshen clear` edit the
//! persisted settings directly.

use serde_json::json;
use tracing::debug;

use crate::error::Result;
use crate::settings::{keys, SettingsStore};
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandContext, CommandResult};

/// Sets the `checkForUpdates` preference.
pub struct SetCheckCommand {
    context: CommandContext,
    enabled: bool,
}

impl SetCheckCommand {
    /// Create a command that stores `enabled` as the preference.
    pub fn new(context: CommandContext, enabled: bool) -> Self {
        Self { context, enabled }
    }
}

impl Command for SetCheckCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let mut store = self.context.open_settings()?;
        store.set(keys::CHECK_FOR_UPDATES, json!(self.enabled));
        store.flush()?;
        debug!(enabled = self.enabled, path = %store.path().display(), "Stored preference");

        let state = if self.enabled { "enabled" } else { "disabled" };
        ui.success(&format!(
            "Update checks {} for {}",
            state, self.context.tool.display_name
        ));
        Ok(CommandResult::success())
    }
}

/// Forgets the cached registry version and check timestamp.
pub struct ClearCommand {
    context: CommandContext,
}

impl ClearCommand {
    /// Create a new clear command.
    pub fn new(context: CommandContext) -> Self {
        Self { context }
    }
}

impl Command for ClearCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let mut store = self.context.open_settings()?;

        if !store.exists() {
            ui.message("Nothing to clear");
            return Ok(CommandResult::success());
        }

        store.remove(keys::NEWEST_VERSION);
        store.remove(keys::LAST_VERSION_CHECK);
        store.flush()?;

        ui.success("Cleared cached version; the next check will query the registry");
        Ok(CommandResult::success())
    }
}
