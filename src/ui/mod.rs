//! User-facing output.
//!
//! This module provides:
//! - [`UserInterface`] trait, the output sink the update checker writes to
//! - [`TerminalUI`] for interactive terminal usage
//! - [`NonInteractiveUI`] for CI/headless environments and pipes
//! - [`MockUI`] for capturing output in tests
//!
//! # Example
//!
//! ```
//! use freshen::ui::{create_ui, OutputMode};
//!
//! // Non-interactive mode is used when stdout is not a terminal
//! let mut ui = create_ui(false, OutputMode::Quiet);
//! ui.message("Checking for updates");
//! ```

pub mod mock;
pub mod non_interactive;
pub mod output;
pub mod terminal;
pub mod theme;

pub use mock::MockUI;
pub use non_interactive::NonInteractiveUI;
pub use output::OutputMode;
pub use terminal::{create_ui, is_ci, TerminalUI};
pub use theme::{should_use_colors, FreshenTheme};

/// Trait for user interface interactions.
///
/// This trait allows capturing output in tests.
pub trait UserInterface {
    /// Get the current output mode.
    fn output_mode(&self) -> OutputMode;

    /// Display a message to the user.
    fn message(&mut self, msg: &str);

    /// Display a success message.
    fn success(&mut self, msg: &str);

    /// Display a warning message.
    fn warning(&mut self, msg: &str);

    /// Display an error message. Shown in every output mode.
    fn error(&mut self, msg: &str);

    /// Render a shell command for inline display.
    fn format_command(&self, command: &str) -> String {
        command.to_string()
    }
}
