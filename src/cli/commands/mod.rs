//! CLI command implementations.
//!
//! Each command implements the [`Command`] trait, which provides a uniform
//! interface for executing commands and reporting results.
//!
//! # Architecture
//!
//! Commands are dispatched via [`CommandDispatcher`], which routes CLI
//! subcommands to their implementations with the shared
//! [`CommandContext`] built from global flags.

pub mod check;
pub mod dispatcher;
pub mod settings;
pub mod status;

pub use dispatcher::{Command, CommandContext, CommandDispatcher, CommandResult};
