//! CLI command implementations.
//!
//! Each command implements the [`Command`] trait, which provides a uniform
//! interface for executing commands and reporting results.
//!
//! # Architecture
//!
//! Commands are dispatched via [`CommandDispatcher`], which routes CLI
//! subcommands to their implementations. This allows:
//! - Single binary with subcommands (`nbreqs generate`, `nbreqs doctor`)
//! - Shared initialization logic
//! - Consistent global flag handling

pub mod completions;
pub mod dispatcher;
pub mod doctor;
pub mod generate;

pub use dispatcher::{Command, CommandDispatcher, CommandResult};
