//! External process execution and environment detection.

pub mod command;
pub mod platform;

pub use command::{display_command, execute, CommandResult};
pub use platform::is_ci;
