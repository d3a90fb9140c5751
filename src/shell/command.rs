//! External process execution.
//!
//! Tools are spawned directly (no intermediate shell) so that notebook paths
//! containing spaces or quotes reach the tool as a single argument. Both
//! output streams are always captured: stderr is shown when a tool fails,
//! stdout only goes to the debug log.

use crate::error::{NbreqsError, Result};
use std::ffi::OsString;
use std::process::{Command, Output, Stdio};
use std::time::Instant;

/// How a finished tool exited and what it printed.
#[derive(Debug, Clone)]
pub struct CommandResult {
    /// `None` when the process was killed by a signal.
    pub exit_code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
    pub success: bool,
}

impl From<Output> for CommandResult {
    fn from(output: Output) -> Self {
        Self {
            exit_code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            success: output.status.success(),
        }
    }
}

/// Render a program and its arguments as a single display string.
pub fn display_command(program: &str, args: &[OsString]) -> String {
    let mut line = program.to_string();
    for arg in args {
        line.push(' ');
        line.push_str(&arg.to_string_lossy());
    }
    line
}

/// Run `program` with `args` and block until it exits.
///
/// A non-zero exit is reported through [`CommandResult::success`], not as an
/// error. Spawning a program that does not exist yields
/// [`NbreqsError::ToolNotFound`].
pub fn execute(program: &str, args: &[OsString]) -> Result<CommandResult> {
    tracing::debug!("Executing: {}", display_command(program, args));
    let start = Instant::now();

    let output = Command::new(program)
        .args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .output()
        .map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => NbreqsError::ToolNotFound {
                tool: program.to_string(),
            },
            _ => NbreqsError::Io(e),
        })?;

    tracing::debug!(
        "{} exited with {:?} after {:?}",
        program,
        output.status.code(),
        start.elapsed()
    );
    Ok(CommandResult::from(output))
}
