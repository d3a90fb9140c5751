//! External collaborators: the notebook converter and the dependency scanner.
//!
//! The generator only talks to the [`NotebookConverter`] and
//! [`DependencyScanner`] traits. [`ExternalConverter`] and
//! [`ExternalScanner`] implement them by spawning the programs configured
//! in [`ToolConfig`](crate::config::ToolConfig).

pub mod external;
pub mod probe;
pub mod template;

pub use external::{ExternalConverter, ExternalScanner};
pub use probe::{parse_system_path, resolve_tool_path};

use crate::error::Result;
use std::path::Path;

/// Turns one notebook into one plain script.
///
/// Implementations must be shareable across threads so conversions can
/// run on a worker pool.
pub trait NotebookConverter: Send + Sync {
    /// Convert `notebook`, writing the script into `output_dir`.
    ///
    /// # Errors
    ///
    /// Returns `ConversionFailed` when the converter reports failure.
    fn convert(&self, notebook: &Path, output_dir: &Path) -> Result<()>;
}

/// Inspects a directory of scripts and writes a manifest into it.
pub trait DependencyScanner {
    /// Scan `workspace`, overwriting any manifest already present there.
    ///
    /// # Errors
    ///
    /// Returns `ScanFailed` when the scanner reports failure.
    fn scan(&self, workspace: &Path) -> Result<()>;
}
