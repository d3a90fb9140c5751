//! Configuration schema definitions.
//!
//! These structs map to the `.nbreqs.yml` file format. Every field has a
//! default, so an empty file (or no file at all) yields a working setup
//! that uses `jupyter nbconvert` and `pipreqs`.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration structure for `.nbreqs.yml`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct NbreqsConfig {
    /// Directory scanned for notebooks when none is given on the command line.
    pub notebook_dir: PathBuf,

    /// Destination of the generated manifest.
    pub output: PathBuf,

    /// Notebook file extension, without the leading dot.
    pub extension: String,

    /// File name the scanner writes inside the workspace.
    pub manifest_name: String,

    /// Number of notebooks converted concurrently.
    pub jobs: usize,

    /// Notebook converter invocation.
    pub converter: ToolConfig,

    /// Dependency scanner invocation.
    pub scanner: ToolConfig,
}

impl Default for NbreqsConfig {
    fn default() -> Self {
        Self {
            notebook_dir: PathBuf::from(DEFAULT_NOTEBOOK_DIR),
            output: PathBuf::from(DEFAULT_MANIFEST_NAME),
            extension: DEFAULT_EXTENSION.to_string(),
            manifest_name: DEFAULT_MANIFEST_NAME.to_string(),
            jobs: 1,
            converter: ToolConfig::default_converter(),
            scanner: ToolConfig::default_scanner(),
        }
    }
}

/// Default notebook directory.
pub const DEFAULT_NOTEBOOK_DIR: &str = "Code";

/// Default notebook extension.
pub const DEFAULT_EXTENSION: &str = "ipynb";

/// Default manifest file name.
pub const DEFAULT_MANIFEST_NAME: &str = "requirements.txt";

/// An external program and its argument template.
///
/// Arguments may reference `${notebook}` and `${output_dir}` (converter) or
/// `${workspace}` (scanner). `$$` produces a literal `$`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ToolConfig {
    /// Executable name or path.
    pub program: String,

    /// Argument templates.
    #[serde(default)]
    pub args: Vec<String>,
}

impl ToolConfig {
    /// `jupyter nbconvert --to python <notebook> --output-dir <dir>`
    pub fn default_converter() -> Self {
        Self {
            program: "jupyter".to_string(),
            args: vec![
                "nbconvert".to_string(),
                "--to".to_string(),
                "python".to_string(),
                "${notebook}".to_string(),
                "--output-dir".to_string(),
                "${output_dir}".to_string(),
            ],
        }
    }

    /// `pipreqs <workspace> --force`
    pub fn default_scanner() -> Self {
        Self {
            program: "pipreqs".to_string(),
            args: vec!["${workspace}".to_string(), "--force".to_string()],
        }
    }
}
