//! Error types for nbreqs operations.
//!
//! This module defines [`NbreqsError`], the primary error type used throughout
//! the application, and a [`Result`] type alias for convenience.
//!
//! # Error Handling Strategy
//!
//! - Each external collaborator gets its own variant ([`NbreqsError::ConversionFailed`],
//!   [`NbreqsError::ScanFailed`]) so callers can tell which stage failed
//! - An empty notebook directory and a missing manifest are outcomes, not errors
//! - Use `anyhow::Error` (via `NbreqsError::Other`) for unexpected errors

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for nbreqs operations.
#[derive(Debug, Error)]
pub enum NbreqsError {
    /// The notebook directory does not exist or is not a directory.
    #[error("Notebook directory not found: {path}")]
    NotebookDirNotFound { path: PathBuf },

    /// Configuration file not found at the given location.
    #[error("Configuration not found: {path}")]
    ConfigNotFound { path: PathBuf },

    /// Failed to parse configuration file.
    #[error("Failed to parse config at {path}: {message}")]
    ConfigParseError { path: PathBuf, message: String },

    /// Invalid configuration structure or values.
    #[error("Invalid configuration: {message}")]
    ConfigValidationError { message: String },

    /// An external tool could not be started because it is not installed.
    #[error("Tool not found: {tool}")]
    ToolNotFound { tool: String },

    /// The notebook converter exited with a non-zero status.
    #[error("Converting {notebook} failed with exit code {code:?}")]
    ConversionFailed {
        notebook: PathBuf,
        code: Option<i32>,
        stderr: String,
    },

    /// The dependency scanner exited with a non-zero status.
    #[error("Dependency scan failed with exit code {code:?}")]
    ScanFailed { code: Option<i32>, stderr: String },

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic wrapped error for anyhow interop.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl NbreqsError {
    /// Captured stderr of the failing tool, if this error came from one.
    pub fn tool_output(&self) -> Option<&str> {
        match self {
            Self::ConversionFailed { stderr, .. } | Self::ScanFailed { stderr, .. } => {
                Some(stderr.as_str()).filter(|s| !s.trim().is_empty())
            }
            _ => None,
        }
    }
}

/// Result type alias for nbreqs operations.
pub type Result<T> = std::result::Result<T, NbreqsError>;
