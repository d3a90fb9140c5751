//! Configuration loading, parsing, and validation.
//!
//! - Schema definitions in [`schema`]
//! - File discovery and loading in [`loader`]
//! - Validation in [`validator`]
//!
//! # Example
//!
//! ```
//! use nbreqs::config::load_config;
//! use tempfile::TempDir;
//! use std::fs;
//!
//! let temp = TempDir::new().unwrap();
//! fs::write(temp.path().join(".nbreqs.yml"), "notebook_dir: notebooks").unwrap();
//!
//! let config = load_config(temp.path(), None).unwrap();
//! assert_eq!(config.notebook_dir, std::path::PathBuf::from("notebooks"));
//! ```
//!
//! # Precedence
//!
//! Command-line flags (and their `NBREQS_*` environment variables) override
//! `.nbreqs.yml`, which overrides the built-in defaults.

pub mod loader;
pub mod schema;
pub mod validator;

pub use loader::{find_config, load_config, load_config_file, parse_config, CONFIG_FILE_NAME};
pub use schema::{
    NbreqsConfig, ToolConfig, DEFAULT_EXTENSION, DEFAULT_MANIFEST_NAME, DEFAULT_NOTEBOOK_DIR,
};
pub use validator::{validate, validate_config, ValidationError};
