//! nbreqs - Generate a Python requirements file from Jupyter notebooks.
//!
//! nbreqs converts every notebook in a directory into a plain script inside
//! a temporary workspace, runs a dependency scanner over the scripts, and
//! copies the resulting requirements file to a destination path. The
//! converter and scanner are external programs (`jupyter nbconvert` and
//! `pipreqs` by default) configured in `.nbreqs.yml`.
//!
//! # Modules
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`config`] - Configuration loading, parsing, and validation
//! - [`error`] - Error types and result aliases
//! - [`generator`] - Workspace, discovery, conversion, scanning and publication
//! - [`manifest`] - Reading a generated requirements file
//! - [`shell`] - External process execution
//! - [`tools`] - Converter and scanner traits and their external implementations
//! - [`ui`] - Spinners and terminal output
//!
//! # Example
//!
//! ```
//! use nbreqs::tools::template::{render, TemplateContext};
//!
//! // Resolve the placeholders of a converter argument
//! let ctx = TemplateContext::new().with("notebook", "Code/eda.ipynb");
//! let arg = render("${notebook}", &ctx).unwrap();
//! assert_eq!(arg, "Code/eda.ipynb");
//! ```
//!
//! For end-to-end runs against real processes, see the integration tests.

pub mod cli;
pub mod config;
pub mod error;
pub mod generator;
pub mod manifest;
pub mod shell;
pub mod tools;
pub mod ui;

pub use error::{NbreqsError, Result};
