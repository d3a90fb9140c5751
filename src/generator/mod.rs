//! Requirements generation for a directory of notebooks.
//!
//! [`RequirementsGenerator::generate`] runs the whole pipeline:
//!
//! 1. create a scratch [`Workspace`]
//! 2. [`discover_notebooks`] directly inside the notebook directory
//! 3. convert each notebook into the workspace ([`convert_all`])
//! 4. run the dependency scanner once over the workspace
//! 5. copy the scanner's manifest to the destination ([`publish_manifest`])
//!
//! The workspace is removed on every exit path. An empty notebook directory
//! and a scan that leaves no manifest are reported as [`GenerateOutcome`]s,
//! not errors; converter and scanner failures are errors.
//!
//! # Example
//!
//! ```
//! use nbreqs::generator::{GenerateOutcome, GeneratorOptions, RequirementsGenerator};
//! use nbreqs::tools::{DependencyScanner, NotebookConverter};
//! use nbreqs::ui::MockUI;
//! use std::path::Path;
//!
//! struct Stub;
//! impl NotebookConverter for Stub {
//!     fn convert(&self, _nb: &Path, out: &Path) -> nbreqs::Result<()> {
//!         std::fs::write(out.join("nb.py"), "import numpy")?;
//!         Ok(())
//!     }
//! }
//! struct Pin;
//! impl DependencyScanner for Pin {
//!     fn scan(&self, ws: &Path) -> nbreqs::Result<()> {
//!         std::fs::write(ws.join("requirements.txt"), "numpy==1.26.4\n")?;
//!         Ok(())
//!     }
//! }
//!
//! let dir = tempfile::TempDir::new().unwrap();
//! std::fs::write(dir.path().join("a.ipynb"), "{}").unwrap();
//! let out = dir.path().join("requirements.txt");
//!
//! let generator = RequirementsGenerator::new(Stub, Pin, GeneratorOptions::default());
//! let outcome = generator.generate(dir.path(), &out, &mut MockUI::new()).unwrap();
//! assert!(matches!(outcome, GenerateOutcome::Generated(_)));
//! ```

pub mod conversion;
pub mod discovery;
pub mod publish;
pub mod workspace;

pub use conversion::{convert_all, display_name};
pub use discovery::discover_notebooks;
pub use publish::publish_manifest;
pub use workspace::Workspace;

use serde::Serialize;
use std::path::{Path, PathBuf};

use crate::config::{NbreqsConfig, DEFAULT_EXTENSION, DEFAULT_MANIFEST_NAME};
use crate::error::Result;
use crate::manifest::Manifest;
use crate::tools::{DependencyScanner, ExternalConverter, ExternalScanner, NotebookConverter};
use crate::ui::UserInterface;

/// Settings for one generator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratorOptions {
    /// Notebook extension, without the leading dot.
    pub extension: String,
    /// File name the scanner writes inside the workspace.
    pub manifest_name: String,
    /// Parallel conversions.
    pub jobs: usize,
    /// Where workspaces are created (system temp dir when `None`).
    pub workspace_parent: Option<PathBuf>,
}

impl Default for GeneratorOptions {
    fn default() -> Self {
        Self {
            extension: DEFAULT_EXTENSION.to_string(),
            manifest_name: DEFAULT_MANIFEST_NAME.to_string(),
            jobs: 1,
            workspace_parent: None,
        }
    }
}

impl From<&NbreqsConfig> for GeneratorOptions {
    fn from(config: &NbreqsConfig) -> Self {
        Self {
            extension: config.extension.clone(),
            manifest_name: config.manifest_name.clone(),
            jobs: config.jobs,
            workspace_parent: None,
        }
    }
}

/// Summary of a successful run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GenerateReport {
    /// Where the manifest was written.
    pub output: PathBuf,
    /// Number of notebooks converted.
    pub notebooks: usize,
    /// Parsed contents of the published manifest.
    pub manifest: Manifest,
}

/// Non-error result of [`RequirementsGenerator::generate`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum GenerateOutcome {
    /// The notebook directory holds no notebooks; nothing was written.
    NoNotebooks { notebook_dir: PathBuf },
    /// The scanner succeeded but wrote no manifest; nothing was written.
    ManifestMissing { notebooks: usize },
    /// The manifest was published.
    Generated(GenerateReport),
}

/// Converts notebooks and scans them for imports.
pub struct RequirementsGenerator<C, S> {
    converter: C,
    scanner: S,
    options: GeneratorOptions,
}

impl RequirementsGenerator<ExternalConverter, ExternalScanner> {
    /// Build a generator that runs the configured external tools.
    pub fn from_config(config: &NbreqsConfig) -> Self {
        Self::new(
            ExternalConverter::new(config.converter.clone()),
            ExternalScanner::new(config.scanner.clone()),
            GeneratorOptions::from(config),
        )
    }
}

impl<C, S> RequirementsGenerator<C, S>
where
    C: NotebookConverter,
    S: DependencyScanner,
{
    /// Create a generator from its collaborators.
    pub fn new(converter: C, scanner: S, options: GeneratorOptions) -> Self {
        Self {
            converter,
            scanner,
            options,
        }
    }

    /// The generator's settings.
    pub fn options(&self) -> &GeneratorOptions {
        &self.options
    }

    /// Generate a manifest for the notebooks in `notebook_dir`.
    ///
    /// # Errors
    ///
    /// - `NotebookDirNotFound` if `notebook_dir` is not a directory
    /// - `ConversionFailed` / `ToolNotFound` from the first failing conversion
    /// - `ScanFailed` if the scanner reports failure
    /// - `Io` if the workspace or the destination cannot be written
    pub fn generate(
        &self,
        notebook_dir: &Path,
        output_path: &Path,
        ui: &mut dyn UserInterface,
    ) -> Result<GenerateOutcome> {
        let workspace = match &self.options.workspace_parent {
            Some(parent) => Workspace::create_in(parent)?,
            None => Workspace::create()?,
        };

        let notebooks = discover_notebooks(notebook_dir, &self.options.extension)?;
        if notebooks.is_empty() {
            ui.message(&format!(
                "No notebook files found in {}.",
                notebook_dir.display()
            ));
            workspace.close()?;
            return Ok(GenerateOutcome::NoNotebooks {
                notebook_dir: notebook_dir.to_path_buf(),
            });
        }

        let converted = convert_all(
            &self.converter,
            &notebooks,
            workspace.path(),
            self.options.jobs,
            ui,
        )?;

        self.scan(workspace.path(), ui)?;

        let outcome = match publish_manifest(
            workspace.path(),
            &self.options.manifest_name,
            output_path,
        )? {
            Some(_) => {
                // the manifest is published; a failed summary read must not undo that
                let manifest = Manifest::load(output_path).unwrap_or_else(|e| {
                    tracing::warn!("Could not read {}: {}", output_path.display(), e);
                    Manifest::default()
                });
                GenerateOutcome::Generated(GenerateReport {
                    output: output_path.to_path_buf(),
                    notebooks: converted,
                    manifest,
                })
            }
            None => {
                ui.warning(&format!(
                    "Failed to generate {}.",
                    self.options.manifest_name
                ));
                GenerateOutcome::ManifestMissing {
                    notebooks: converted,
                }
            }
        };

        workspace.close()?;
        Ok(outcome)
    }

    fn scan(&self, workspace: &Path, ui: &mut dyn UserInterface) -> Result<()> {
        let mut spinner = ui.start_spinner("Scanning converted scripts for imports");
        match self.scanner.scan(workspace) {
            Ok(()) => {
                spinner.finish_success("Scanned converted scripts");
                Ok(())
            }
            Err(e) => {
                spinner.finish_error("Dependency scan failed");
                Err(e)
            }
        }
    }
}
