//! Generate command implementation.
//!
//! The `nbreqs generate` command converts the notebooks in a directory and
//! writes the requirements file the scanner produces for them.

use std::path::{Path, PathBuf};

use crate::cli::args::GenerateArgs;
use crate::config::{load_config, NbreqsConfig};
use crate::error::{NbreqsError, Result};
use crate::generator::{GenerateOutcome, GenerateReport, RequirementsGenerator};
use crate::ui::{NonInteractiveUI, OutputMode, UserInterface};

use super::dispatcher::{Command, CommandResult};

/// The generate command implementation.
pub struct GenerateCommand {
    working_dir: PathBuf,
    config_path: Option<PathBuf>,
    args: GenerateArgs,
}

impl GenerateCommand {
    /// Create a new generate command.
    pub fn new(working_dir: &Path, args: GenerateArgs) -> Self {
        Self {
            working_dir: working_dir.to_path_buf(),
            config_path: None,
            args,
        }
    }

    /// Use an explicit config file instead of `.nbreqs.yml`.
    pub fn with_config_path(mut self, path: Option<&Path>) -> Self {
        self.config_path = path.map(Path::to_path_buf);
        self
    }

    /// Get the command arguments.
    pub fn args(&self) -> &GenerateArgs {
        &self.args
    }

    /// Apply command-line overrides on top of the loaded config.
    fn effective_config(&self) -> Result<NbreqsConfig> {
        let mut config = load_config(&self.working_dir, self.config_path.as_deref())?;

        if let Some(dir) = &self.args.notebook_dir {
            config.notebook_dir = dir.clone();
        }
        if let Some(output) = &self.args.output {
            config.output = output.clone();
        }
        if let Some(jobs) = self.args.jobs {
            if jobs == 0 {
                return Err(NbreqsError::ConfigValidationError {
                    message: "--jobs must be at least 1".to_string(),
                });
            }
            config.jobs = jobs;
        }
        Ok(config)
    }

    fn resolve(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.working_dir.join(path)
        }
    }

    fn report_success(&self, report: &GenerateReport, ui: &mut dyn UserInterface) {
        ui.success(&format!(
            "Requirements file successfully generated at: {} ({} packages)",
            report.output.display(),
            report.manifest.len()
        ));

        if ui.output_mode().shows_tool_output() && !report.manifest.is_empty() {
            let listing: Vec<String> = report
                .manifest
                .requirements
                .iter()
                .map(|r| r.to_string())
                .collect();
            ui.show_output_block(&self.manifest_title(report), &listing.join("\n"));
        }
    }

    fn manifest_title(&self, report: &GenerateReport) -> String {
        report
            .output
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| report.output.display().to_string())
    }
}

impl Command for GenerateCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let config = self.effective_config()?;
        let notebook_dir = self.resolve(&config.notebook_dir);
        let output = self.resolve(&config.output);
        tracing::debug!(
            "Generating {} from notebooks in {}",
            output.display(),
            notebook_dir.display()
        );

        let generator = RequirementsGenerator::from_config(&config);

        let result = if self.args.json {
            let mut silent = NonInteractiveUI::new(OutputMode::Silent);
            generator.generate(&notebook_dir, &output, &mut silent)
        } else {
            ui.show_header("nbreqs");
            generator.generate(&notebook_dir, &output, ui)
        };

        let outcome = match result {
            Ok(outcome) => outcome,
            Err(e) => {
                if let Some(stderr) = e.tool_output() {
                    let title = match &e {
                        NbreqsError::ConversionFailed { .. } => "converter output",
                        _ => "scanner output",
                    };
                    ui.show_output_block(title, stderr);
                }
                return Err(e);
            }
        };

        if self.args.json {
            let json = serde_json::to_string_pretty(&outcome)
                .map_err(|e| NbreqsError::Other(e.into()))?;
            ui.message(&json);
        } else if let GenerateOutcome::Generated(report) = &outcome {
            self.report_success(report, ui);
        }

        Ok(CommandResult::success())
    }
}
