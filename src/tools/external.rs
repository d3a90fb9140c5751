//! Converter and scanner backed by external programs.

use std::ffi::OsString;
use std::path::Path;

use crate::config::ToolConfig;
use crate::error::{NbreqsError, Result};
use crate::shell::{display_command, execute, CommandResult};

use super::template::{render, TemplateContext, NOTEBOOK, OUTPUT_DIR, WORKSPACE};
use super::{DependencyScanner, NotebookConverter};

/// Render a tool's argument templates against `context`.
fn build_args(tool: &ToolConfig, context: &TemplateContext) -> Result<Vec<OsString>> {
    tool.args
        .iter()
        .map(|arg| render(arg, context))
        .collect()
}

fn run(tool: &ToolConfig, args: &[OsString]) -> Result<CommandResult> {
    let result = execute(&tool.program, args)?;
    if !result.stdout.trim().is_empty() {
        tracing::debug!("{} stdout:\n{}", tool.program, result.stdout.trim_end());
    }
    Ok(result)
}

/// Runs a converter program such as `jupyter nbconvert`.
#[derive(Debug, Clone)]
pub struct ExternalConverter {
    tool: ToolConfig,
}

impl ExternalConverter {
    /// Create a converter from its configured invocation.
    pub fn new(tool: ToolConfig) -> Self {
        Self { tool }
    }

    /// The command line that would convert `notebook` into `output_dir`.
    pub fn command_line(&self, notebook: &Path, output_dir: &Path) -> Result<String> {
        let args = build_args(&self.tool, &converter_context(notebook, output_dir))?;
        Ok(display_command(&self.tool.program, &args))
    }
}

fn converter_context(notebook: &Path, output_dir: &Path) -> TemplateContext {
    TemplateContext::new()
        .with(NOTEBOOK, notebook)
        .with(OUTPUT_DIR, output_dir)
}

fn scanner_context(workspace: &Path) -> TemplateContext {
    TemplateContext::new().with(WORKSPACE, workspace)
}

impl NotebookConverter for ExternalConverter {
    fn convert(&self, notebook: &Path, output_dir: &Path) -> Result<()> {
        let args = build_args(&self.tool, &converter_context(notebook, output_dir))?;
        let result = run(&self.tool, &args)?;

        if result.success {
            Ok(())
        } else {
            Err(NbreqsError::ConversionFailed {
                notebook: notebook.to_path_buf(),
                code: result.exit_code,
                stderr: result.stderr,
            })
        }
    }
}

/// Runs a scanner program such as `pipreqs --force`.
#[derive(Debug, Clone)]
pub struct ExternalScanner {
    tool: ToolConfig,
}

impl ExternalScanner {
    /// Create a scanner from its configured invocation.
    pub fn new(tool: ToolConfig) -> Self {
        Self { tool }
    }

    /// The command line that would scan `workspace`.
    pub fn command_line(&self, workspace: &Path) -> Result<String> {
        let args = build_args(&self.tool, &scanner_context(workspace))?;
        Ok(display_command(&self.tool.program, &args))
    }
}

impl DependencyScanner for ExternalScanner {
    fn scan(&self, workspace: &Path) -> Result<()> {
        let args = build_args(&self.tool, &scanner_context(workspace))?;
        let result = run(&self.tool, &args)?;

        if result.success {
            Ok(())
        } else {
            Err(NbreqsError::ScanFailed {
                code: result.exit_code,
                stderr: result.stderr,
            })
        }
    }
}
