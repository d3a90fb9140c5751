//! Doctor command implementation.
//!
//! The `nbreqs doctor` command checks that the configured converter and
//! scanner programs can be found before a run needs them, and shows the
//! command line each one will be given.

use std::path::{Path, PathBuf};

use crate::config::{find_config, load_config, ToolConfig};
use crate::error::Result;
use crate::tools::{parse_system_path, resolve_tool_path, ExternalConverter, ExternalScanner};
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult};

/// The doctor command implementation.
pub struct DoctorCommand {
    working_dir: PathBuf,
    config_path: Option<PathBuf>,
    path_entries: Vec<PathBuf>,
}

impl DoctorCommand {
    /// Create a new doctor command searching the system PATH.
    pub fn new(working_dir: &Path) -> Self {
        Self {
            working_dir: working_dir.to_path_buf(),
            config_path: None,
            path_entries: parse_system_path(),
        }
    }

    /// Use an explicit config file instead of `.nbreqs.yml`.
    pub fn with_config_path(mut self, path: Option<&Path>) -> Self {
        self.config_path = path.map(Path::to_path_buf);
        self
    }

    /// Search these directories instead of the system PATH.
    pub fn with_path_entries(mut self, entries: Vec<PathBuf>) -> Self {
        self.path_entries = entries;
        self
    }

    fn locate(&self, tool: &ToolConfig) -> Option<PathBuf> {
        let program = Path::new(&tool.program);
        if program.components().count() > 1 && program.is_relative() {
            let joined = self.working_dir.join(program);
            return resolve_tool_path(&joined.to_string_lossy(), &self.path_entries);
        }
        resolve_tool_path(&tool.program, &self.path_entries)
    }
}

impl Command for DoctorCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let config = load_config(&self.working_dir, self.config_path.as_deref())?;

        ui.show_header("nbreqs doctor");
        match self
            .config_path
            .clone()
            .or_else(|| find_config(&self.working_dir))
        {
            Some(path) => ui.message(&format!("Config: {}", path.display())),
            None => ui.message("Config: built-in defaults"),
        }

        let workspace = Path::new("<workspace>");
        let converter_line = ExternalConverter::new(config.converter.clone())
            .command_line(Path::new("<notebook>"), workspace)?;
        let scanner_line = ExternalScanner::new(config.scanner.clone()).command_line(workspace)?;

        let mut missing = 0;
        for (role, tool, line) in [
            ("converter", &config.converter, converter_line),
            ("scanner", &config.scanner, scanner_line),
        ] {
            match self.locate(tool) {
                Some(path) => {
                    tracing::debug!("Resolved {} to {}", tool.program, path.display());
                    ui.success(&format!("{}: {} ({})", role, tool.program, path.display()));
                    ui.message(&format!("  runs: {}", line));
                }
                None => {
                    missing += 1;
                    ui.error(&format!("{}: {} not found", role, tool.program));
                }
            }
        }

        if missing > 0 {
            ui.warning("Install the missing tools or point .nbreqs.yml at them");
            return Ok(CommandResult::failure(1));
        }
        Ok(CommandResult::success())
    }
}
