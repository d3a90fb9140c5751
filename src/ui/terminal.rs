//! Colored terminal UI with live spinners.

use console::Term;
use std::io::Write;

use super::{
    NbreqsTheme, NonInteractiveUI, OutputMode, ProgressSpinner, SpinnerHandle, UserInterface,
};

/// UI for a person watching a TTY.
///
/// Status lines go to stdout, while warnings, errors and tool output go to
/// stderr, matching [`NonInteractiveUI`] so redirects behave the same.
pub struct TerminalUI {
    out: Term,
    err: Term,
    theme: NbreqsTheme,
    mode: OutputMode,
}

impl TerminalUI {
    pub fn new(mode: OutputMode) -> Self {
        Self {
            out: Term::stdout(),
            err: Term::stderr(),
            theme: NbreqsTheme::detect(),
            mode,
        }
    }

    fn status_line(&mut self, line: String) {
        if self.mode.shows_status() {
            writeln!(self.out, "{}", line).ok();
        }
    }
}

impl UserInterface for TerminalUI {
    fn output_mode(&self) -> OutputMode {
        self.mode
    }

    fn message(&mut self, msg: &str) {
        self.status_line(msg.to_string());
    }

    fn success(&mut self, msg: &str) {
        let line = self.theme.format_success(msg);
        self.status_line(line);
    }

    fn warning(&mut self, msg: &str) {
        if self.mode.shows_status() {
            writeln!(self.err, "{}", self.theme.format_warning(msg)).ok();
        }
    }

    fn error(&mut self, msg: &str) {
        writeln!(self.err, "{}", self.theme.format_error(msg)).ok();
    }

    fn start_spinner(&mut self, message: &str) -> Box<dyn SpinnerHandle> {
        let spinner = if self.mode.shows_progress() {
            ProgressSpinner::new(message)
        } else {
            ProgressSpinner::hidden()
        };
        Box::new(spinner)
    }

    fn show_header(&mut self, title: &str) {
        if self.mode.shows_progress() {
            writeln!(self.out, "\n{}\n", self.theme.format_header(title)).ok();
        }
    }

    fn show_output_block(&mut self, title: &str, output: &str) {
        writeln!(self.err, "{}", self.theme.format_output_block(title, output)).ok();
    }
}

/// Spinners only when asked for and stdout is a terminal; plain lines otherwise.
pub fn create_ui(interactive: bool, mode: OutputMode) -> Box<dyn UserInterface> {
    if interactive && Term::stdout().is_term() {
        Box::new(TerminalUI::new(mode))
    } else {
        Box::new(NonInteractiveUI::new(mode))
    }
}
