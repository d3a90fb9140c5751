//! Plain UI for CI, pipes and `--json` runs.
//!
//! One line per event, no spinners or colors. Status goes to stdout;
//! warnings, errors and tool output go to stderr.

use super::theme::NbreqsTheme;
use super::{OutputMode, SpinnerHandle, UserInterface};

/// Line-oriented UI used whenever stdout is not an interactive terminal.
pub struct NonInteractiveUI {
    mode: OutputMode,
    theme: NbreqsTheme,
}

impl NonInteractiveUI {
    pub fn new(mode: OutputMode) -> Self {
        Self {
            mode,
            theme: NbreqsTheme::plain(),
        }
    }
}

impl UserInterface for NonInteractiveUI {
    fn output_mode(&self) -> OutputMode {
        self.mode
    }

    fn message(&mut self, msg: &str) {
        if self.mode.shows_status() {
            println!("{}", msg);
        }
    }

    fn success(&mut self, msg: &str) {
        if self.mode.shows_status() {
            println!("{}", self.theme.format_success(msg));
        }
    }

    fn warning(&mut self, msg: &str) {
        if self.mode.shows_status() {
            eprintln!("{}", self.theme.format_warning(msg));
        }
    }

    fn error(&mut self, msg: &str) {
        eprintln!("{}", self.theme.format_error(msg));
    }

    fn start_spinner(&mut self, message: &str) -> Box<dyn SpinnerHandle> {
        if self.mode.shows_progress() {
            println!("  {}", message);
        }
        Box::new(LineSpinner {
            mode: self.mode,
            theme: self.theme.clone(),
        })
    }

    fn show_header(&mut self, title: &str) {
        if self.mode.shows_progress() {
            println!("\n{}\n", title);
        }
    }

    fn show_output_block(&mut self, title: &str, output: &str) {
        eprintln!("{}", self.theme.format_output_block(title, output));
    }
}

/// Prints only the line an operation finishes with.
struct LineSpinner {
    mode: OutputMode,
    theme: NbreqsTheme,
}

impl SpinnerHandle for LineSpinner {
    fn set_message(&mut self, _msg: &str) {}

    fn finish_success(&mut self, msg: &str) {
        if self.mode.shows_progress() {
            println!("  {}", self.theme.format_success(msg));
        }
    }

    fn finish_error(&mut self, msg: &str) {
        eprintln!("  {}", self.theme.format_error(msg));
    }
}
