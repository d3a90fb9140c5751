//! Visual theme and styling.

use console::Style;

/// Terminal styles used by nbreqs.
#[derive(Debug, Clone)]
pub struct NbreqsTheme {
    /// Style for success messages (green).
    pub success: Style,
    /// Style for warning messages (orange).
    pub warning: Style,
    /// Style for error messages (red bold).
    pub error: Style,
    /// Style for highlighted/important text (bold).
    pub highlight: Style,
    /// Style for headers (magenta bold).
    pub header: Style,
    /// Style for box-drawing borders (dim).
    pub border: Style,
}

impl Default for NbreqsTheme {
    fn default() -> Self {
        Self::new()
    }
}

impl NbreqsTheme {
    /// Create the default colored theme.
    pub fn new() -> Self {
        Self {
            success: Style::new().green(),
            warning: Style::new().color256(208),
            error: Style::new().red().bold(),
            highlight: Style::new().bold(),
            header: Style::new().bold().magenta(),
            border: Style::new().dim(),
        }
    }

    /// Create a theme without colors (for non-TTY or --no-color).
    pub fn plain() -> Self {
        Self {
            success: Style::new(),
            warning: Style::new(),
            error: Style::new(),
            highlight: Style::new(),
            header: Style::new(),
            border: Style::new(),
        }
    }

    /// Pick colored or plain depending on the terminal.
    pub fn detect() -> Self {
        if should_use_colors() {
            Self::new()
        } else {
            Self::plain()
        }
    }

    /// Format a success message (icon + text in green).
    pub fn format_success(&self, msg: &str) -> String {
        format!("{}", self.success.apply_to(format!("✓ {}", msg)))
    }

    /// Format a warning message (icon + text in orange).
    pub fn format_warning(&self, msg: &str) -> String {
        format!("{}", self.warning.apply_to(format!("⚠ {}", msg)))
    }

    /// Format an error message (icon + text in red bold).
    pub fn format_error(&self, msg: &str) -> String {
        format!("{}", self.error.apply_to(format!("✗ {}", msg)))
    }

    /// Format a header banner.
    pub fn format_header(&self, title: &str) -> String {
        format!(
            "{} {}",
            self.header.apply_to("📓"),
            self.highlight.apply_to(title)
        )
    }

    /// Frame captured tool output under a title, one `│` line per output line.
    pub fn format_output_block(&self, title: &str, output: &str) -> String {
        let b = &self.border;
        let mut block = format!("    {} {}\n", b.apply_to("┌─"), b.apply_to(title));
        for line in output.lines() {
            block.push_str(&format!("    {} {}\n", b.apply_to("│"), line));
        }
        block.push_str(&format!("    {}", b.apply_to(format!("└{}", "─".repeat(36)))));
        block
    }
}

/// Check if colors should be enabled.
pub fn should_use_colors() -> bool {
    // https://no-color.org/
    if std::env::var("NO_COLOR").is_ok() {
        return false;
    }

    console::Term::stdout().is_term()
}
