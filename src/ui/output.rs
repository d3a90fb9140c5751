//! How much nbreqs prints.
//!
//! The modes are ordered from least to most output, so each check is a
//! threshold.

/// Output verbosity, ordered from `Silent` up to `Verbose`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub enum OutputMode {
    /// Errors only. Used for `--json`.
    Silent,
    /// Final status lines and warnings, no progress.
    Quiet,
    /// Header, per-notebook progress and the final status.
    #[default]
    Normal,
    /// Everything in `Normal`, plus the generated requirements listing.
    Verbose,
}

impl OutputMode {
    /// Pick the mode from the global `--verbose` / `--quiet` flags.
    pub fn from_flags(verbose: bool, quiet: bool) -> Self {
        match (verbose, quiet) {
            (_, true) => Self::Quiet,
            (true, false) => Self::Verbose,
            (false, false) => Self::Normal,
        }
    }

    /// Listings of tool or manifest output.
    pub fn shows_tool_output(self) -> bool {
        self >= Self::Verbose
    }

    /// Header and conversion/scan spinners.
    pub fn shows_progress(self) -> bool {
        self >= Self::Normal
    }

    /// Messages, successes and warnings.
    pub fn shows_status(self) -> bool {
        self >= Self::Quiet
    }
}
