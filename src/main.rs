//! nbreqs CLI entry point.

use std::process::ExitCode;

use clap::Parser;
use nbreqs::cli::{Cli, CommandDispatcher, Commands};
use nbreqs::shell::is_ci;
use nbreqs::ui::{create_ui, OutputMode};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Initialize the tracing subscriber for logging.
///
/// Log level is controlled by:
/// 1. `--debug` flag sets level to DEBUG
/// 2. `RUST_LOG` environment variable (if set)
/// 3. Default is WARN
///
/// Logs go to stderr so they never mix with `--json` output.
fn init_tracing(debug: bool) {
    let filter = if debug {
        EnvFilter::new("nbreqs=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("nbreqs=warn"))
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(filter)
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.debug);

    tracing::debug!("nbreqs starting with args: {:?}", cli);

    let output_mode = OutputMode::from_flags(cli.verbose, cli.quiet);

    // Handle --no-color
    if cli.no_color {
        std::env::set_var("NO_COLOR", "1");
    }

    // JSON output and completion scripts must stay free of spinners
    let is_interactive = match &cli.command {
        Some(Commands::Generate(args)) => !args.json && !is_ci(),
        Some(Commands::Completions(_)) => false,
        _ => !is_ci(),
    };

    let mut ui = create_ui(is_interactive, output_mode);

    // relative notebook and output paths would resolve somewhere unexpected
    let working_dir = match std::env::current_dir() {
        Ok(dir) => dir,
        Err(e) => {
            ui.error(&format!("Error: cannot determine working directory: {}", e));
            return ExitCode::from(1);
        }
    };

    let dispatcher = CommandDispatcher::new(working_dir);

    match dispatcher.dispatch(&cli, ui.as_mut()) {
        Ok(result) => ExitCode::from(result.exit_code as u8),
        Err(e) => {
            ui.error(&format!("Error: {}", e));
            ExitCode::from(1)
        }
    }
}
