//! CLI argument definitions.
//!
//! This module defines all CLI arguments using clap's derive macros.
//! The main entry point is the [`Cli`] struct.

use clap::{Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

/// nbreqs - Generate a requirements file from a directory of notebooks.
#[derive(Debug, Parser)]
#[command(name = "nbreqs")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to config file (overrides default .nbreqs.yml)
    #[arg(short, long, global = true, env = "NBREQS_CONFIG")]
    pub config: Option<PathBuf>,

    /// Show verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Minimal output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Generate requirements from notebooks (default if no command specified)
    Generate(GenerateArgs),

    /// Check that the converter and scanner are installed
    Doctor(DoctorArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// Arguments for the `generate` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct GenerateArgs {
    /// Directory containing the notebooks (default: Code)
    #[arg(env = "NBREQS_NOTEBOOK_DIR")]
    pub notebook_dir: Option<PathBuf>,

    /// Where to write the requirements file (default: requirements.txt)
    #[arg(short, long, env = "NBREQS_OUTPUT")]
    pub output: Option<PathBuf>,

    /// Number of notebooks to convert in parallel
    #[arg(short, long, env = "NBREQS_JOBS")]
    pub jobs: Option<usize>,

    /// Print the result as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `doctor` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct DoctorArgs {}

/// Arguments for the `completions` command.
#[derive(Debug, Clone, clap::Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}
