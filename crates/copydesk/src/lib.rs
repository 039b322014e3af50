//! The `copydesk` command line, exposed as a library so `xtask` can render
//! man pages and completions from [`command()`] and tests can parse [`Cli`]
//! directly. The binary entry point lives in `main.rs`.

pub mod commands;

#[cfg(feature = "mcp")]
pub mod server;

use clap::{CommandFactory, Parser, Subcommand};
use std::path::PathBuf;

/// When to colour terminal output.
#[derive(Debug, Clone, Copy, Default, clap::ValueEnum)]
pub enum ColorChoice {
    /// Colour when the stream is a terminal.
    #[default]
    Auto,
    /// Colour even when piped.
    Always,
    /// Plain text.
    Never,
}

impl ColorChoice {
    /// Install this choice as the process-wide owo-colors override.
    pub fn apply(self) {
        match self {
            Self::Auto => owo_colors::unset_override(),
            Self::Always => owo_colors::set_override(true),
            Self::Never => owo_colors::set_override(false),
        }
    }
}

const ENV_HELP: &str = "\
ENVIRONMENT VARIABLES:
    RUST_LOG               Log filter (e.g., debug, copydesk=trace)
    COPYDESK_LOG_PATH      Explicit log file path
    COPYDESK_LOG_DIR       Log directory
    COPYDESK_LANGUAGE      Spell-check language (en, en-us, en-gb, en-ca, en-au)
";

/// Top-level arguments.
#[derive(Parser)]
#[command(name = "copydesk")]
#[command(about = "Copy editing and readability reports for Markdown documentation", long_about = None)]
#[command(version, arg_required_else_help = true)]
#[command(after_long_help = ENV_HELP)]
pub struct Cli {
    /// What to run.
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Print only the version number (for scripting)
    #[arg(long)]
    pub version_only: bool,

    /// Path to configuration file (overrides discovery)
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Run as if started in DIR
    #[arg(short = 'C', long, global = true)]
    pub chdir: Option<PathBuf>,

    /// Only print errors (suppresses warnings/info)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// More detail (repeatable; e.g. -vv)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Colorize output
    #[arg(long, global = true, value_enum, default_value_t)]
    pub color: ColorChoice,

    /// Output as JSON (for scripting)
    #[arg(long, global = true)]
    pub json: bool,
}

/// copydesk subcommands.
#[derive(Subcommand)]
pub enum Commands {
    /// Check spelling, flagged words, headings and punctuation
    CopyEdit(commands::copy_edit::CopyEditArgs),

    /// Score readability per section (Flesch-Kincaid and Flesch reading ease)
    Readability(commands::readability::ReadabilityArgs),

    /// Show version and effective configuration
    Info(commands::info::InfoArgs),

    /// Start MCP (Model Context Protocol) server on stdio
    #[cfg(feature = "mcp")]
    Serve(commands::serve::ServeArgs),
}

/// The full clap command tree, for man pages and shell completions.
pub fn command() -> clap::Command {
    Cli::command()
}
