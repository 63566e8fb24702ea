//! CLI argument definitions using clap derive macros.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use quizdl_core::OutputFormat;

/// Download and normalize published quiz question sheets.
///
/// Fetches every registered game's sheet, recovers questions and answers
/// even from badly exported files, and saves them as JSON or CSV.
#[derive(Parser, Debug)]
#[command(name = "quizdl")]
#[command(author, version, about)]
#[command(arg_required_else_help = true)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: Command,
}

/// Flags shared by every subcommand.
#[derive(Args, Debug, Clone, Default)]
pub struct GlobalArgs {
    /// Increase output verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Directory output files are written to (default: current directory)
    #[arg(short = 'o', long, global = true)]
    pub output_dir: Option<PathBuf>,

    /// Location sheet paths are appended to
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    /// Request timeout in seconds (1-3600)
    #[arg(long, global = true, value_parser = clap::value_parser!(u64).range(1..=3600))]
    pub timeout_secs: Option<u64>,

    /// Pause between sources in milliseconds (0 to disable, max 60000)
    #[arg(long, global = true, value_parser = clap::value_parser!(u64).range(0..=60000))]
    pub pacing_ms: Option<u64>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Download every game and save one file per game
    All(AllArgs),
    /// Download a single game by key or menu number
    Game(GameArgs),
    /// List available games with their menu numbers
    List,
    /// Search saved JSON files for questions containing a keyword
    Search(SearchArgs),
    /// Show effective configuration
    Config,
}

#[derive(Args, Debug)]
pub struct AllArgs {
    /// Output encoding: json or csv
    #[arg(short, long)]
    pub format: Option<OutputFormat>,

    /// Also write every game into one combined JSON file at this path
    #[arg(long, value_name = "FILE")]
    pub combined: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub struct GameArgs {
    /// Game key (e.g. kkong) or menu number (e.g. 1)
    pub selection: String,

    /// Output encoding: json or csv
    #[arg(short, long)]
    pub format: Option<OutputFormat>,
}

#[derive(Args, Debug)]
pub struct SearchArgs {
    /// Text to look for in question text (case-insensitive)
    pub keyword: String,

    /// Saved per-game or combined JSON files
    #[arg(required = true)]
    pub files: Vec<PathBuf>,
}
