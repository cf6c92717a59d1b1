//! Command line argument parsing for the identigram CLI using clap.

use clap::{Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Identigram - identifier analysis for full-text search
#[derive(Parser, Debug, Clone)]
#[command(name = "identigram")]
#[command(about = "Run identifiers through identifier and n-gram token filters")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(long_about = None)]
pub struct IdentigramArgs {
    /// Verbosity level (0=quiet, 1=normal, 2=verbose, 3=debug, 4=trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Quiet mode (overrides verbose)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Output format
    #[arg(short = 'f', long = "format", default_value = "human", global = true)]
    pub output_format: OutputFormat,

    /// Pretty-print JSON output
    #[arg(long, global = true)]
    pub pretty: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

impl IdentigramArgs {
    /// Get the effective verbosity level
    pub fn verbosity(&self) -> u8 {
        if self.quiet {
            0
        } else {
            match self.verbose {
                0 => 1, // Default to normal
                n => n + 1,
            }
        }
    }
}

/// Available CLI commands
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Analyze text and print the resulting tokens
    Analyze(AnalyzeArgs),

    /// List registered tokenizers and filters
    Components,
}

/// Arguments for analyzing text
#[derive(Parser, Debug, Clone)]
pub struct AnalyzeArgs {
    /// Text to analyze (reads --input or stdin when omitted)
    #[arg(value_name = "TEXT")]
    pub text: Option<String>,

    /// Read the text from a file
    #[arg(short, long, value_name = "FILE", conflicts_with = "text")]
    pub input: Option<PathBuf>,

    /// Analyze each input line separately
    #[arg(long)]
    pub lines: bool,

    /// Analyzer configuration file (JSON)
    #[arg(
        short,
        long,
        value_name = "CONFIG_FILE",
        env = "IDENTIGRAM_CONFIG",
        conflicts_with_all = ["filters", "args"]
    )]
    pub config: Option<PathBuf>,

    /// Tokenizer name
    #[arg(short, long, default_value = "punctation")]
    pub tokenizer: String,

    /// Filter name; may be repeated, filters apply in order
    #[arg(long = "filter", value_name = "NAME")]
    pub filters: Vec<String>,

    /// Filter option as key=value; applies to the last --filter
    #[arg(short = 'a', long = "arg", value_name = "KEY=VALUE", requires = "filters")]
    pub args: Vec<String>,
}

/// Output format options
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OutputFormat {
    /// Human-readable output
    Human,
    /// JSON output
    Json,
}
