//! CLI command definitions and argument parsing.

use clap::Parser;
use std::path::PathBuf;

/// Covgate CLI - resolve evidence-backed coverage facts from document text.
#[derive(Debug, Parser)]
#[command(name = "covgate")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Insurer identifier (names the document directory)
    #[arg(short, long)]
    pub insurer: String,

    /// Comma-separated slot list; all slots when omitted
    #[arg(short, long, value_delimiter = ',')]
    pub slots: Vec<String>,

    /// Coverage registry artifact path
    #[arg(short, long)]
    pub registry: Option<PathBuf>,

    /// Root directory of extracted document text
    #[arg(short, long)]
    pub docs: Option<PathBuf>,

    /// Output file for line-delimited records; stdout when omitted
    #[arg(short, long)]
    pub out: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub format: CliFormat,

    /// Configuration file path (defaults to ./covgate.toml when present)
    #[arg(short, long)]
    pub config: Option<PathBuf>,
}

/// Output format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum CliFormat {
    /// Summary table plus record file (default)
    Table,
    /// Records only, as JSON lines on stdout
    Json,
    /// Minimal per-slot status lines
    Quiet,
}
