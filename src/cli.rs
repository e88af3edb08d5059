use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

#[derive(Debug, Parser)]
#[command(name = "vtt-transcript")]
#[command(about = "Inspect a WebVTT transcript: parse, find the playing cue, search, render.")]
pub struct Args {
    /// Path to config TOML (defaults to ./config.toml if present)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Override log level (trace, debug, info, warn, error)
    #[arg(long)]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Parse and print cues
    Parse(ParseCmd),
    /// Print the index of the cue playing at a time
    At(AtCmd),
    /// Print per-cue visibility for a search query
    Search(SearchCmd),
    /// Render the transcript pane as text
    Show(ShowCmd),
    /// Print the seek target of a cue in seconds
    Seek(SeekCmd),
    /// Print the effective default config as TOML and exit
    PrintDefaultConfig,
}

#[derive(Debug, Parser)]
pub struct ParseCmd {
    /// Input file path, or '-' for stdin
    pub input: String,

    /// Output format
    #[arg(long, value_enum, default_value_t = Format::Json)]
    pub format: Format,
}

#[derive(Debug, Parser)]
pub struct AtCmd {
    /// Input file path, or '-' for stdin
    pub input: String,

    /// Playback position in seconds
    pub seconds: f64,
}

#[derive(Debug, Parser)]
pub struct SearchCmd {
    /// Input file path, or '-' for stdin
    pub input: String,

    /// Space-separated search terms
    pub query: String,

    /// Output format (txt prints one "index<TAB>visible|hidden" line per cue)
    #[arg(long, value_enum, default_value_t = Format::Txt)]
    pub format: Format,
}

#[derive(Debug, Parser)]
pub struct ShowCmd {
    /// Input file path, or '-' for stdin
    pub input: String,

    /// Dim cues not matching these space-separated terms
    #[arg(long)]
    pub query: Option<String>,

    /// Mark the cue playing at this position (seconds)
    #[arg(long)]
    pub at: Option<f64>,
}

#[derive(Debug, Parser)]
pub struct SeekCmd {
    /// Input file path, or '-' for stdin
    pub input: String,

    /// Cue index
    pub index: usize,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum Format {
    Json,
    Txt,
}
