//! CLI argument definitions using clap derive macros.

use std::path::PathBuf;

use clap::Parser;

/// Look up a YouTube video and simulate downloading a chosen format.
///
/// Snapstream resolves a video URL to its metadata and downloadable
/// formats through public relay services, then runs the selection through
/// a single-slot download queue and records completions in a local vault.
#[derive(Parser, Debug)]
#[command(name = "snapstream")]
#[command(author, version, about)]
pub struct Args {
    /// YouTube video URL to look up
    pub url: Option<String>,

    /// List resolved formats without downloading
    #[arg(long)]
    pub list: bool,

    /// Video quality to download (e.g. 720p); defaults to the best available
    #[arg(long)]
    pub quality: Option<String>,

    /// Download an audio format instead of video
    #[arg(long)]
    pub audio: bool,

    /// Print the vault of completed downloads and exit
    #[arg(long)]
    pub vault: bool,

    /// Override the vault file location
    #[arg(long, value_name = "FILE")]
    pub vault_path: Option<PathBuf>,

    /// Increase output verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(short, long)]
    pub quiet: bool,
}
