use clap::Parser;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "audiogate")]
#[command(
    author,
    version,
    about = "Batch video downloader that skips sources without an audio track"
)]
pub struct Cli {
    /// File with source URLs, one per line; blank lines and `#` comments are ignored
    #[arg(default_value = "urls.txt")]
    pub input: PathBuf,

    /// Destination directory for downloaded files (created if absent)
    #[arg(short, long, value_name = "DIR", default_value = "downloads")]
    pub output: PathBuf,

    /// Process only the first eligible URL, then stop
    #[arg(long)]
    pub dry_run: bool,

    /// Enable verbose engine logging and a pre-download format listing
    #[arg(short, long)]
    pub verbose: bool,
}
