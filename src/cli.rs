use clap::{Parser, Subcommand};
use photo_gallery::RuntimeMode;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "snapshot-gallery")]
#[command(author, version, about = "Take photos into a locally persisted gallery")]
pub struct Cli {
    /// Path to config file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Runtime mode (native or web), overrides the config file
    #[arg(short, long, global = true)]
    pub mode: Option<RuntimeMode>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Capture a photo from an image file or URL and add it to the gallery
    Capture {
        /// Image file to take the photo from (an http(s) URL only with --mode web)
        #[arg(required = true)]
        source: String,
    },

    /// Show the saved gallery, newest first
    List {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_capture() {
        let cli = Cli::parse_from(["snapshot-gallery", "--mode", "web", "capture", "shot.jpg"]);
        assert_eq!(cli.mode, Some(RuntimeMode::Web));
        assert!(matches!(cli.command, Commands::Capture { source } if source == "shot.jpg"));
    }

    #[test]
    fn test_parse_list_json() {
        let cli = Cli::parse_from(["snapshot-gallery", "list", "--json", "-v"]);
        assert!(cli.verbose);
        assert!(matches!(cli.command, Commands::List { json: true }));
    }
}
