//! Command line and environment configuration.

use crate::ffmpeg::ExtractorSettings;
use clap::{Args, Parser, Subcommand};
use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Parser, Debug)]
#[command(name = "mkvfont-server", author, version, about = "Serves fonts embedded in Matroska files", long_about = None)]
pub struct Cli {
    /// Enable debug logging.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Only log warnings and errors.
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run the HTTP font service.
    Serve(ServeArgs),

    /// Print the family name of local font files.
    Identify {
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },

    /// Extract one attachment from a container.
    Extract {
        video: PathBuf,

        /// Zero-based position among the container's attachments.
        position: usize,

        /// Write here instead of stdout.
        #[arg(short, long)]
        output: Option<PathBuf>,

        #[command(flatten)]
        extractor: ExtractorArgs,
    },
}

#[derive(Args, Debug, Clone)]
pub struct ServeArgs {
    #[arg(long, env = "MKVFONT_LISTEN", default_value = "0.0.0.0:8210")]
    pub listen: SocketAddr,

    /// JSON export of the media library.
    #[arg(long, env = "MKVFONT_LIBRARY")]
    pub library: PathBuf,

    /// Reload the library when its file changes.
    #[arg(long, env = "MKVFONT_WATCH")]
    pub watch: bool,

    /// Fallback font served when extraction fails; the bundled font otherwise.
    #[arg(long, env = "MKVFONT_DEFAULT_FONT")]
    pub default_font: Option<PathBuf>,

    #[command(flatten)]
    pub extractor: ExtractorArgs,
}

#[derive(Args, Debug, Clone)]
pub struct ExtractorArgs {
    #[arg(long, env = "MKVFONT_FFMPEG", default_value = "ffmpeg")]
    pub ffmpeg: PathBuf,

    /// Seconds before an extraction is killed, 0 for no limit.
    #[arg(long, env = "MKVFONT_EXTRACT_TIMEOUT", default_value_t = 30)]
    pub extract_timeout: u64,

    /// Extractions allowed to run at once.
    #[arg(long, env = "MKVFONT_MAX_EXTRACTIONS", default_value_t = 4)]
    pub max_extractions: usize,
}

impl ExtractorArgs {
    pub fn settings(&self) -> ExtractorSettings {
        ExtractorSettings {
            program: self.ffmpeg.clone(),
            timeout: match self.extract_timeout {
                0 => None,
                secs => Some(Duration::from_secs(secs)),
            },
            max_concurrent: self.max_extractions.max(1),
        }
    }
}
