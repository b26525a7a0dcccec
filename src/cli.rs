use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "pixforge")]
#[command(author, version, about = "Image conversion, resizing and compression service")]
pub struct Cli {
    /// Path to config file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the HTTP server
    Start {
        /// Host to bind to (overrides the config file)
        #[arg(long)]
        host: Option<String>,

        /// Port to listen on (overrides the config file)
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Probe an image and display its format and size
    Probe {
        /// Image to probe
        #[arg(required = true)]
        file: PathBuf,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Convert a PNG image to JPEG
    Convert {
        /// PNG input
        input: PathBuf,

        /// Where to write the JPEG
        output: PathBuf,
    },

    /// Resize an image, keeping its format
    Resize {
        input: PathBuf,
        output: PathBuf,

        /// Target width in pixels
        #[arg(long)]
        width: u16,

        /// Target height in pixels
        #[arg(long)]
        height: u16,
    },

    /// Compress an image at level 1 (lightest) to 5 (strongest)
    Compress {
        input: PathBuf,
        output: PathBuf,

        /// Compression level
        #[arg(short, long)]
        level: u8,
    },

    /// Check that required external tools are available
    CheckTools,

    /// Validate configuration file
    Validate {
        /// Config file to validate (uses default if not specified)
        config: Option<PathBuf>,
    },

    /// Print the OpenAPI document as JSON
    Openapi,

    /// Display version information
    Version,
}
