//! ALTO line extractor CLI
//!
//! Crops every annotated text line of ALTO pages into its own PNG and writes
//! a JSON manifest pairing each crop with its transcription.
//!
//! # Usage
//!
//! ## Single page
//! ```bash
//! alto-lines page annotations/P_0001.xml --image-dir scans --manifest-prefix test/images
//! ```
//!
//! ## Whole directory
//! ```bash
//! alto-lines batch annotations --image-dir scans --output-dir images --manifest labels.json
//! ```

mod cli;
mod config;

use alto_lines::extractor::Targets;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::info;

#[derive(Parser)]
#[command(name = "alto-lines")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Extract text-line images and labels from ALTO annotations", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract the lines of a single ALTO file
    Page {
        /// The ALTO annotation to process
        xml: PathBuf,

        #[command(flatten)]
        args: config::ExtractArgs,

        /// Output format (pretty, json)
        #[arg(long, default_value = "pretty")]
        output: String,
    },
    /// Extract the lines of every ALTO file in a directory
    Batch {
        /// Directory containing the ALTO annotations
        xml_dir: PathBuf,

        #[command(flatten)]
        args: config::ExtractArgs,

        /// Output format (pretty, json)
        #[arg(long, default_value = "pretty")]
        output: String,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    // Initialize tracing
    alto_lines::utils::init_tracing();

    let cli = Cli::parse();

    let (targets, args, output) = match cli.command {
        Commands::Page { xml, args, output } => {
            info!("Processing file: {}", xml.display());
            (Targets::Single(xml), args, output)
        }
        Commands::Batch {
            xml_dir,
            args,
            output,
        } => {
            info!("Processing directory: {}", xml_dir.display());
            (Targets::Directory(xml_dir), args, output)
        }
    };

    let config = args.resolve()?;
    cli::process_targets(&targets, config, &output)?;

    Ok(())
}
