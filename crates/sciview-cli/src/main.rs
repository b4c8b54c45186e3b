//! SciView CLI - Command-line interface for inspecting scientific data files
//!
//! This binary provides commands for running the Python readers against
//! HDF5/pickle/parquet/npy files and validating reader payloads.

use clap::{Parser, Subcommand};
use std::process::ExitCode;

use sciview_cli::commands;
use sciview_cli::commands::inspect::InspectArgs;
use sciview_result::FileFormat;

/// SciView - Scientific Data File Viewer
#[derive(Parser)]
#[command(name = "sciview")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the reader for a data file and print its payload
    Inspect {
        /// Path to the data file (HDF5, pickle, parquet, or npy)
        #[arg(short, long)]
        input: String,

        /// Format override; detected from the file extension when omitted
        #[arg(short, long)]
        format: Option<FileFormat>,

        /// Python interpreter to invoke
        #[arg(long)]
        python: Option<String>,

        /// Directory holding the reader scripts
        #[arg(long)]
        scripts_dir: Option<String>,

        /// Reader timeout in seconds (default: wait indefinitely)
        #[arg(long)]
        timeout: Option<u64>,

        /// Output machine-readable JSON (no colored output)
        #[arg(long)]
        json: bool,

        /// Pretty-print the JSON output
        #[arg(short, long)]
        pretty: bool,
    },

    /// Validate a reader payload file against the contract for a format
    Check {
        /// Path to a JSON payload file
        #[arg(long)]
        payload: String,

        /// Format whose contract the payload must satisfy
        #[arg(short, long)]
        format: FileFormat,

        /// Output machine-readable JSON (no colored output)
        #[arg(long)]
        json: bool,
    },

    /// List registered file formats, extensions, and reader scripts
    Formats {
        /// Output machine-readable JSON (no colored output)
        #[arg(long)]
        json: bool,
    },

    /// Check the Python interpreter, reader scripts, and packages
    Doctor,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Inspect {
            input,
            format,
            python,
            scripts_dir,
            timeout,
            json,
            pretty,
        } => commands::inspect::run(InspectArgs {
            input: &input,
            format,
            python: python.as_deref(),
            scripts_dir: scripts_dir.as_deref(),
            timeout_secs: timeout,
            json,
            pretty,
        }),
        Commands::Check {
            payload,
            format,
            json,
        } => commands::check::run(&payload, format, json),
        Commands::Formats { json } => commands::formats::run(json),
        Commands::Doctor => commands::doctor::run(),
    };

    match result {
        Ok(code) => code,
        Err(e) => {
            eprintln!("error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}
