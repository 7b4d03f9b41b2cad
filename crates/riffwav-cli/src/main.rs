//! riffwav CLI - Command-line interface for RIFF/WAVE files
//!
//! This binary inspects WAV headers, decodes PCM samples and checks whole
//! directories of files.

use clap::{Parser, Subcommand};
use log::LevelFilter;
use std::process::ExitCode;

use riffwav_cli::commands;

/// riffwav - Lenient RIFF/WAVE reader
#[derive(Parser)]
#[command(name = "riffwav")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable debug logging (otherwise RUST_LOG applies, default: warn)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Scan a WAV header and report format, chunks and metadata
    Inspect {
        /// Path to the WAV file
        #[arg(short, long)]
        input: String,

        /// Output machine-readable JSON diagnostics (no colored output)
        #[arg(long)]
        json: bool,
    },

    /// Decode all samples and report per-channel statistics
    Decode {
        /// Path to the WAV file
        #[arg(short, long)]
        input: String,

        /// Output machine-readable JSON diagnostics (no colored output)
        #[arg(long)]
        json: bool,

        /// Number of leading frames to print
        #[arg(long, default_value_t = commands::decode::DEFAULT_PREVIEW_FRAMES)]
        frames: usize,
    },

    /// Read every WAV file in a directory and report per-file status
    Batch {
        /// Directory to scan
        #[arg(long)]
        input_dir: String,

        /// File extension to match (case-insensitive)
        #[arg(long, default_value = "wav")]
        extension: String,

        /// Descend into subdirectories
        #[arg(short, long)]
        recursive: bool,

        /// Output machine-readable JSON diagnostics (no colored output)
        #[arg(long)]
        json: bool,
    },
}

fn init_logging(verbose: bool) {
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"));
    if verbose {
        builder.filter_level(LevelFilter::Debug);
    }
    builder.init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match cli.command {
        Commands::Inspect { input, json } => commands::inspect::run(&input, json),
        Commands::Decode {
            input,
            json,
            frames,
        } => commands::decode::run(&input, json, frames),
        Commands::Batch {
            input_dir,
            extension,
            recursive,
            json,
        } => commands::batch::run(&input_dir, &extension, recursive, json),
    };

    match result {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{}: {:#}", colored::Colorize::red("error"), e);
            ExitCode::from(1)
        }
    }
}
