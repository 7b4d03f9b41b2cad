//! Batch command implementation
//!
//! Reads every matching file of a directory, scanning and decoding each one,
//! and reports per-file status. One bad file does not stop the run.

use anyhow::{Context, Result};
use colored::Colorize;
use riffwav_reader::{DirectorySource, WavError};
use std::path::Path;
use std::process::ExitCode;

use super::json_output::{BatchItem, BatchOutput, JsonError};
use crate::input::load_wav_bytes;

/// Run the batch command
///
/// # Arguments
/// * `input_dir` - Directory to scan
/// * `extension` - File extension to match (case-insensitive)
/// * `recursive` - Whether to descend into subdirectories
/// * `json_output` - Whether to output machine-readable JSON
///
/// # Returns
/// Exit code: 0 if every file decoded, 1 otherwise
pub fn run(
    input_dir: &str,
    extension: &str,
    recursive: bool,
    json_output: bool,
) -> Result<ExitCode> {
    let output = collect(Path::new(input_dir), extension, recursive)?;

    if json_output {
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        print_human(input_dir, &output);
    }

    Ok(if output.success {
        ExitCode::SUCCESS
    } else {
        ExitCode::from(1)
    })
}

/// Reads every matching file under `dir`.
///
/// Fails only when the directory cannot be listed or holds no matching
/// files; per-file failures are recorded in the output.
pub fn collect(dir: &Path, extension: &str, recursive: bool) -> Result<BatchOutput> {
    let mut source = if recursive {
        DirectorySource::open_recursive(dir, extension)
    } else {
        DirectorySource::open(dir, extension)
    }
    .with_context(|| format!("Failed to list directory: {}", dir.display()))?;

    log::info!("batch over {} files in {}", source.len(), dir.display());

    let mut results = Vec::with_capacity(source.len());
    while let Some(path) = source.peek_path().map(Path::to_path_buf) {
        let item = match source.next_bytes() {
            Ok(Some((path, bytes))) => read_one(&path, bytes),
            Ok(None) => break,
            Err(err) => read_failure(&path, err),
        };
        results.push(item);
    }

    Ok(BatchOutput::new(results))
}

fn read_failure(path: &Path, err: WavError) -> BatchItem {
    let input = path.display().to_string();
    let err = anyhow::Error::new(err).context(format!("Failed to read file: {}", input));
    log::debug!("{}: {:#}", input, err);
    BatchItem::failure(input.clone(), JsonError::from_anyhow(&err).with_file(input))
}

fn read_one(path: &Path, bytes: Vec<u8>) -> BatchItem {
    let input = path.display().to_string();
    let decoded = load_wav_bytes(path, bytes).and_then(|mut loaded| {
        let frame_count = loaded.doc.decode_samples()?.frame_count();
        Ok((loaded, frame_count))
    });

    match decoded {
        Ok((loaded, frame_count)) => BatchItem::success(
            input,
            loaded.doc.format(),
            frame_count,
            loaded.doc.warnings().to_vec(),
        ),
        Err(err) => {
            log::debug!("{}: {:#}", input, err);
            BatchItem::failure(input.clone(), JsonError::from_anyhow(&err).with_file(input))
        }
    }
}

fn print_human(input_dir: &str, output: &BatchOutput) {
    println!("{} {}", "Batch:".cyan().bold(), input_dir);

    for item in &output.results {
        if let Some(error) = &item.error {
            println!("  {} {}", "FAIL".red().bold(), item.input);
            println!("       {} {}", error.code.dimmed(), error.message);
            continue;
        }

        let status = if item.warnings.is_empty() {
            "ok".green().bold()
        } else {
            "warn".yellow().bold()
        };
        let format = item.format.unwrap_or_default();
        println!(
            "  {:<4} {} ({} ch, {} Hz, {}-bit, {} frames)",
            status,
            item.input,
            format.channel_count,
            format.sample_rate,
            format.bits_per_sample,
            item.frame_count.unwrap_or(0)
        );
        for warning in &item.warnings {
            println!("       {} {}", warning.code().dimmed(), warning);
        }
    }

    let summary = &output.summary;
    let line = format!(
        "{} files: {} ok, {} failed, {} with warnings",
        summary.total, summary.succeeded, summary.failed, summary.with_warnings
    );
    if summary.failed == 0 {
        println!("\n{}", line.green());
    } else {
        println!("\n{}", line.red());
    }
}
