//! Inspect command implementation
//!
//! Scans a WAV file's header without decoding samples and reports the
//! format record, chunk layout, INFO metadata and any recovered problems.

use anyhow::Result;
use colored::Colorize;
use std::path::Path;
use std::process::ExitCode;

use super::json_output::{InspectOutput, InspectResult, JsonError};
use crate::input::{load_wav, LoadedWav};

/// Run the inspect command
///
/// # Arguments
/// * `input` - Path to the WAV file
/// * `json_output` - Whether to output machine-readable JSON
///
/// # Returns
/// Exit code: 0 success, 1 error
pub fn run(input: &str, json_output: bool) -> Result<ExitCode> {
    if json_output {
        run_json(input)
    } else {
        run_human(input)
    }
}

/// Scans `path` and collects the header details.
pub fn inspect_file(path: &Path) -> Result<InspectResult> {
    let LoadedWav {
        input,
        input_hash,
        doc,
    } = load_wav(path)?;

    let format = doc.format();
    Ok(InspectResult {
        input,
        input_hash,
        source_len: doc.source_len(),
        format_tag: format.tag().to_string(),
        format,
        extension: doc.extension().copied(),
        data_span: doc.data_span(),
        frame_count: doc.frame_count(),
        duration_secs: doc.duration_secs(),
        metadata: doc.metadata().cloned().unwrap_or_default(),
        chunks: doc.chunks().to_vec(),
        warnings: doc.warnings().to_vec(),
    })
}

fn run_human(input: &str) -> Result<ExitCode> {
    println!("{} {}", "Inspecting:".cyan().bold(), input);
    let result = inspect_file(Path::new(input))?;
    let format = &result.format;

    println!("{} {}", "Hash:".dimmed(), &result.input_hash[..16]);
    println!("{} {} bytes", "Size:".dimmed(), result.source_len);

    println!("\n{}", "Format:".cyan().bold());
    println!("  {:<16} {}", "tag", result.format_tag);
    println!("  {:<16} {}", "channels", format.channel_count);
    println!("  {:<16} {} Hz", "sample rate", format.sample_rate);
    println!("  {:<16} {}", "bits per sample", format.bits_per_sample);
    println!("  {:<16} {}", "block align", format.block_align);
    println!("  {:<16} {}", "byte rate", format.avg_bytes_per_sec);
    if let Some(ext) = &result.extension {
        println!("  {:<16} {}", "valid bits", ext.valid_bits_per_sample);
        println!("  {:<16} 0x{:08X}", "channel mask", ext.channel_mask);
        println!("  {:<16} {}", "sub-format", ext.sub_format_tag());
    }
    println!(
        "  {:<16} {} ({:.3} s)",
        "frames", result.frame_count, result.duration_secs
    );

    println!("\n{}", "Chunks:".cyan().bold());
    for chunk in &result.chunks {
        let size = if chunk.size == chunk.declared_size as u64 {
            format!("{} bytes", chunk.size)
        } else {
            format!("{} of {} bytes", chunk.size, chunk.declared_size)
                .yellow()
                .to_string()
        };
        println!("  {:<6} @{:<10} {}", format!("'{}'", chunk.id), chunk.offset, size);
    }

    if !result.metadata.is_empty() {
        println!("\n{}", "Metadata:".cyan().bold());
        for (key, values) in result.metadata.iter() {
            for value in values {
                println!("  {:<6} {}", key, value);
            }
        }
    }

    if result.warnings.is_empty() {
        println!("\n{}", "Header is clean".green().bold());
    } else {
        println!("\n{}", "Warnings:".yellow().bold());
        for warning in &result.warnings {
            println!("  {} {}", warning.code().yellow(), warning);
        }
    }

    Ok(ExitCode::SUCCESS)
}

fn run_json(input: &str) -> Result<ExitCode> {
    let (output, code) = match inspect_file(Path::new(input)) {
        Ok(result) => (InspectOutput::success(result), ExitCode::SUCCESS),
        Err(err) => {
            let error = JsonError::from_anyhow(&err).with_file(input);
            (InspectOutput::failure(vec![error]), ExitCode::from(1))
        }
    };
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(code)
}
