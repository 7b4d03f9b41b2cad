//! Decode command implementation
//!
//! Fully decodes a WAV file and reports per-channel peak and RMS, the first
//! few frames, and a BLAKE3 hash of the raw sample payload.

use anyhow::Result;
use colored::Colorize;
use riffwav_reader::SampleBuffer;
use std::path::Path;
use std::process::ExitCode;

use super::json_output::{ChannelStats, DecodeOutput, DecodeResult, JsonError};
use crate::input::{load_wav, LoadedWav};

/// Frames shown when `--frames` is not given.
pub const DEFAULT_PREVIEW_FRAMES: usize = 8;

/// Run the decode command
///
/// # Arguments
/// * `input` - Path to the WAV file
/// * `json_output` - Whether to output machine-readable JSON
/// * `preview_frames` - Number of leading frames to print
///
/// # Returns
/// Exit code: 0 success, 1 error
pub fn run(input: &str, json_output: bool, preview_frames: usize) -> Result<ExitCode> {
    if json_output {
        run_json(input, preview_frames)
    } else {
        run_human(input, preview_frames)
    }
}

/// Decodes `path` and collects statistics.
pub fn decode_file(path: &Path, preview_frames: usize) -> Result<DecodeResult> {
    let LoadedWav { input, mut doc, .. } = load_wav(path)?;

    let data = doc.read_data_bytes()?;
    let data_hash = blake3::hash(&data).to_hex().to_string();
    let samples = doc.decode_samples()?;

    let frames = (0..samples.frame_count().min(preview_frames))
        .filter_map(|i| samples.frame(i))
        .collect();
    let channels = channel_stats(samples);
    let peak = samples.peak();
    let frame_count = samples.frame_count();

    Ok(DecodeResult {
        input,
        format: doc.format(),
        frame_count,
        duration_secs: doc.duration_secs(),
        data_hash,
        peak,
        channels,
        frames,
        warnings: doc.warnings().to_vec(),
    })
}

/// Peak and RMS for every channel; zero for empty channels.
pub fn channel_stats(samples: &SampleBuffer) -> Vec<ChannelStats> {
    samples
        .iter()
        .enumerate()
        .map(|(index, channel)| {
            let peak = samples.channel_peak(index).unwrap_or(0.0);
            let rms = if channel.is_empty() {
                0.0
            } else {
                (channel.iter().map(|s| s * s).sum::<f64>() / channel.len() as f64).sqrt()
            };
            ChannelStats { index, peak, rms }
        })
        .collect()
}

fn run_human(input: &str, preview_frames: usize) -> Result<ExitCode> {
    println!("{} {}", "Decoding:".cyan().bold(), input);
    let result = decode_file(Path::new(input), preview_frames)?;

    println!("{} {}", "Format:".dimmed(), result.format);
    println!(
        "{} {} ({:.3} s)",
        "Frames:".dimmed(),
        result.frame_count,
        result.duration_secs
    );
    println!("{} {}", "Data hash:".dimmed(), &result.data_hash[..16]);
    println!("{} {:.6}", "Peak:".dimmed(), result.peak);

    println!("\n{}", "Channels:".cyan().bold());
    for stats in &result.channels {
        let peak = if stats.peak >= 1.0 {
            format!("{:.6}", stats.peak).red().to_string()
        } else {
            format!("{:.6}", stats.peak)
        };
        println!("  [{}] peak {}  rms {:.6}", stats.index, peak, stats.rms);
    }

    if !result.frames.is_empty() {
        println!("\n{}", "First frames:".cyan().bold());
        for (i, frame) in result.frames.iter().enumerate() {
            let values: Vec<String> = frame.iter().map(|s| format!("{:+.6}", s)).collect();
            println!("  {:>6}  {}", i, values.join("  "));
        }
    }

    for warning in &result.warnings {
        println!("{} {} {}", "warning:".yellow(), warning.code(), warning);
    }

    Ok(ExitCode::SUCCESS)
}

fn run_json(input: &str, preview_frames: usize) -> Result<ExitCode> {
    let (output, code) = match decode_file(Path::new(input), preview_frames) {
        Ok(result) => (DecodeOutput::success(result), ExitCode::SUCCESS),
        Err(err) => {
            let error = JsonError::from_anyhow(&err).with_file(input);
            (DecodeOutput::failure(vec![error]), ExitCode::from(1))
        }
    };
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(code)
}
