//! JSON output types for machine-readable CLI output.
//!
//! Every command's `--json` flag prints exactly one of these records to
//! stdout, pretty-printed.

use riffwav_reader::{
    AudioFormat, ChunkHeader, DataSpan, FormatExtension, MetadataMap, ScanWarning, WavError,
};
use serde::Serialize;

/// Error codes for CLI operations.
///
/// Reader failures pass through the reader's own `WAV_XXX` codes.
pub mod error_codes {
    /// File could not be read
    pub const FILE_READ: &str = "CLI_001";
    /// Any other failure
    pub const INTERNAL: &str = "CLI_002";
}

/// A structured error in JSON output.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct JsonError {
    /// Stable error code (e.g., "CLI_001", "WAV_001")
    pub code: String,
    /// Human-readable error message
    pub message: String,
    /// Source file path (if applicable)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,
    /// Byte offset of the problem (if known)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offset: Option<u64>,
}

impl JsonError {
    /// Creates a new error with code and message.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            file: None,
            offset: None,
        }
    }

    /// Sets the file path for this error.
    pub fn with_file(mut self, file: impl Into<String>) -> Self {
        self.file = Some(file.into());
        self
    }

    /// Maps a command error, keeping the reader's code and offset when the
    /// chain carries a [`WavError`].
    pub fn from_anyhow(err: &anyhow::Error) -> Self {
        let message = format!("{:#}", err);
        match err.downcast_ref::<WavError>() {
            Some(wav) => {
                let offset = match wav {
                    WavError::Format { offset, .. } => *offset,
                    _ => None,
                };
                Self {
                    offset,
                    ..Self::new(wav.code(), message)
                }
            }
            None if err.downcast_ref::<std::io::Error>().is_some() => {
                Self::new(error_codes::FILE_READ, message)
            }
            None => Self::new(error_codes::INTERNAL, message),
        }
    }
}

/// JSON output for the `inspect` command.
#[derive(Debug, Clone, Serialize)]
pub struct InspectOutput {
    /// Whether the header scan succeeded
    pub success: bool,
    /// Errors encountered
    pub errors: Vec<JsonError>,
    /// Scan result (on success)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<InspectResult>,
}

impl InspectOutput {
    pub fn success(result: InspectResult) -> Self {
        Self {
            success: true,
            errors: Vec::new(),
            result: Some(result),
        }
    }

    pub fn failure(errors: Vec<JsonError>) -> Self {
        Self {
            success: false,
            errors,
            result: None,
        }
    }
}

/// Header scan details.
#[derive(Debug, Clone, Serialize)]
pub struct InspectResult {
    /// Input file path
    pub input: String,
    /// BLAKE3 hash of the input file
    pub input_hash: String,
    /// File size in bytes
    pub source_len: u64,
    /// Format tag name (PCM, EXTENSIBLE, ...)
    pub format_tag: String,
    pub format: AudioFormat,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extension: Option<FormatExtension>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_span: Option<DataSpan>,
    /// Whole frames in the data span
    pub frame_count: u64,
    pub duration_secs: f64,
    /// `LIST`/`INFO` fields in file order
    pub metadata: MetadataMap,
    /// Chunks visited, in file order
    pub chunks: Vec<ChunkHeader>,
    /// Problems the reader recovered from
    pub warnings: Vec<ScanWarning>,
}

/// JSON output for the `decode` command.
#[derive(Debug, Clone, Serialize)]
pub struct DecodeOutput {
    /// Whether decoding succeeded
    pub success: bool,
    /// Errors encountered
    pub errors: Vec<JsonError>,
    /// Decode result (on success)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<DecodeResult>,
}

impl DecodeOutput {
    pub fn success(result: DecodeResult) -> Self {
        Self {
            success: true,
            errors: Vec::new(),
            result: Some(result),
        }
    }

    pub fn failure(errors: Vec<JsonError>) -> Self {
        Self {
            success: false,
            errors,
            result: None,
        }
    }
}

/// Sample decode details.
#[derive(Debug, Clone, Serialize)]
pub struct DecodeResult {
    /// Input file path
    pub input: String,
    pub format: AudioFormat,
    pub frame_count: usize,
    pub duration_secs: f64,
    /// BLAKE3 hash of the raw data span
    pub data_hash: String,
    /// Largest absolute sample value across all channels
    pub peak: f64,
    /// Per-channel statistics
    pub channels: Vec<ChannelStats>,
    /// Leading frames, one value per channel each
    pub frames: Vec<Vec<f64>>,
    /// Problems the reader recovered from
    pub warnings: Vec<ScanWarning>,
}

/// Statistics over one decoded channel.
#[derive(Debug, Clone, Copy, Serialize, PartialEq)]
pub struct ChannelStats {
    pub index: usize,
    /// Largest absolute sample value
    pub peak: f64,
    /// Root mean square
    pub rms: f64,
}

/// One file of a batch run.
#[derive(Debug, Clone, Serialize)]
pub struct BatchItem {
    /// Input file path
    pub input: String,
    /// Whether scan and decode succeeded
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<AudioFormat>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub frame_count: Option<usize>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<ScanWarning>,
    /// Error information (if failed)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<JsonError>,
}

impl BatchItem {
    pub fn success(
        input: String,
        format: AudioFormat,
        frame_count: usize,
        warnings: Vec<ScanWarning>,
    ) -> Self {
        Self {
            input,
            success: true,
            format: Some(format),
            frame_count: Some(frame_count),
            warnings,
            error: None,
        }
    }

    pub fn failure(input: String, error: JsonError) -> Self {
        Self {
            input,
            success: false,
            format: None,
            frame_count: None,
            warnings: Vec::new(),
            error: Some(error),
        }
    }
}

/// Summary statistics for a batch run.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct BatchSummary {
    /// Total number of files processed
    pub total: usize,
    /// Number of files read cleanly
    pub succeeded: usize,
    /// Number of failed files
    pub failed: usize,
    /// Number of successful files that carried warnings
    pub with_warnings: usize,
}

/// JSON output for the `batch` command.
#[derive(Debug, Clone, Serialize)]
pub struct BatchOutput {
    /// Whether every file succeeded
    pub success: bool,
    /// Individual file results
    pub results: Vec<BatchItem>,
    /// Summary statistics
    pub summary: BatchSummary,
}

impl BatchOutput {
    /// Creates a new batch output from results.
    pub fn new(results: Vec<BatchItem>) -> Self {
        let total = results.len();
        let succeeded = results.iter().filter(|r| r.success).count();
        let with_warnings = results
            .iter()
            .filter(|r| r.success && !r.warnings.is_empty())
            .count();

        Self {
            success: succeeded == total,
            results,
            summary: BatchSummary {
                total,
                succeeded,
                failed: total - succeeded,
                with_warnings,
            },
        }
    }
}
