//! Error and warning types for the WAV reader.

use std::fmt;
use std::path::PathBuf;

use serde::Serialize;
use thiserror::Error;

/// Result type for reader operations.
pub type WavResult<T> = Result<T, WavError>;

/// Errors that abort the current parse.
#[derive(Debug, Error)]
pub enum WavError {
    /// Structural problem with the container (bad signature, missing data
    /// chunk, zero block alignment).
    #[error("invalid WAV container: {message}")]
    Format {
        /// What went wrong.
        message: String,
        /// Byte offset of the offending structure, if known.
        offset: Option<u64>,
    },

    /// Bit depth without a decode path.
    #[error("unsupported bits per sample: {bits_per_sample} (only 8, 16, 24, 32 supported)")]
    UnsupportedFormat {
        /// The declared bit depth.
        bits_per_sample: u16,
    },

    /// `decode_samples` was called before a successful `scan_header`.
    #[error("sample decode requested before a successful header scan")]
    HeaderNotScanned,

    /// A directory source found nothing to read.
    #[error("no '.{extension}' files found in {}", dir.display())]
    NoMatchingFiles {
        /// Directory that was listed.
        dir: PathBuf,
        /// Extension filter that was applied.
        extension: String,
    },

    /// Underlying I/O failure.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl WavError {
    /// Creates a format error without position information.
    pub fn format(message: impl Into<String>) -> Self {
        Self::Format {
            message: message.into(),
            offset: None,
        }
    }

    /// Creates a format error located at `offset`.
    pub fn format_at(message: impl Into<String>, offset: u64) -> Self {
        Self::Format {
            message: message.into(),
            offset: Some(offset),
        }
    }

    /// Stable code for machine-readable output.
    pub fn code(&self) -> &'static str {
        match self {
            WavError::Format { .. } => "WAV_001",
            WavError::UnsupportedFormat { .. } => "WAV_002",
            WavError::HeaderNotScanned => "WAV_003",
            WavError::NoMatchingFiles { .. } => "WAV_004",
            WavError::Io(_) => "WAV_005",
        }
    }

    /// True for errors that describe the input rather than the environment.
    pub fn is_structural(&self) -> bool {
        matches!(
            self,
            WavError::Format { .. } | WavError::UnsupportedFormat { .. }
        )
    }
}

/// Conditions the reader recovered from locally.
///
/// These never fail a parse; they are collected on the header scan so
/// callers can tell a clean file from a repaired one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScanWarning {
    /// W001: a chunk declared more bytes than the stream holds.
    TruncatedChunk {
        /// Chunk identifier bytes.
        id: [u8; 4],
        /// Size from the chunk header.
        declared: u32,
        /// Bytes actually available.
        available: u64,
    },
    /// W002: a `fmt ` chunk too small for the format record was ignored.
    UndersizedFormat {
        /// Clamped chunk size.
        size: u64,
    },
    /// W003: the RIFF size field disagrees with the stream length.
    RiffSizeMismatch {
        /// Size from the RIFF header (excluding the 8-byte preamble).
        declared: u32,
        /// Bytes present after the preamble.
        actual: u64,
    },
}

impl ScanWarning {
    /// Returns the warning code string (e.g., "W001").
    pub fn code(&self) -> &'static str {
        match self {
            ScanWarning::TruncatedChunk { .. } => "W001",
            ScanWarning::UndersizedFormat { .. } => "W002",
            ScanWarning::RiffSizeMismatch { .. } => "W003",
        }
    }
}

impl fmt::Display for ScanWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScanWarning::TruncatedChunk {
                id,
                declared,
                available,
            } => write!(
                f,
                "chunk '{}' declares {} bytes but only {} remain; clamped",
                String::from_utf8_lossy(id),
                declared,
                available
            ),
            ScanWarning::UndersizedFormat { size } => {
                write!(f, "fmt chunk of {} bytes is too small; ignored", size)
            }
            ScanWarning::RiffSizeMismatch { declared, actual } => write!(
                f,
                "RIFF header declares {} bytes but {} are present",
                declared, actual
            ),
        }
    }
}

impl Serialize for ScanWarning {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeStruct;

        let mut state = serializer.serialize_struct("ScanWarning", 2)?;
        state.serialize_field("code", self.code())?;
        state.serialize_field("message", &self.to_string())?;
        state.end()
    }
}
