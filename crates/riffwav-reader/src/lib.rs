//! riffwav reader
//!
//! A lenient reader for RIFF/WAVE files holding uncompressed integer PCM.
//!
//! # Overview
//!
//! Reading happens in two explicit phases:
//!
//! 1. **Header scan** - walks the chunk structure, decoding the `fmt ` record
//!    and `LIST`/`INFO` text fields, and records where the `data` payload
//!    lives without reading it.
//! 2. **Sample decode** - reads the payload and produces one normalized `f64`
//!    sequence per channel.
//!
//! Slightly broken files are read as far as possible: chunk sizes that run
//! past the end of the stream are clamped, unknown chunks are skipped, and an
//! undersized `fmt ` chunk is ignored. Each repair is recorded as a
//! [`ScanWarning`] on the header scan. Structural problems (bad signature, no
//! `data` chunk, unsupported bit depth, zero block alignment) are errors.
//!
//! # Example
//!
//! ```rust,no_run
//! use riffwav_reader::WavDocument;
//!
//! let mut doc = WavDocument::open("input.wav")?;
//! doc.scan_header()?;
//! if let Some(artist) = doc.metadata().and_then(|m| m.artist()) {
//!     println!("by {}", artist);
//! }
//! let samples = doc.decode_samples()?;
//! for (ch, channel) in samples.iter().enumerate() {
//!     println!("channel {}: {} samples", ch, channel.len());
//! }
//! # Ok::<(), riffwav_reader::WavError>(())
//! ```
//!
//! # Crate Structure
//!
//! - [`cursor`] - Position-tracking seekable byte source
//! - [`chunk`] - RIFF chunk walker and header scan
//! - [`format`] - `fmt ` record decoding
//! - [`info`] - `LIST`/`INFO` metadata
//! - [`decode`] - PCM sample decoding
//! - [`document`] - Two-phase [`WavDocument`]
//! - [`source`] - Directory of files as a sequence of byte buffers

pub mod chunk;
pub mod cursor;
pub mod decode;
pub mod document;
pub mod error;
pub mod format;
pub mod info;
pub mod source;

// Re-export main types at crate root
pub use chunk::{ChunkHeader, DataSpan, FourCc, HeaderScan};
pub use cursor::ByteCursor;
pub use decode::{SampleBuffer, SampleDepth};
pub use document::{read_wav, read_wav_header, WavDocument};
pub use error::{ScanWarning, WavError, WavResult};
pub use format::{AudioFormat, FormatExtension, FormatTag};
pub use info::MetadataMap;
pub use source::DirectorySource;
