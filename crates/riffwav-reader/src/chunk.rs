//! RIFF chunk traversal.
//!
//! The walker reads the 12-byte `RIFF`/`WAVE` preamble and then visits
//! top-level chunks one by one, dispatching `fmt `, `LIST` and `data` and
//! skipping everything else. Declared chunk sizes are clamped to the bytes
//! that physically remain, so a truncated file still yields whatever header
//! information precedes the cut.

use std::fmt;
use std::io::{Read, Seek};

use serde::Serialize;

use crate::cursor::ByteCursor;
use crate::error::{ScanWarning, WavError, WavResult};
use crate::format::{
    parse_extension, parse_format, AudioFormat, FormatExtension, EXTENSIBLE_RECORD_LEN,
    FORMAT_RECORD_LEN,
};
use crate::info::{parse_info, MetadataMap};

/// Four-character chunk identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct FourCc(pub [u8; 4]);

impl FourCc {
    pub const RIFF: FourCc = FourCc(*b"RIFF");
    pub const WAVE: FourCc = FourCc(*b"WAVE");
    pub const FMT: FourCc = FourCc(*b"fmt ");
    pub const LIST: FourCc = FourCc(*b"LIST");
    pub const INFO: FourCc = FourCc(*b"INFO");
    pub const DATA: FourCc = FourCc(*b"data");

    #[inline]
    pub const fn as_bytes(&self) -> &[u8; 4] {
        &self.0
    }

    /// The identifier as text, if it is valid UTF-8.
    pub fn as_str(&self) -> Option<&str> {
        std::str::from_utf8(&self.0).ok()
    }
}

impl fmt::Display for FourCc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.as_str() {
            Some(s) => write!(f, "{}", s),
            None => write!(
                f,
                "0x{:02X}{:02X}{:02X}{:02X}",
                self.0[0], self.0[1], self.0[2], self.0[3]
            ),
        }
    }
}

impl Serialize for FourCc {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Header of one visited chunk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ChunkHeader {
    /// Chunk identifier.
    pub id: FourCc,
    /// Offset of the first payload byte.
    pub offset: u64,
    /// Size from the chunk header.
    pub declared_size: u32,
    /// Payload size after clamping to the end of the stream.
    pub size: u64,
}

impl ChunkHeader {
    /// Offset one past the last (clamped) payload byte.
    #[inline]
    pub fn end(&self) -> u64 {
        self.offset + self.size
    }

    /// True if the declared size overran the stream.
    #[inline]
    pub fn is_truncated(&self) -> bool {
        self.size < self.declared_size as u64
    }
}

/// Location of the undecoded sample payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DataSpan {
    /// Offset of the first sample byte.
    pub offset: u64,
    /// Payload length in bytes, already clamped.
    pub len: u64,
}

/// Everything learned from the header scan.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HeaderScan {
    /// Format record; all zeros if no usable `fmt ` chunk was seen.
    pub format: AudioFormat,
    /// Extensible tail of the format record, if present.
    pub extension: Option<FormatExtension>,
    /// `LIST`/`INFO` fields.
    pub metadata: MetadataMap,
    /// Sample payload location, if a `data` chunk was reached.
    pub data_span: Option<DataSpan>,
    /// Every chunk visited, in stream order.
    pub chunks: Vec<ChunkHeader>,
    /// Recovered problems.
    pub warnings: Vec<ScanWarning>,
}

impl HeaderScan {
    fn warn(&mut self, warning: ScanWarning) {
        log::warn!("{}: {}", warning.code(), warning);
        self.warnings.push(warning);
    }
}

/// Reads and checks the `RIFF` size `WAVE` preamble.
///
/// Returns the RIFF size field.
pub fn read_riff_header<R: Read + Seek>(cursor: &mut ByteCursor<R>) -> WavResult<u32> {
    if cursor.remaining() < 12 {
        return Err(WavError::format_at(
            format!(
                "stream too short for RIFF header: {} bytes",
                cursor.remaining()
            ),
            cursor.position(),
        ));
    }

    let start = cursor.position();
    let mut riff = [0u8; 4];
    cursor.read_into(&mut riff)?;
    let size = cursor.read_u32_le()?;
    let mut form = [0u8; 4];
    cursor.read_into(&mut form)?;

    if FourCc(riff) != FourCc::RIFF {
        return Err(WavError::format_at(
            format!("expected 'RIFF', found {}", FourCc(riff)),
            start,
        ));
    }
    if FourCc(form) != FourCc::WAVE {
        return Err(WavError::format_at(
            format!("expected 'WAVE', found {}", FourCc(form)),
            start + 8,
        ));
    }

    Ok(size)
}

/// Reads the next chunk header.
///
/// Returns `None` once fewer than a full identifier and size remain. The
/// cursor is left on the first payload byte.
pub fn next_chunk<R: Read + Seek>(
    cursor: &mut ByteCursor<R>,
) -> WavResult<Option<ChunkHeader>> {
    let Some(id) = cursor.read_fourcc()? else {
        return Ok(None);
    };
    if cursor.remaining() < 4 {
        cursor.seek_to(cursor.len())?;
        return Ok(None);
    }

    let declared_size = cursor.read_u32_le()?;
    let offset = cursor.position();
    let size = (declared_size as u64).min(cursor.remaining());

    Ok(Some(ChunkHeader {
        id,
        offset,
        declared_size,
        size,
    }))
}

/// Runs the full header scan from the cursor's current position.
///
/// Stops at the first `data` chunk. A missing `data` chunk is not an error
/// here; the caller decides whether that is fatal.
pub fn walk<R: Read + Seek>(cursor: &mut ByteCursor<R>) -> WavResult<HeaderScan> {
    let mut scan = HeaderScan::default();

    let riff_size = read_riff_header(cursor)?;
    let after_preamble = cursor.len().saturating_sub(8);
    if riff_size as u64 > after_preamble {
        scan.warn(ScanWarning::RiffSizeMismatch {
            declared: riff_size,
            actual: after_preamble,
        });
    }

    while let Some(header) = next_chunk(cursor)? {
        log::debug!(
            "chunk '{}' at {} ({} of {} bytes)",
            header.id,
            header.offset,
            header.size,
            header.declared_size
        );
        scan.chunks.push(header);
        if header.is_truncated() {
            scan.warn(ScanWarning::TruncatedChunk {
                id: header.id.0,
                declared: header.declared_size,
                available: header.size,
            });
        }

        match header.id {
            FourCc::FMT => {
                read_format_chunk(cursor, &header, &mut scan)?;
                cursor.seek_to(header.end())?;
            }
            FourCc::LIST => {
                if header.size >= 4 && cursor.read_fourcc()? == Some(FourCc::INFO) {
                    parse_info(cursor, header.end(), &mut scan.metadata)?;
                }
                cursor.seek_to(header.end())?;
            }
            FourCc::DATA => {
                scan.data_span = Some(DataSpan {
                    offset: header.offset,
                    len: header.size,
                });
                break;
            }
            _ => cursor.seek_to(header.end())?,
        }
    }

    Ok(scan)
}

fn read_format_chunk<R: Read + Seek>(
    cursor: &mut ByteCursor<R>,
    header: &ChunkHeader,
    scan: &mut HeaderScan,
) -> WavResult<()> {
    if header.size < FORMAT_RECORD_LEN as u64 {
        scan.warn(ScanWarning::UndersizedFormat { size: header.size });
        return Ok(());
    }

    let record_len = header.size.min(EXTENSIBLE_RECORD_LEN as u64) as usize;
    let record = cursor.read_exact_vec(record_len)?;
    if let Some(format) = parse_format(&record) {
        scan.format = format;
        scan.extension = parse_extension(&record);
    }
    Ok(())
}
