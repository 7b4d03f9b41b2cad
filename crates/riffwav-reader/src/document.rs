//! Two-phase WAV reading: header scan, then sample decode.

use std::fs::File;
use std::io::{BufReader, Cursor, Read, Seek};
use std::path::Path;

use crate::chunk::{walk, ChunkHeader, DataSpan, HeaderScan};
use crate::cursor::ByteCursor;
use crate::decode::{self, SampleBuffer};
use crate::error::{ScanWarning, WavError, WavResult};
use crate::format::{AudioFormat, FormatExtension};
use crate::info::MetadataMap;

/// A WAV stream and whatever has been read from it so far.
///
/// The document starts empty. [`scan_header`](Self::scan_header) fills in the
/// format, metadata and data location; [`decode_samples`](Self::decode_samples)
/// then materializes the samples. The header scan alone is cheap, so callers
/// that only need format or metadata can stop there.
///
/// # Example
///
/// ```rust,no_run
/// use riffwav_reader::WavDocument;
///
/// let mut doc = WavDocument::open("speech.wav")?;
/// doc.scan_header()?;
/// println!("{}", doc.format());
/// let samples = doc.decode_samples()?;
/// println!("{} frames", samples.frame_count());
/// # Ok::<(), riffwav_reader::WavError>(())
/// ```
#[derive(Debug)]
pub struct WavDocument<R> {
    cursor: ByteCursor<R>,
    header: Option<HeaderScan>,
    samples: Option<SampleBuffer>,
}

impl WavDocument<BufReader<File>> {
    /// Opens a file for reading.
    pub fn open(path: impl AsRef<Path>) -> WavResult<Self> {
        let file = File::open(path)?;
        Self::new(BufReader::new(file))
    }
}

impl WavDocument<Cursor<Vec<u8>>> {
    /// Reads from an in-memory buffer.
    pub fn from_bytes(bytes: Vec<u8>) -> WavResult<Self> {
        Self::new(Cursor::new(bytes))
    }
}

impl<R: Read + Seek> WavDocument<R> {
    /// Wraps a seekable source. Nothing is parsed yet.
    pub fn new(source: R) -> WavResult<Self> {
        Ok(Self {
            cursor: ByteCursor::new(source)?,
            header: None,
            samples: None,
        })
    }

    /// Walks the chunk structure from the start of the source.
    ///
    /// Fails with [`WavError::Format`] on a bad `RIFF`/`WAVE` signature or
    /// when no `data` chunk is found. Running it again replaces earlier
    /// results and discards decoded samples.
    pub fn scan_header(&mut self) -> WavResult<&HeaderScan> {
        self.header = None;
        self.samples = None;

        self.cursor.seek_to(0)?;
        let scan = walk(&mut self.cursor)?;
        if scan.data_span.is_none() {
            return Err(WavError::format("no data chunk found"));
        }

        log::debug!(
            "header scan complete: {}, {} metadata keys, {} warnings",
            scan.format,
            scan.metadata.len(),
            scan.warnings.len()
        );
        Ok(self.header.insert(scan))
    }

    /// Decodes the sample payload located by the header scan.
    ///
    /// Samples from an earlier decode are dropped first, so a failed decode
    /// leaves [`samples`](Self::samples) empty.
    ///
    /// Fails with [`WavError::HeaderNotScanned`] if no scan has succeeded,
    /// [`WavError::UnsupportedFormat`] for bit depths other than 8, 16, 24
    /// or 32, and [`WavError::Format`] if the block alignment is zero or too
    /// small to hold one sample per channel.
    pub fn decode_samples(&mut self) -> WavResult<&SampleBuffer> {
        self.samples = None;
        let header = self.header.as_ref().ok_or(WavError::HeaderNotScanned)?;
        let span = header.data_span.ok_or(WavError::HeaderNotScanned)?;
        let samples = decode::decode_samples(&mut self.cursor, &span, &header.format)?;
        Ok(self.samples.insert(samples))
    }

    /// Result of the last successful header scan.
    pub fn header(&self) -> Option<&HeaderScan> {
        self.header.as_ref()
    }

    /// Audio format; all zeros before a scan or if no usable `fmt ` was seen.
    pub fn format(&self) -> AudioFormat {
        self.header.as_ref().map(|h| h.format).unwrap_or_default()
    }

    pub fn extension(&self) -> Option<&FormatExtension> {
        self.header.as_ref().and_then(|h| h.extension.as_ref())
    }

    pub fn metadata(&self) -> Option<&MetadataMap> {
        self.header.as_ref().map(|h| &h.metadata)
    }

    pub fn data_span(&self) -> Option<DataSpan> {
        self.header.as_ref().and_then(|h| h.data_span)
    }

    pub fn chunks(&self) -> &[ChunkHeader] {
        self.header
            .as_ref()
            .map(|h| h.chunks.as_slice())
            .unwrap_or_default()
    }

    pub fn warnings(&self) -> &[ScanWarning] {
        self.header
            .as_ref()
            .map(|h| h.warnings.as_slice())
            .unwrap_or_default()
    }

    /// Decoded samples, if [`decode_samples`](Self::decode_samples) has run.
    pub fn samples(&self) -> Option<&SampleBuffer> {
        self.samples.as_ref()
    }

    /// Whole frames in the data span (`data_size / block_align`).
    pub fn frame_count(&self) -> u64 {
        match &self.header {
            Some(HeaderScan {
                data_span: Some(span),
                format,
                ..
            }) => decode::frame_count(span, format),
            _ => 0,
        }
    }

    pub fn duration_secs(&self) -> f64 {
        self.format().duration_secs(self.frame_count())
    }

    /// Total length of the underlying source.
    pub fn source_len(&self) -> u64 {
        self.cursor.len()
    }

    /// Reads the raw, undecoded bytes of the data span.
    pub fn read_data_bytes(&mut self) -> WavResult<Vec<u8>> {
        let span = self.data_span().ok_or(WavError::HeaderNotScanned)?;
        self.cursor.seek_to(span.offset)?;
        let len = span.len.min(self.cursor.remaining()) as usize;
        self.cursor.read_exact_vec(len)
    }

    /// Splits the document into its parts, dropping the source.
    pub fn into_parts(self) -> (Option<HeaderScan>, Option<SampleBuffer>) {
        (self.header, self.samples)
    }

    /// Gives back the wrapped source.
    pub fn into_inner(self) -> R {
        self.cursor.into_inner()
    }
}

/// Scans the header and decodes all samples.
pub fn read_wav<R: Read + Seek>(source: R) -> WavResult<WavDocument<R>> {
    let mut doc = WavDocument::new(source)?;
    doc.scan_header()?;
    doc.decode_samples()?;
    Ok(doc)
}

/// Scans the header only.
pub fn read_wav_header<R: Read + Seek>(source: R) -> WavResult<WavDocument<R>> {
    let mut doc = WavDocument::new(source)?;
    doc.scan_header()?;
    Ok(doc)
}
