//! PCM sample decoding.
//!
//! Interleaved integer samples are turned into one `f64` sequence per
//! channel, normalized by the full-scale magnitude of their bit depth:
//!
//! | depth | stored as | divisor |
//! |---|---|---|
//! | 8 | unsigned, biased by 128 | 128 |
//! | 16 | signed little-endian | 32 768 |
//! | 24 | signed little-endian, 3 bytes | 8 388 608 |
//! | 32 | signed little-endian | 2 147 483 648 |
//!
//! Values land in `[-1.0, 1.0)`; nothing is clamped.

use std::io::{Read, Seek};

use byteorder::{ByteOrder, LittleEndian};

use crate::chunk::DataSpan;
use crate::cursor::ByteCursor;
use crate::error::{WavError, WavResult};
use crate::format::AudioFormat;


/// Per-sample decode strategy, one variant per supported bit depth.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SampleDepth {
    /// 8-bit unsigned.
    U8,
    /// 16-bit signed.
    S16,
    /// 24-bit signed, packed in three bytes.
    S24,
    /// 32-bit signed.
    S32,
}

impl SampleDepth {
    /// Bytes occupied by one sample.
    pub const fn bytes(self) -> usize {
        match self {
            SampleDepth::U8 => 1,
            SampleDepth::S16 => 2,
            SampleDepth::S24 => 3,
            SampleDepth::S32 => 4,
        }
    }

    pub const fn bits(self) -> u16 {
        (self.bytes() * 8) as u16
    }

    /// Full-scale magnitude used for normalization.
    pub const fn divisor(self) -> f64 {
        match self {
            SampleDepth::U8 => 128.0,
            SampleDepth::S16 => 32_768.0,
            SampleDepth::S24 => 8_388_608.0,
            SampleDepth::S32 => 2_147_483_648.0,
        }
    }

    /// Decodes one sample from the first [`bytes`](Self::bytes) bytes of `raw`.
    ///
    /// # Panics
    ///
    /// Panics if `raw` is shorter than one sample.
    #[inline]
    pub fn normalize(self, raw: &[u8]) -> f64 {
        let value = match self {
            SampleDepth::U8 => raw[0] as i32 - 128,
            SampleDepth::S16 => LittleEndian::read_i16(raw) as i32,
            // Sign-extended from bit 23.
            SampleDepth::S24 => LittleEndian::read_i24(raw),
            SampleDepth::S32 => LittleEndian::read_i32(raw),
        };
        value as f64 / self.divisor()
    }
}

impl TryFrom<u16> for SampleDepth {
    type Error = WavError;

    fn try_from(bits_per_sample: u16) -> Result<Self, Self::Error> {
        match bits_per_sample {
            8 => Ok(SampleDepth::U8),
            16 => Ok(SampleDepth::S16),
            24 => Ok(SampleDepth::S24),
            32 => Ok(SampleDepth::S32),
            _ => Err(WavError::UnsupportedFormat { bits_per_sample }),
        }
    }
}

/// Decoded samples, one sequence per channel.
///
/// All channels have the same length.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SampleBuffer {
    channels: Vec<Vec<f64>>,
}

impl SampleBuffer {
    /// Creates `channel_count` empty channels with room for `frames` samples.
    pub fn with_capacity(channel_count: usize, frames: usize) -> Self {
        Self {
            channels: (0..channel_count)
                .map(|_| Vec::with_capacity(frames))
                .collect(),
        }
    }

    pub fn channel_count(&self) -> usize {
        self.channels.len()
    }

    /// Samples per channel.
    pub fn frame_count(&self) -> usize {
        self.channels.first().map_or(0, Vec::len)
    }

    pub fn is_empty(&self) -> bool {
        self.frame_count() == 0
    }

    pub fn channel(&self, index: usize) -> Option<&[f64]> {
        self.channels.get(index).map(Vec::as_slice)
    }

    pub fn iter(&self) -> impl Iterator<Item = &[f64]> {
        self.channels.iter().map(Vec::as_slice)
    }

    /// One sample per channel at frame `index`.
    pub fn frame(&self, index: usize) -> Option<Vec<f64>> {
        if index >= self.frame_count() {
            return None;
        }
        Some(self.channels.iter().map(|c| c[index]).collect())
    }

    /// Largest absolute sample value of one channel; 0.0 if it is empty.
    pub fn channel_peak(&self, index: usize) -> Option<f64> {
        self.channel(index)
            .map(|samples| samples.iter().fold(0.0f64, |peak, s| peak.max(s.abs())))
    }

    /// Largest absolute sample value across all channels.
    pub fn peak(&self) -> f64 {
        (0..self.channel_count())
            .filter_map(|ch| self.channel_peak(ch))
            .fold(0.0f64, f64::max)
    }

    pub fn into_channels(self) -> Vec<Vec<f64>> {
        self.channels
    }
}

/// Number of whole frames in `span` for `format`; 0 if `block_align` is 0.
pub fn frame_count(span: &DataSpan, format: &AudioFormat) -> u64 {
    if format.block_align == 0 {
        0
    } else {
        span.len / format.block_align as u64
    }
}

/// Decodes the sample payload at `span`.
///
/// Reads `frame_count * block_align` bytes; a trailing partial frame is
/// ignored. Inside each frame, channel `ch` starts at `ch * sample_bytes`.
/// A `block_align` too small to hold every declared channel is a
/// [`WavError::Format`] at the start of the span.
pub fn decode_samples<R: Read + Seek>(
    cursor: &mut ByteCursor<R>,
    span: &DataSpan,
    format: &AudioFormat,
) -> WavResult<SampleBuffer> {
    let depth = format.check_decodable()?;
    let block_align = format.block_align as usize;
    let channel_count = format.channel_count as usize;

    let fitting = block_align / depth.bytes();
    if fitting < channel_count {
        return Err(WavError::format_at(
            format!(
                "block align {} holds {} of {} {}-bit channels",
                block_align,
                fitting,
                channel_count,
                depth.bits()
            ),
            span.offset,
        ));
    }

    cursor.seek_to(span.offset)?;
    let available = span.len.min(cursor.remaining());
    let frames = (available / block_align as u64) as usize;

    log::debug!(
        "decoding {} frames of {} x {}-bit from offset {}",
        frames,
        channel_count,
        depth.bits(),
        span.offset
    );

    let payload = cursor.read_exact_vec(frames * block_align)?;

    let mut buffer = SampleBuffer::with_capacity(channel_count, frames);
    for frame in payload.chunks_exact(block_align) {
        for (ch, samples) in buffer.channels.iter_mut().enumerate() {
            let start = ch * depth.bytes();
            samples.push(depth.normalize(&frame[start..start + depth.bytes()]));
        }
    }

    Ok(buffer)
}
