//! The `fmt ` chunk: audio format descriptor and its extensible tail.

use std::fmt;

use byteorder::{ByteOrder, LittleEndian};
use serde::Serialize;

use crate::decode::SampleDepth;
use crate::error::{WavError, WavResult};

/// Size of the base format record (six little-endian fields).
pub const FORMAT_RECORD_LEN: usize = 16;

/// Size of a `WAVE_FORMAT_EXTENSIBLE` record including `cbSize`.
pub const EXTENSIBLE_RECORD_LEN: usize = 40;

/// WAV format codes (`wFormatTag`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormatTag {
    /// Uncompressed integer PCM.
    Pcm,
    /// IEEE floating point.
    IeeeFloat,
    /// A-law companded.
    ALaw,
    /// Mu-law companded.
    MuLaw,
    /// `WAVE_FORMAT_EXTENSIBLE`; the real format is in the sub-format GUID.
    Extensible,
    /// Anything else.
    Unknown(u16),
}

impl FormatTag {
    /// Numeric tag as stored in the file.
    pub const fn as_u16(self) -> u16 {
        match self {
            FormatTag::Pcm => 0x0001,
            FormatTag::IeeeFloat => 0x0003,
            FormatTag::ALaw => 0x0006,
            FormatTag::MuLaw => 0x0007,
            FormatTag::Extensible => 0xFFFE,
            FormatTag::Unknown(code) => code,
        }
    }
}

impl From<u16> for FormatTag {
    fn from(code: u16) -> Self {
        match code {
            0x0001 => FormatTag::Pcm,
            0x0003 => FormatTag::IeeeFloat,
            0x0006 => FormatTag::ALaw,
            0x0007 => FormatTag::MuLaw,
            0xFFFE => FormatTag::Extensible,
            other => FormatTag::Unknown(other),
        }
    }
}

impl fmt::Display for FormatTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FormatTag::Pcm => write!(f, "PCM"),
            FormatTag::IeeeFloat => write!(f, "IEEE_FLOAT"),
            FormatTag::ALaw => write!(f, "A_LAW"),
            FormatTag::MuLaw => write!(f, "MU_LAW"),
            FormatTag::Extensible => write!(f, "EXTENSIBLE"),
            FormatTag::Unknown(code) => write!(f, "UNKNOWN(0x{:04X})", code),
        }
    }
}

/// Audio format descriptor from the `fmt ` chunk.
///
/// Fields are stored exactly as read; nothing is validated until decode time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct AudioFormat {
    /// Codec tag (1 = PCM).
    pub format_tag: u16,
    /// Number of interleaved channels.
    pub channel_count: u16,
    /// Frames per second.
    pub sample_rate: u32,
    /// Declared byte rate.
    pub avg_bytes_per_sec: u32,
    /// Bytes per frame across all channels.
    pub block_align: u16,
    /// Bits per single-channel sample.
    pub bits_per_sample: u16,
}

impl AudioFormat {
    /// Typed view of `format_tag`.
    pub fn tag(&self) -> FormatTag {
        FormatTag::from(self.format_tag)
    }

    /// Bytes per single-channel sample, rounded up.
    pub fn bytes_per_sample(&self) -> u16 {
        self.bits_per_sample.div_ceil(8)
    }

    /// Playback time of `frame_count` frames, 0.0 if the sample rate is zero.
    pub fn duration_secs(&self, frame_count: u64) -> f64 {
        if self.sample_rate == 0 {
            0.0
        } else {
            frame_count as f64 / self.sample_rate as f64
        }
    }

    /// Checks that samples in this format can be decoded and returns the
    /// per-sample decode strategy.
    pub fn check_decodable(&self) -> WavResult<SampleDepth> {
        if self.block_align == 0 {
            return Err(WavError::format("block alignment is zero"));
        }
        SampleDepth::try_from(self.bits_per_sample)
    }
}

impl fmt::Display for AudioFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} ch, {} Hz, {} bit, block align {}",
            self.tag(),
            self.channel_count,
            self.sample_rate,
            self.bits_per_sample,
            self.block_align
        )
    }
}

/// Extra fields carried by a `WAVE_FORMAT_EXTENSIBLE` record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FormatExtension {
    /// Bits of actual precision inside each sample container.
    pub valid_bits_per_sample: u16,
    /// Speaker position bitmask.
    pub channel_mask: u32,
    /// Sub-format GUID; its first two bytes are a format tag.
    pub sub_format: [u8; 16],
}

impl FormatExtension {
    /// Format tag encoded in the leading bytes of the sub-format GUID.
    pub fn sub_format_tag(&self) -> FormatTag {
        FormatTag::from(LittleEndian::read_u16(&self.sub_format))
    }
}

/// Decodes the base format record from the start of `bytes`.
///
/// Returns `None` if fewer than [`FORMAT_RECORD_LEN`] bytes are given.
/// Trailing bytes are ignored.
pub fn parse_format(bytes: &[u8]) -> Option<AudioFormat> {
    if bytes.len() < FORMAT_RECORD_LEN {
        return None;
    }
    Some(AudioFormat {
        format_tag: LittleEndian::read_u16(&bytes[0..]),
        channel_count: LittleEndian::read_u16(&bytes[2..]),
        sample_rate: LittleEndian::read_u32(&bytes[4..]),
        avg_bytes_per_sec: LittleEndian::read_u32(&bytes[8..]),
        block_align: LittleEndian::read_u16(&bytes[12..]),
        bits_per_sample: LittleEndian::read_u16(&bytes[14..]),
    })
}

/// Decodes the extensible tail of a format record.
///
/// Requires the full 40-byte record and a `cbSize` of at least 22.
pub fn parse_extension(bytes: &[u8]) -> Option<FormatExtension> {
    if bytes.len() < EXTENSIBLE_RECORD_LEN || LittleEndian::read_u16(&bytes[16..]) < 22 {
        return None;
    }
    let mut sub_format = [0u8; 16];
    sub_format.copy_from_slice(&bytes[24..40]);
    Some(FormatExtension {
        valid_bits_per_sample: LittleEndian::read_u16(&bytes[18..]),
        channel_mask: LittleEndian::read_u32(&bytes[20..]),
        sub_format,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn make_fmt_bytes(
        format_tag: u16,
        channels: u16,
        sample_rate: u32,
        block_align: u16,
        bits_per_sample: u16,
    ) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(16);
        bytes.extend_from_slice(&format_tag.to_le_bytes());
        bytes.extend_from_slice(&channels.to_le_bytes());
        bytes.extend_from_slice(&sample_rate.to_le_bytes());
        bytes.extend_from_slice(&(sample_rate * block_align as u32).to_le_bytes());
        bytes.extend_from_slice(&block_align.to_le_bytes());
        bytes.extend_from_slice(&bits_per_sample.to_le_bytes());
        bytes
    }

    #[test]
    fn test_parse_format_fields() {
        let bytes = make_fmt_bytes(1, 2, 44_100, 4, 16);
        let format = parse_format(&bytes).unwrap();
        assert_eq!(
            format,
            AudioFormat {
                format_tag: 1,
                channel_count: 2,
                sample_rate: 44_100,
                avg_bytes_per_sec: 176_400,
                block_align: 4,
                bits_per_sample: 16,
            }
        );
        assert_eq!(format.tag(), FormatTag::Pcm);
        assert_eq!(format.bytes_per_sample(), 2);
    }

    #[test]
    fn test_parse_format_reads_little_endian() {
        let bytes = [
            0x01, 0x00, // tag
            0x02, 0x01, // channels 0x0102
            0x44, 0xAC, 0x00, 0x80, // rate 0x8000AC44
            0x10, 0xB1, 0x02, 0x00, // byte rate 0x0002B110
            0x04, 0x80, // block align 0x8004
            0x18, 0x00, // bits 24
        ];
        let format = parse_format(&bytes).unwrap();
        assert_eq!(format.channel_count, 0x0102);
        assert_eq!(format.sample_rate, 0x8000_AC44);
        assert_eq!(format.avg_bytes_per_sec, 0x0002_B110);
        assert_eq!(format.block_align, 0x8004);
        assert_eq!(format.bits_per_sample, 24);
    }

    #[test]
    fn test_parse_format_too_short() {
        let bytes = make_fmt_bytes(1, 1, 8000, 1, 8);
        assert!(parse_format(&bytes[..15]).is_none());
    }

    #[test]
    fn test_parse_format_ignores_trailing_bytes() {
        let mut bytes = make_fmt_bytes(1, 1, 8000, 1, 8);
        bytes.extend_from_slice(&[0, 0]); // cbSize
        assert_eq!(parse_format(&bytes).unwrap().sample_rate, 8000);
        assert!(parse_extension(&bytes).is_none());
    }

    #[test]
    fn test_parse_format_does_not_validate() {
        let bytes = make_fmt_bytes(0x1234, 0, 0, 0, 12);
        let format = parse_format(&bytes).unwrap();
        assert_eq!(format.tag(), FormatTag::Unknown(0x1234));
        assert_eq!(format.bits_per_sample, 12);
    }

    #[test]
    fn test_parse_extension() {
        let mut bytes = make_fmt_bytes(0xFFFE, 2, 48_000, 6, 24);
        bytes.extend_from_slice(&22u16.to_le_bytes());
        bytes.extend_from_slice(&20u16.to_le_bytes());
        bytes.extend_from_slice(&0x3u32.to_le_bytes());
        let mut guid = [0u8; 16];
        guid[0] = 0x01;
        bytes.extend_from_slice(&guid);

        let ext = parse_extension(&bytes).unwrap();
        assert_eq!(ext.valid_bits_per_sample, 20);
        assert_eq!(ext.channel_mask, 3);
        assert_eq!(ext.sub_format_tag(), FormatTag::Pcm);
        assert_eq!(parse_format(&bytes).unwrap().tag(), FormatTag::Extensible);
    }

    #[test]
    fn test_check_decodable() {
        let mut format = parse_format(&make_fmt_bytes(1, 1, 8000, 1, 8)).unwrap();
        assert_eq!(format.check_decodable().unwrap(), SampleDepth::U8);

        format.block_align = 0;
        assert!(matches!(
            format.check_decodable(),
            Err(WavError::Format { .. })
        ));

        format.block_align = 2;
        format.bits_per_sample = 12;
        assert!(matches!(
            format.check_decodable(),
            Err(WavError::UnsupportedFormat {
                bits_per_sample: 12
            })
        ));
    }

    #[test]
    fn test_tag_roundtrip_and_display() {
        for code in [1u16, 3, 6, 7, 0xFFFE, 0x55] {
            assert_eq!(FormatTag::from(code).as_u16(), code);
        }
        assert_eq!(FormatTag::from(0x55).to_string(), "UNKNOWN(0x0055)");
    }

    #[test]
    fn test_duration() {
        let format = parse_format(&make_fmt_bytes(1, 1, 8000, 1, 8)).unwrap();
        assert_eq!(format.duration_secs(4000), 0.5);
        assert_eq!(AudioFormat::default().duration_secs(10), 0.0);
    }
}
