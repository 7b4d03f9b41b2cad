//! Property-based tests for the reader using proptest.
//!
//! These tests check that scanning and decoding never panic on arbitrary
//! input and that decoded buffers keep their shape invariants.
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test -p riffwav-reader --test proptest_reader
//! ```

mod common;

use std::io::Cursor;

use proptest::prelude::*;
use riffwav_reader::{SampleDepth, WavDocument};

use common::{chunk, fmt_chunk, info_list, pcm_wav, riff};

// ============================================================================
// 1. Arbitrary input
// ============================================================================

proptest! {
    /// Random bytes never panic; they either scan or fail with an error.
    #[test]
    fn arbitrary_bytes_never_panic(bytes in prop::collection::vec(any::<u8>(), 0..512)) {
        let mut doc = WavDocument::from_bytes(bytes).unwrap();
        if doc.scan_header().is_ok() {
            let _ = doc.decode_samples();
        }
    }

    /// A valid preamble followed by random chunk bytes never panics.
    #[test]
    fn random_chunk_body_never_panics(body in prop::collection::vec(any::<u8>(), 0..512)) {
        let mut bytes = b"RIFF".to_vec();
        bytes.extend_from_slice(&(body.len() as u32 + 4).to_le_bytes());
        bytes.extend_from_slice(b"WAVE");
        bytes.extend(body);

        let mut doc = WavDocument::from_bytes(bytes).unwrap();
        if doc.scan_header().is_ok() {
            let _ = doc.decode_samples();
        }
    }

    /// Declared sizes beyond the stream are clamped, never trusted.
    #[test]
    fn oversized_declarations_are_clamped(
        declared in any::<u32>(),
        payload in prop::collection::vec(any::<u8>(), 0..64)
    ) {
        let mut bytes = riff(&[fmt_chunk(1, 8000, 8)]);
        bytes.extend_from_slice(b"data");
        bytes.extend_from_slice(&declared.to_le_bytes());
        bytes.extend_from_slice(&payload);
        let total = bytes.len() as u64;

        let mut doc = WavDocument::from_bytes(bytes).unwrap();
        doc.scan_header().unwrap();
        let span = doc.data_span().unwrap();
        prop_assert!(span.offset + span.len <= total);
        prop_assert_eq!(span.len, (declared as u64).min(payload.len() as u64));
    }
}

// ============================================================================
// 2. Decode shape
// ============================================================================

fn depth_strategy() -> impl Strategy<Value = u16> {
    prop_oneof![Just(8u16), Just(16), Just(24), Just(32)]
}

proptest! {
    /// Frame count is the integer quotient of data length and block align,
    /// and every channel has that many samples.
    #[test]
    fn frame_count_matches_block_align(
        channels in 1u16..=8,
        bits in depth_strategy(),
        data in prop::collection::vec(any::<u8>(), 0..256)
    ) {
        let block_align = channels as usize * (bits as usize / 8);
        let mut doc = WavDocument::from_bytes(pcm_wav(channels, 22_050, bits, &data)).unwrap();
        doc.scan_header().unwrap();
        prop_assert_eq!(doc.frame_count(), (data.len() / block_align) as u64);

        let samples = doc.decode_samples().unwrap();
        prop_assert_eq!(samples.channel_count(), channels as usize);
        for channel in samples.iter() {
            prop_assert_eq!(channel.len(), data.len() / block_align);
        }
    }

    /// Every decoded sample lies in [-1, 1).
    #[test]
    fn samples_are_normalized(
        bits in depth_strategy(),
        data in prop::collection::vec(any::<u8>(), 0..256)
    ) {
        let mut doc = WavDocument::from_bytes(pcm_wav(1, 8000, bits, &data)).unwrap();
        doc.scan_header().unwrap();
        let samples = doc.decode_samples().unwrap();
        for &s in samples.channel(0).unwrap() {
            prop_assert!((-1.0..1.0).contains(&s), "{} out of range at {} bits", s, bits);
        }
    }

    /// Decoding through the document agrees with the per-sample decode.
    #[test]
    fn document_decode_matches_sample_depth(
        bits in depth_strategy(),
        data in prop::collection::vec(any::<u8>(), 0..128)
    ) {
        let depth = SampleDepth::try_from(bits).unwrap();
        let expected: Vec<f64> = data
            .chunks_exact(depth.bytes())
            .map(|raw| depth.normalize(raw))
            .collect();

        let doc = riffwav_reader::read_wav(Cursor::new(pcm_wav(1, 8000, bits, &data))).unwrap();
        prop_assert_eq!(doc.samples().unwrap().channel(0).unwrap(), expected.as_slice());
    }
}

// ============================================================================
// 3. Metadata
// ============================================================================

proptest! {
    /// Printable ASCII INFO values survive the trip through a LIST chunk.
    #[test]
    fn info_values_are_preserved(value in "[a-zA-Z0-9][a-zA-Z0-9 ]{0,30}[a-zA-Z0-9]") {
        let wav = riff(&[
            fmt_chunk(1, 8000, 8),
            info_list(&[(b"INAM", value.as_str())]),
            chunk(b"data", &[0x80]),
        ]);
        let mut doc = WavDocument::from_bytes(wav).unwrap();
        doc.scan_header().unwrap();
        prop_assert_eq!(doc.metadata().unwrap().title(), Some(value.as_str()));
    }
}
