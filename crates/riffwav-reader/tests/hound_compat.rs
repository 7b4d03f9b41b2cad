//! Cross-checks against files produced by an independent WAV writer.

use std::io::Cursor;

use hound::{SampleFormat, WavSpec, WavWriter};
use riffwav_reader::{read_wav, FormatTag};

fn write_with_hound<F>(channels: u16, bits_per_sample: u16, write: F) -> Vec<u8>
where
    F: FnOnce(&mut WavWriter<&mut Cursor<Vec<u8>>>),
{
    let spec = WavSpec {
        channels,
        sample_rate: 44_100,
        bits_per_sample,
        sample_format: SampleFormat::Int,
    };
    let mut buffer = Cursor::new(Vec::new());
    {
        let mut writer = WavWriter::new(&mut buffer, spec).unwrap();
        write(&mut writer);
        writer.finalize().unwrap();
    }
    buffer.into_inner()
}

#[test]
fn test_hound_16bit_stereo() {
    let left = [0i16, 16_384, -16_384, i16::MAX, i16::MIN];
    let right = [100i16, -100, 0, -1, 1];
    let bytes = write_with_hound(2, 16, |w| {
        for (l, r) in left.iter().zip(right.iter()) {
            w.write_sample(*l).unwrap();
            w.write_sample(*r).unwrap();
        }
    });

    let doc = read_wav(Cursor::new(bytes)).unwrap();
    assert_eq!(doc.format().sample_rate, 44_100);
    let samples = doc.samples().unwrap();
    assert_eq!(samples.frame_count(), left.len());

    for (i, (&l, &r)) in left.iter().zip(right.iter()).enumerate() {
        assert_eq!(samples.channel(0).unwrap()[i], l as f64 / 32_768.0);
        assert_eq!(samples.channel(1).unwrap()[i], r as f64 / 32_768.0);
    }
}

#[test]
fn test_hound_24bit_mono() {
    let values = [0i32, 1, -1, 8_388_607, -8_388_608, 4_194_304];
    let bytes = write_with_hound(1, 24, |w| {
        for v in values {
            w.write_sample(v).unwrap();
        }
    });

    let doc = read_wav(Cursor::new(bytes)).unwrap();
    let ch0 = doc.samples().unwrap().channel(0).unwrap();
    let expected: Vec<f64> = values.iter().map(|&v| v as f64 / 8_388_608.0).collect();
    assert_eq!(ch0, expected.as_slice());
}

#[test]
fn test_hound_32bit_mono() {
    let values = [0i32, i32::MAX, i32::MIN, 1 << 30, -(1 << 30)];
    let bytes = write_with_hound(1, 32, |w| {
        for v in values {
            w.write_sample(v).unwrap();
        }
    });

    let doc = read_wav(Cursor::new(bytes)).unwrap();
    let ch0 = doc.samples().unwrap().channel(0).unwrap();
    assert_eq!(ch0[0], 0.0);
    assert_eq!(ch0[2], -1.0);
    assert_eq!(ch0[3], 0.5);
    assert_eq!(ch0[4], -0.5);
}

#[test]
fn test_hound_8bit_mono() {
    let values = [0i8, i8::MIN, i8::MAX, -64];
    let bytes = write_with_hound(1, 8, |w| {
        for v in values {
            w.write_sample(v).unwrap();
        }
    });

    let doc = read_wav(Cursor::new(bytes)).unwrap();
    let ch0 = doc.samples().unwrap().channel(0).unwrap();
    assert_eq!(ch0, &[0.0, -1.0, 127.0 / 128.0, -0.5]);
}

#[test]
fn test_hound_multichannel_frame_layout() {
    let bytes = write_with_hound(4, 16, |w| {
        for ch in 0..4i16 {
            w.write_sample(ch * 1_000).unwrap();
        }
    });

    let doc = read_wav(Cursor::new(bytes)).unwrap();
    assert_eq!(doc.format().channel_count, 4);
    if doc.format().tag() == FormatTag::Extensible {
        let ext = doc.extension().expect("extensible tail should be decoded");
        assert_eq!(ext.sub_format_tag(), FormatTag::Pcm);
        assert_eq!(ext.valid_bits_per_sample, 16);
    }

    let frame = doc.samples().unwrap().frame(0).unwrap();
    let expected: Vec<f64> = (0..4).map(|ch| (ch * 1_000) as f64 / 32_768.0).collect();
    assert_eq!(frame, expected);
}
