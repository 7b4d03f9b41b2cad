//! Feeds arbitrary bytes through the header scan and sample decode.

#![no_main]

use libfuzzer_sys::fuzz_target;
use riffwav_reader::WavDocument;

fuzz_target!(|data: &[u8]| {
    let Ok(mut doc) = WavDocument::from_bytes(data.to_vec()) else {
        return;
    };
    let Ok(scan) = doc.scan_header() else {
        return;
    };
    let span = scan.data_span;
    assert!(span.is_some());

    if let Ok(samples) = doc.decode_samples() {
        let frames = samples.frame_count();
        assert!(samples.iter().all(|c| c.len() == frames));
        assert!(samples.iter().flatten().all(|s| (-1.0..1.0).contains(s)));
    }
});
