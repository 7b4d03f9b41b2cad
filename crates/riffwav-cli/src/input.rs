//! Input file loading shared by the commands.

use std::fs;
use std::io::Cursor;
use std::path::Path;

use anyhow::{Context, Result};
use riffwav_reader::WavDocument;

/// A file read fully into memory with its header scanned.
pub struct LoadedWav {
    /// Path as given on the command line.
    pub input: String,
    /// BLAKE3 hash of the whole file.
    pub input_hash: String,
    pub doc: WavDocument<Cursor<Vec<u8>>>,
}

/// Reads `path` and runs the header scan.
pub fn load_wav(path: &Path) -> Result<LoadedWav> {
    let bytes =
        fs::read(path).with_context(|| format!("Failed to read file: {}", path.display()))?;
    load_wav_bytes(path, bytes)
}

/// Header scan over bytes already read from `path`.
pub fn load_wav_bytes(path: &Path, bytes: Vec<u8>) -> Result<LoadedWav> {
    let input_hash = blake3::hash(&bytes).to_hex().to_string();
    let mut doc = WavDocument::from_bytes(bytes)?;
    doc.scan_header()
        .with_context(|| format!("Failed to scan header: {}", path.display()))?;

    Ok(LoadedWav {
        input: path.display().to_string(),
        input_hash,
        doc,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use riffwav_reader::WavError;

    #[test]
    fn test_load_wav_missing_file() {
        let err = load_wav(Path::new("/nonexistent/tone.wav")).err().unwrap();
        assert!(err.to_string().contains("Failed to read file"));
    }

    #[test]
    fn test_load_wav_bytes_keeps_wav_error() {
        let err = load_wav_bytes(Path::new("junk.wav"), b"not a wav file".to_vec())
            .err()
            .unwrap();
        assert!(matches!(
            err.downcast_ref::<WavError>(),
            Some(WavError::Format { .. })
        ));
    }
}
