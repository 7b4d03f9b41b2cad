//! Whole-file byte source over a directory.
//!
//! Hands out the contents of every file with a given extension, one file at a
//! time, in path order. Each buffer is independent and can be fed to
//! [`WavDocument::from_bytes`](crate::WavDocument::from_bytes).

use std::fs;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::error::{WavError, WavResult};

/// Iterates the matching files of a directory as byte buffers.
#[derive(Debug, Clone)]
pub struct DirectorySource {
    files: Vec<PathBuf>,
    next: usize,
}

impl DirectorySource {
    /// Lists files directly inside `dir` whose extension matches `extension`
    /// (case-insensitive, without the dot).
    pub fn open(dir: impl AsRef<Path>, extension: &str) -> WavResult<Self> {
        Self::scan(dir.as_ref(), extension, Some(1))
    }

    /// Like [`open`](Self::open) but descends into subdirectories.
    pub fn open_recursive(dir: impl AsRef<Path>, extension: &str) -> WavResult<Self> {
        Self::scan(dir.as_ref(), extension, None)
    }

    fn scan(dir: &Path, extension: &str, max_depth: Option<usize>) -> WavResult<Self> {
        let extension = extension.trim_start_matches('.');
        let mut walker = WalkDir::new(dir).min_depth(1).sort_by_file_name();
        if let Some(depth) = max_depth {
            walker = walker.max_depth(depth);
        }

        let mut files = Vec::new();
        for entry in walker {
            let entry = entry.map_err(|e| {
                e.into_io_error()
                    .map(WavError::Io)
                    .unwrap_or_else(|| WavError::format("directory walk loop detected"))
            })?;
            if !entry.file_type().is_file() {
                continue;
            }
            let matches = entry
                .path()
                .extension()
                .and_then(|e| e.to_str())
                .is_some_and(|e| e.eq_ignore_ascii_case(extension));
            if matches {
                files.push(entry.into_path());
            }
        }

        if files.is_empty() {
            return Err(WavError::NoMatchingFiles {
                dir: dir.to_path_buf(),
                extension: extension.to_string(),
            });
        }

        log::debug!("{} '.{}' files under {}", files.len(), extension, dir.display());
        Ok(Self { files, next: 0 })
    }

    /// Reads the next file and advances. `None` once every file was returned.
    ///
    /// The source moves past the file even when reading it fails, so one
    /// unreadable file never blocks the ones after it.
    pub fn next_bytes(&mut self) -> WavResult<Option<(PathBuf, Vec<u8>)>> {
        let Some(path) = self.files.get(self.next) else {
            return Ok(None);
        };
        self.next += 1;
        let bytes = fs::read(path)?;
        Ok(Some((path.clone(), bytes)))
    }

    /// Path of the file [`next_bytes`](Self::next_bytes) would return.
    pub fn peek_path(&self) -> Option<&Path> {
        self.files.get(self.next).map(PathBuf::as_path)
    }

    /// Size of the file [`next_bytes`](Self::next_bytes) would return, or 0
    /// at the end.
    pub fn current_size(&self) -> WavResult<u64> {
        match self.files.get(self.next) {
            Some(path) => Ok(fs::metadata(path)?.len()),
            None => Ok(0),
        }
    }

    /// Files not yet returned.
    pub fn remaining(&self) -> usize {
        self.files.len() - self.next
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Rewinds to the first file.
    pub fn reset(&mut self) {
        self.next = 0;
    }

    pub fn paths(&self) -> &[PathBuf] {
        &self.files
    }
}
