//! `LIST`/`INFO` metadata.

use std::io::{Read, Seek};

use serde::ser::SerializeMap;
use serde::Serialize;

use crate::cursor::ByteCursor;
use crate::error::WavResult;

/// Multi-valued text metadata keyed by four-character field identifier.
///
/// Keys keep the order in which they were first seen and each key keeps its
/// values in encounter order, so repeated fields such as several `IART`
/// entries are all retained.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MetadataMap {
    entries: Vec<(String, Vec<String>)>,
}

impl MetadataMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `value` to the values of `key`, creating the entry if needed.
    pub fn push(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some((_, values)) => values.push(value),
            None => self.entries.push((key, vec![value])),
        }
    }

    /// All values recorded for `key`.
    pub fn get(&self, key: &str) -> Option<&[String]> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, values)| values.as_slice())
    }

    /// First value recorded for `key`.
    pub fn first(&self, key: &str) -> Option<&str> {
        self.get(key)
            .and_then(|values| values.first())
            .map(String::as_str)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Number of distinct keys.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.entries
            .iter()
            .map(|(k, values)| (k.as_str(), values.as_slice()))
    }

    /// `INAM`
    pub fn title(&self) -> Option<&str> {
        self.first("INAM")
    }

    /// `IART`
    pub fn artist(&self) -> Option<&str> {
        self.first("IART")
    }

    /// `ICMT`
    pub fn comment(&self) -> Option<&str> {
        self.first("ICMT")
    }

    /// `ISFT`
    pub fn software(&self) -> Option<&str> {
        self.first("ISFT")
    }
}

impl Serialize for MetadataMap {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, values) in &self.entries {
            map.serialize_entry(key, values)?;
        }
        map.end()
    }
}

/// Cleans a raw field value: lossy UTF-8, whitespace trimmed, cut at the
/// first NUL.
pub(crate) fn decode_text(raw: &[u8]) -> String {
    let text = String::from_utf8_lossy(raw);
    let trimmed = text.trim();
    match trimmed.find('\0') {
        Some(nul) => trimmed[..nul].trim_end().to_string(),
        None => trimmed.to_string(),
    }
}

/// Reads `INFO` fields from the cursor until `end` (absolute offset).
///
/// Stops when fewer than four bytes remain before `end`, when no identifier
/// can be read, or when a field length cannot be read. Field lengths that
/// overrun `end` are clamped to it.
pub fn parse_info<R: Read + Seek>(
    cursor: &mut ByteCursor<R>,
    end: u64,
    metadata: &mut MetadataMap,
) -> WavResult<()> {
    let end = end.min(cursor.len());

    while end.saturating_sub(cursor.position()) >= 4 {
        let Some(id) = cursor.read_fourcc()? else {
            break;
        };
        if cursor.position() > end || end - cursor.position() < 4 {
            break;
        }

        let declared = cursor.read_u32_le()? as u64;
        let available = end - cursor.position();
        let len = declared.min(available);
        let raw = cursor.read_exact_vec(len as usize)?;
        let value = decode_text(&raw);

        log::debug!("INFO field {} = {:?}", id, value);
        metadata.push(id.to_string(), value);
    }

    Ok(())
}
