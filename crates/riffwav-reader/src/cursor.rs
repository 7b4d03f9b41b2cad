//! Position-tracking reader over a finite, seekable byte source.

use std::io::{self, Read, Seek, SeekFrom};

use byteorder::{LittleEndian, ReadBytesExt};

use crate::chunk::FourCc;
use crate::error::WavResult;

/// Seekable byte source with a known total length.
///
/// The length is measured once when the cursor is created; every offset the
/// reader hands out is relative to the start of the source.
#[derive(Debug)]
pub struct ByteCursor<R> {
    inner: R,
    pos: u64,
    len: u64,
}

impl<R: Read + Seek> ByteCursor<R> {
    /// Wraps `source`, measuring its length and rewinding to the start.
    pub fn new(mut source: R) -> WavResult<Self> {
        let len = source.seek(SeekFrom::End(0))?;
        source.seek(SeekFrom::Start(0))?;
        Ok(Self {
            inner: source,
            pos: 0,
            len,
        })
    }

    /// Current offset from the start of the source.
    #[inline]
    pub fn position(&self) -> u64 {
        self.pos
    }

    /// Total length of the source in bytes.
    #[inline]
    pub fn len(&self) -> u64 {
        self.len
    }

    /// True if the source holds no bytes at all.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Bytes between the current offset and the end of the source.
    #[inline]
    pub fn remaining(&self) -> u64 {
        self.len.saturating_sub(self.pos)
    }

    #[inline]
    pub fn is_at_end(&self) -> bool {
        self.pos >= self.len
    }

    /// Moves to an absolute offset. Offsets past the end land on the end.
    pub fn seek_to(&mut self, offset: u64) -> WavResult<()> {
        let target = offset.min(self.len);
        if target != self.pos {
            self.inner.seek(SeekFrom::Start(target))?;
            self.pos = target;
        }
        Ok(())
    }

    /// Moves forward by `count` bytes, stopping at the end of the source.
    pub fn skip(&mut self, count: u64) -> WavResult<()> {
        self.seek_to(self.pos.saturating_add(count))
    }

    /// Fills `buf` completely or fails with `UnexpectedEof`.
    pub fn read_into(&mut self, buf: &mut [u8]) -> WavResult<()> {
        self.inner.read_exact(buf)?;
        self.pos += buf.len() as u64;
        Ok(())
    }

    /// Reads exactly `count` bytes into a new vector.
    pub fn read_exact_vec(&mut self, count: usize) -> WavResult<Vec<u8>> {
        if count as u64 > self.remaining() {
            return Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                format!(
                    "requested {} bytes at offset {} but only {} remain",
                    count,
                    self.pos,
                    self.remaining()
                ),
            )
            .into());
        }
        let mut buf = vec![0u8; count];
        self.read_into(&mut buf)?;
        Ok(buf)
    }

    pub fn read_u8(&mut self) -> WavResult<u8> {
        let value = self.inner.read_u8()?;
        self.pos += 1;
        Ok(value)
    }

    /// Reads a little-endian `u16`.
    pub fn read_u16_le(&mut self) -> WavResult<u16> {
        let value = self.inner.read_u16::<LittleEndian>()?;
        self.pos += 2;
        Ok(value)
    }

    /// Reads a little-endian `u32`.
    pub fn read_u32_le(&mut self) -> WavResult<u32> {
        let value = self.inner.read_u32::<LittleEndian>()?;
        self.pos += 4;
        Ok(value)
    }

    /// Reads a four-character code.
    ///
    /// Bytes outside the printable ASCII range are skipped before the first
    /// character, which absorbs the pad byte that follows odd-sized chunks.
    /// Returns `None` when the source runs out before four bytes are read.
    pub fn read_fourcc(&mut self) -> WavResult<Option<FourCc>> {
        let first = loop {
            if self.is_at_end() {
                return Ok(None);
            }
            let byte = self.read_u8()?;
            if (0x20..=0x7F).contains(&byte) {
                break byte;
            }
        };

        if self.remaining() < 3 {
            self.seek_to(self.len)?;
            return Ok(None);
        }

        let mut rest = [0u8; 3];
        self.read_into(&mut rest)?;
        Ok(Some(FourCc([first, rest[0], rest[1], rest[2]])))
    }

    /// Gives back the wrapped source.
    pub fn into_inner(self) -> R {
        self.inner
    }
}
