//! Byte-level WAV construction helpers shared by the integration tests.

#![allow(dead_code)]

/// Encodes one chunk, adding the pad byte after odd payloads.
pub fn chunk(id: &[u8; 4], payload: &[u8]) -> Vec<u8> {
    let mut bytes = Vec::with_capacity(8 + payload.len() + 1);
    bytes.extend_from_slice(id);
    bytes.extend_from_slice(&(payload.len() as u32).to_le_bytes());
    bytes.extend_from_slice(payload);
    if payload.len() % 2 == 1 {
        bytes.push(0);
    }
    bytes
}

/// Encodes a chunk header with an arbitrary declared size and no payload.
pub fn chunk_header(id: &[u8; 4], declared_size: u32) -> Vec<u8> {
    let mut bytes = id.to_vec();
    bytes.extend_from_slice(&declared_size.to_le_bytes());
    bytes
}

/// 16-byte PCM format record with consistent byte rate and block align.
pub fn fmt_payload(channels: u16, sample_rate: u32, bits: u16) -> Vec<u8> {
    let block_align = channels * bits.div_ceil(8);
    let mut p = Vec::with_capacity(16);
    p.extend_from_slice(&1u16.to_le_bytes());
    p.extend_from_slice(&channels.to_le_bytes());
    p.extend_from_slice(&sample_rate.to_le_bytes());
    p.extend_from_slice(&(sample_rate * block_align as u32).to_le_bytes());
    p.extend_from_slice(&block_align.to_le_bytes());
    p.extend_from_slice(&bits.to_le_bytes());
    p
}

pub fn fmt_chunk(channels: u16, sample_rate: u32, bits: u16) -> Vec<u8> {
    chunk(b"fmt ", &fmt_payload(channels, sample_rate, bits))
}

/// `LIST` chunk of type `INFO` holding the given fields.
pub fn info_list(fields: &[(&[u8; 4], &str)]) -> Vec<u8> {
    let mut body = b"INFO".to_vec();
    for (id, value) in fields {
        body.extend(chunk(id, value.as_bytes()));
    }
    chunk(b"LIST", &body)
}

/// Wraps chunks in a `RIFF`/`WAVE` preamble with a correct size field.
pub fn riff(chunks: &[Vec<u8>]) -> Vec<u8> {
    let body = chunks.concat();
    let mut bytes = b"RIFF".to_vec();
    bytes.extend_from_slice(&(body.len() as u32 + 4).to_le_bytes());
    bytes.extend_from_slice(b"WAVE");
    bytes.extend(body);
    bytes
}

/// Canonical `fmt ` + `data` file.
pub fn pcm_wav(channels: u16, sample_rate: u32, bits: u16, data: &[u8]) -> Vec<u8> {
    riff(&[fmt_chunk(channels, sample_rate, bits), chunk(b"data", data)])
}
