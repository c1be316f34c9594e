//! Legacy ":c:" code compression.
//!
//! A byte-oriented LZ scheme dating back to the console's early releases:
//! single-byte codes for the 59 most common source characters, an escape
//! for everything else, and two-byte back-references into a 3135-byte
//! window. This is the only scheme the codec can *write*; see
//! [`crate::pxa`] for the newer read-only format.

use alloc::vec::Vec;

use crate::error::CartError;

/// Stream header magic: `:c:` followed by a NUL.
pub const MAGIC: [u8; 4] = [0x3A, 0x63, 0x3A, 0x00];

/// Characters addressable with a single code byte (codes 0x01..=0x3B).
const DICT: &[u8; 59] = b"\n 0123456789abcdefghijklmnopqrstuvwxyz!#%(){}[]<>+=/*:;.,~_";

/// First code byte that introduces a back-reference.
const REF_BASE: usize = 0x3C;
const MAX_OFFSET: usize = 3135;
const MIN_MATCH: usize = 2;
const MAX_MATCH: usize = 17;

/// Decompress a ":c:" stream, header included.
///
/// Back-references with a zero or out-of-range offset are skipped rather
/// than rejected; the reference runtime does the same. Decoding ends when
/// the advertised plaintext length is reached or the input runs dry.
pub fn decompress(data: &[u8]) -> Result<Vec<u8>, CartError> {
    if data.len() < 8 {
        return Err(CartError::TruncatedStream { len: data.len() });
    }
    if data[..4] != MAGIC {
        return Err(CartError::BadMagic);
    }
    let target = u16::from_be_bytes([data[4], data[5]]) as usize;

    let mut out: Vec<u8> = Vec::with_capacity(target);
    let mut i = 8;
    while out.len() < target && i < data.len() {
        let b = data[i];
        i += 1;
        if b == 0x00 {
            // Escape: next byte is a raw literal.
            if i < data.len() {
                out.push(data[i]);
                i += 1;
            }
        } else if (b as usize) < REF_BASE {
            out.push(DICT[b as usize - 1]);
        } else {
            if i >= data.len() {
                break;
            }
            let b2 = data[i];
            i += 1;
            let offset = (b as usize - REF_BASE) * 16 + (b2 & 0x0F) as usize;
            let length = (b2 >> 4) as usize + 2;
            if offset == 0 || offset > out.len() {
                continue;
            }
            // Byte-at-a-time so a reference may read bytes it just wrote
            // (offset < length expands a run).
            for _ in 0..length {
                let c = out[out.len() - offset];
                out.push(c);
            }
        }
    }

    out.truncate(target);
    Ok(out)
}

/// Compress plaintext into a full ":c:" stream, header included.
///
/// Returns `None` when the plaintext length does not fit the header's
/// 16-bit field; the caller falls back to raw storage.
pub fn compress(text: &[u8]) -> Option<Vec<u8>> {
    if text.len() > u16::MAX as usize {
        return None;
    }

    let mut out = Vec::with_capacity(8 + text.len() / 2);
    out.extend_from_slice(&MAGIC);
    out.extend_from_slice(&(text.len() as u16).to_be_bytes());
    out.extend_from_slice(&[0, 0]);

    let mut pos = 0;
    while pos < text.len() {
        if let Some((offset, len)) = longest_match(text, pos) {
            out.push((REF_BASE + (offset >> 4)) as u8);
            out.push((offset & 0x0F) as u8 | ((len - MIN_MATCH) as u8) << 4);
            pos += len;
        } else {
            let b = text[pos];
            match DICT.iter().position(|&d| d == b) {
                Some(idx) => out.push(idx as u8 + 1),
                None => {
                    out.push(0x00);
                    out.push(b);
                }
            }
            pos += 1;
        }
    }

    Some(out)
}

/// Greedy longest-match search against the already emitted plaintext.
///
/// Candidates are scanned nearest-first; matches may run past `pos` into
/// the bytes being matched (self-overlap), which the decoder reproduces by
/// appending one byte at a time.
fn longest_match(text: &[u8], pos: usize) -> Option<(usize, usize)> {
    let window = pos.saturating_sub(MAX_OFFSET);
    let mut best: Option<(usize, usize)> = None;
    let mut start = pos;
    while start > window {
        start -= 1;
        let mut len = 0;
        while len < MAX_MATCH && pos + len < text.len() && text[start + len] == text[pos + len] {
            len += 1;
        }
        if len >= MIN_MATCH && best.map_or(true, |(_, b)| len > b) {
            best = Some((pos - start, len));
            if len == MAX_MATCH {
                break;
            }
        }
    }
    best
}
