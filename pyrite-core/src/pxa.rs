//! "pxa" code compression (decode only).
//!
//! The newer compression scheme: a move-to-front literal table over all 256
//! byte values plus three offset widths of LZ copy, packed into a bitstream
//! read least-significant-bit first within each byte. The console ships no
//! encoder for it here; carts loaded from a pxa stream are re-encoded with
//! the legacy scheme when saved (see [`crate::code::CodeFormat`]).

use alloc::vec::Vec;

use crate::error::CartError;

/// Stream header magic: a NUL followed by `pxa`.
pub const MAGIC: [u8; 4] = [0x00, b'p', b'x', b'a'];

/// An LSB-first bit cursor over a byte slice. Multi-bit reads fill the
/// result from its least significant bit upward.
struct BitReader<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> BitReader<'a> {
    fn new(data: &'a [u8]) -> Self {
        BitReader { data, pos: 0 }
    }

    fn bit(&mut self) -> Option<u32> {
        let byte = *self.data.get(self.pos / 8)?;
        let b = (byte >> (self.pos % 8)) & 1;
        self.pos += 1;
        Some(b as u32)
    }

    fn bits(&mut self, n: u32) -> Option<u32> {
        let mut v = 0u32;
        for k in 0..n {
            v |= self.bit()? << k;
        }
        Some(v)
    }
}

/// Decompress a pxa stream, header included.
///
/// The runtime is tolerant of damage: a truncated bitstream or an
/// out-of-range literal index simply ends decoding, and whatever was
/// produced so far is returned. Copies reaching before the start of the
/// output read zeroes.
pub fn decompress(data: &[u8]) -> Result<Vec<u8>, CartError> {
    if data.len() < 8 {
        return Err(CartError::TruncatedStream { len: data.len() });
    }
    if data[..4] != MAGIC {
        return Err(CartError::BadMagic);
    }
    let target = u16::from_be_bytes([data[4], data[5]]) as usize;

    let mut r = BitReader::new(&data[8..]);
    let mut mtf: Vec<u8> = (0..=255u8).collect();
    let mut out: Vec<u8> = Vec::with_capacity(target);

    'stream: while out.len() < target {
        let Some(flag) = r.bit() else { break };
        if flag == 1 {
            // Literal: unary prefix widens the index field by one bit per
            // leading 1 and offsets it past the previous tier.
            let mut unary = 0u32;
            loop {
                match r.bit() {
                    Some(1) => unary += 1,
                    Some(_) => break,
                    None => break 'stream,
                }
            }
            let Some(v) = r.bits(4 + unary) else { break };
            let index = v as usize + (((1usize << unary) - 1) << 4);
            if index >= mtf.len() {
                log::warn!("pxa: literal index {} out of range, stopping", index);
                break;
            }
            let sym = mtf[index];
            if index > 0 {
                mtf.remove(index);
                mtf.insert(0, sym);
            }
            out.push(sym);
        } else {
            let offset_bits = match r.bit() {
                Some(0) => 15,
                Some(_) => match r.bit() {
                    Some(0) => 10,
                    Some(_) => 5,
                    None => break,
                },
                None => break,
            };
            let Some(v) = r.bits(offset_bits) else { break };
            let offset = v as usize + 1;

            if offset_bits == 10 && offset == 1 {
                // Raw block: whole bytes until a NUL, bypassing the MTF
                // table entirely.
                while out.len() < target {
                    let Some(b) = r.bits(8) else { break 'stream };
                    if b == 0 {
                        break;
                    }
                    out.push(b as u8);
                }
                continue;
            }

            let mut length = 3usize;
            loop {
                let Some(part) = r.bits(3) else { break 'stream };
                length += part as usize;
                if part != 7 {
                    break;
                }
            }
            for _ in 0..length {
                let b = if offset <= out.len() {
                    out[out.len() - offset]
                } else {
                    0
                };
                out.push(b);
            }
        }
    }

    out.truncate(target);
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    /// LSB-first bit writer mirroring the decoder's read order.
    struct BitWriter {
        bytes: Vec<u8>,
        used: usize, // bits used in the last byte
    }

    impl BitWriter {
        fn new() -> Self {
            BitWriter {
                bytes: Vec::new(),
                used: 8,
            }
        }

        fn push_bit(&mut self, b: u32) {
            if self.used == 8 {
                self.bytes.push(0);
                self.used = 0;
            }
            if b != 0 {
                *self.bytes.last_mut().unwrap() |= 1 << self.used;
            }
            self.used += 1;
        }

        fn push_bits(&mut self, v: u32, n: u32) {
            for k in 0..n {
                self.push_bit((v >> k) & 1);
            }
        }

        /// Literal for an index in the 4-bit tier (0..=15).
        fn literal4(&mut self, index: u32) {
            self.push_bit(1);
            self.push_bit(0);
            self.push_bits(index, 4);
        }

        /// Literal for an index in the 6-bit tier (48..=111).
        fn literal6(&mut self, index: u32) {
            self.push_bit(1);
            self.push_bits(0b011, 3); // unary=2, terminator
            self.push_bits(index - 48, 6);
        }

        fn copy5(&mut self, offset: u32, length_chunks: &[u32]) {
            self.push_bit(0);
            self.push_bit(1);
            self.push_bit(1);
            self.push_bits(offset - 1, 5);
            for &c in length_chunks {
                self.push_bits(c, 3);
            }
        }

        fn finish(self, target: u16) -> Vec<u8> {
            let mut s = Vec::new();
            s.extend_from_slice(&MAGIC);
            s.extend_from_slice(&target.to_be_bytes());
            s.extend_from_slice(&[0, 0]);
            s.extend_from_slice(&self.bytes);
            s
        }
    }

    #[test]
    fn literal_with_untouched_table() {
        let mut w = BitWriter::new();
        w.literal4(5);
        assert_eq!(decompress(&w.finish(1)).unwrap(), [5]);
    }

    #[test]
    fn move_to_front_update() {
        // Index 10 emits symbol 10 and promotes it; index 0 then re-emits
        // the newly fronted symbol without touching the table.
        let mut w = BitWriter::new();
        w.literal4(10);
        w.literal4(0);
        assert_eq!(decompress(&w.finish(2)).unwrap(), [10, 10]);
    }

    #[test]
    fn move_to_front_shifts_lower_entries() {
        // After promoting symbol 10, symbol 0 sits at index 1.
        let mut w = BitWriter::new();
        w.literal4(10);
        w.literal4(1);
        assert_eq!(decompress(&w.finish(2)).unwrap(), [10, 0]);
    }

    #[test]
    fn second_tier_literal() {
        // unary=1 widens the field to 5 bits and offsets the index by 16.
        let mut w = BitWriter::new();
        w.push_bit(1);
        w.push_bits(0b01, 2); // unary run of one, then terminator
        w.push_bits(40 - 16, 5);
        assert_eq!(decompress(&w.finish(1)).unwrap(), [40]);
    }

    #[test]
    fn copy_expands_runs() {
        let mut w = BitWriter::new();
        w.literal6(b'a' as u32); // identity table: index == byte value
        w.literal6(b'b' as u32); // entries above the promoted 'a' keep their index
        w.copy5(2, &[2]); // offset 2, length 3+2
        assert_eq!(decompress(&w.finish(7)).unwrap(), b"abababa");
    }

    #[test]
    fn copy_length_extension() {
        // A chunk of 7 keeps the length field going: 3+7+2 = 12.
        let mut w = BitWriter::new();
        w.literal6(b'a' as u32);
        w.copy5(1, &[7, 2]);
        assert_eq!(decompress(&w.finish(13)).unwrap(), vec![b'a'; 13]);
    }

    #[test]
    fn copy_before_start_reads_zeroes() {
        let mut w = BitWriter::new();
        w.copy5(10, &[0]);
        assert_eq!(decompress(&w.finish(3)).unwrap(), [0, 0, 0]);
    }

    #[test]
    fn wide_offset_copy() {
        // offset_bits=15 path (single 0 selector bit).
        let mut w = BitWriter::new();
        w.literal6(b'q' as u32);
        w.push_bit(0);
        w.push_bit(0);
        w.push_bits(0, 15); // offset 1
        w.push_bits(0, 3); // length 3
        assert_eq!(decompress(&w.finish(4)).unwrap(), b"qqqq");
    }

    #[test]
    fn raw_block_escape() {
        // offset_bits=10 with offset 1 switches to whole raw bytes.
        let mut w = BitWriter::new();
        w.push_bit(0);
        w.push_bits(0b01, 2); // selector: 10-bit offset
        w.push_bits(0, 10); // offset 1 -> raw block
        for &b in b"Hi!" {
            w.push_bits(b as u32, 8);
        }
        w.push_bits(0, 8); // terminator
        w.literal4(7);
        assert_eq!(decompress(&w.finish(4)).unwrap(), [b'H', b'i', b'!', 7]);
    }

    #[test]
    fn corrupt_literal_index_stops_early() {
        let mut w = BitWriter::new();
        w.literal4(3);
        // unary=4 tier starts at index 240; value 16 lands on 256.
        w.push_bit(1);
        w.push_bits(0b01111, 5); // four 1s, terminator
        w.push_bits(16, 8);
        assert_eq!(decompress(&w.finish(10)).unwrap(), [3]);
    }

    #[test]
    fn truncated_bitstream_returns_partial_output() {
        let mut w = BitWriter::new();
        w.literal4(9);
        assert_eq!(decompress(&w.finish(500)).unwrap(), [9]);
    }

    #[test]
    fn rejects_bad_header() {
        assert_eq!(
            decompress(&MAGIC),
            Err(CartError::TruncatedStream { len: 4 })
        );
        assert_eq!(
            decompress(&[1, 2, 3, 4, 0, 0, 0, 0]),
            Err(CartError::BadMagic)
        );
    }
}
