//! Steganographic pixel codec.
//!
//! Cartridges travel as ordinary-looking PNG screenshots: one memory byte
//! hides in the two least significant bits of each pixel's four channels,
//! in Alpha-Red-Green-Blue significance order. The same image carries the
//! 128x128 label art in plain sight inside a fixed window, so a single
//! raster scan recovers both.

use crate::error::CartError;
use crate::layout::{MemoryImage, ROM_SIZE};

pub const LABEL_W: usize = 128;
pub const LABEL_H: usize = 128;
/// Top-left corner of the label window inside the cover image.
pub const LABEL_X: usize = 16;
pub const LABEL_Y: usize = 24;

/// The embedded 128x128 RGBA label art.
pub struct Label {
    pub rgba: [u8; LABEL_W * LABEL_H * 4],
}

impl Label {
    pub fn new() -> Self {
        Label {
            rgba: [0u8; LABEL_W * LABEL_H * 4],
        }
    }

    /// RGBA of the label pixel at (x, y).
    pub fn pixel(&self, x: usize, y: usize) -> [u8; 4] {
        let o = (y * LABEL_W + x) * 4;
        [
            self.rgba[o],
            self.rgba[o + 1],
            self.rgba[o + 2],
            self.rgba[o + 3],
        ]
    }
}

impl Default for Label {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for Label {
    fn clone(&self) -> Self {
        Label { rgba: self.rgba }
    }
}

/// Recover the memory image and the label art from a cover image.
///
/// `pixels` is row-major RGBA, 4 bytes per pixel. Pixel *i* < 32768 yields
/// memory byte `(A&3)<<6 | (R&3)<<4 | (G&3)<<2 | (B&3)`; later pixels only
/// matter if they fall inside the label window, whose 8-bit RGB is copied
/// verbatim (alpha forced opaque).
pub fn extract(
    pixels: &[u8],
    width: usize,
    height: usize,
) -> Result<(MemoryImage, Label), CartError> {
    let count = width * height;
    if count < ROM_SIZE || pixels.len() < count * 4 {
        return Err(CartError::ShortImage {
            pixels: pixels.len() / 4,
            need: ROM_SIZE,
        });
    }

    let mut mem = MemoryImage::new();
    let mut label = Label::new();
    let bytes = mem.as_bytes_mut();

    for y in 0..height {
        for x in 0..width {
            let i = y * width + x;
            let p = &pixels[i * 4..i * 4 + 4];
            if i < ROM_SIZE {
                bytes[i] = (p[3] & 3) << 6 | (p[0] & 3) << 4 | (p[1] & 3) << 2 | (p[2] & 3);
            }
            if (LABEL_X..LABEL_X + LABEL_W).contains(&x)
                && (LABEL_Y..LABEL_Y + LABEL_H).contains(&y)
            {
                let o = ((y - LABEL_Y) * LABEL_W + (x - LABEL_X)) * 4;
                label.rgba[o..o + 3].copy_from_slice(&p[..3]);
                label.rgba[o + 3] = 0xFF;
            }
        }
    }

    Ok((mem, label))
}

/// Hide `mem` in the low 2 bits of every channel of `cover` (RGBA, in
/// place). The high 6 bits of each channel are never touched, so the cover
/// stays visually intact. Pixels past the end of `mem` get their low bits
/// zeroed rather than left as steganographic noise.
pub fn embed(cover: &mut [u8], mem: &[u8]) -> Result<(), CartError> {
    let count = cover.len() / 4;
    if count < mem.len() {
        return Err(CartError::ShortImage {
            pixels: count,
            need: mem.len(),
        });
    }

    for i in 0..count {
        let p = &mut cover[i * 4..i * 4 + 4];
        for c in p.iter_mut() {
            *c &= 0xFC;
        }
        if i < mem.len() {
            let b = mem[i];
            p[0] |= (b >> 4) & 3;
            p[1] |= (b >> 2) & 3;
            p[2] |= b & 3;
            p[3] |= (b >> 6) & 3;
        }
    }

    Ok(())
}
