//! The caller-facing cartridge record and the two codec entry points.

use alloc::string::String;
use alloc::vec::Vec;

use crate::code::{self, EncodeWarning};
use crate::cover;
use crate::error::CartError;
use crate::font::GlyphMap;
use crate::layout::{
    MemoryImage, FLAGS_LEN, GFX_LEN, MAP_LEN, MUSIC_LEN, SFX_LEN, SHARED_LEN,
};
use crate::stego::{self, Label};

/// Everything a cartridge stores, unpacked.
///
/// A fresh record is produced by every decode; encoding reads the record
/// without mutating it, so editors can keep their working copy.
pub struct CartRecord {
    /// Program text. May have arrived raw, ":c:"-compressed or
    /// "pxa"-compressed; stored here it is always plain text.
    pub code: String,
    /// Sprite sheet, 2 packed 4-bit pixels per byte.
    pub gfx: [u8; GFX_LEN],
    /// Upper 32 tilemap rows. The lower 32 live in the sprite-sheet tail,
    /// see [`CartRecord::map_lower`].
    pub map: [u8; MAP_LEN],
    /// One flag byte per sprite.
    pub flags: [u8; FLAGS_LEN],
    /// 64 music patterns, 4 bytes each.
    pub music: [u8; MUSIC_LEN],
    /// 64 sound effects, 68 bytes each.
    pub sfx: [u8; SFX_LEN],
    /// 128x128 RGBA label art.
    pub label: Label,
}

impl CartRecord {
    pub fn new() -> Self {
        CartRecord {
            code: String::new(),
            gfx: [0u8; GFX_LEN],
            map: [0u8; MAP_LEN],
            flags: [0u8; FLAGS_LEN],
            music: [0u8; MUSIC_LEN],
            sfx: [0u8; SFX_LEN],
            label: Label::new(),
        }
    }

    /// A record holding only program text, as when loading plain source:
    /// the text round-trips untouched and every binary region is blank.
    pub fn from_source_text(code: &str) -> Self {
        let mut cart = Self::new();
        cart.code = String::from(code);
        cart
    }

    /// Lower 32 tilemap rows, aliasing the sprite-sheet tail.
    pub fn map_lower(&self) -> &[u8] {
        &self.gfx[GFX_LEN - SHARED_LEN..]
    }
}

impl Default for CartRecord {
    fn default() -> Self {
        Self::new()
    }
}

/// Decode a cover image (row-major RGBA) into a cartridge record.
pub fn decode_pixels(
    pixels: &[u8],
    width: usize,
    height: usize,
) -> Result<CartRecord, CartError> {
    let (mem, label) = stego::extract(pixels, width, height)?;

    let mut cart = CartRecord::new();
    cart.gfx.copy_from_slice(mem.gfx());
    cart.map.copy_from_slice(mem.map_upper());
    cart.flags.copy_from_slice(mem.flags());
    cart.music.copy_from_slice(mem.music());
    cart.sfx.copy_from_slice(mem.sfx());
    cart.label = label;
    let (text, _) = code::load(mem.code())?;
    cart.code = text;
    Ok(cart)
}

/// Encode a cartridge record into a finished cover pixel buffer.
///
/// The regions are packed into a fresh memory image (program text raw,
/// compressed or, at worst, truncated with a warning), the cover is
/// composited from `template` plus label and text, and the image is
/// embedded steganographically.
pub fn encode_pixels(
    cart: &CartRecord,
    template: &[u8],
    width: usize,
    height: usize,
    title: &str,
    author: &str,
    glyphs: &GlyphMap,
) -> Result<(Vec<u8>, Option<EncodeWarning>), CartError> {
    if template.len() < width * height * 4 {
        return Err(CartError::ShortImage {
            pixels: template.len() / 4,
            need: width * height,
        });
    }

    let mut mem = MemoryImage::new();
    mem.gfx_mut().copy_from_slice(&cart.gfx);
    mem.map_upper_mut().copy_from_slice(&cart.map);
    mem.flags_mut().copy_from_slice(&cart.flags);
    mem.music_mut().copy_from_slice(&cart.music);
    mem.sfx_mut().copy_from_slice(&cart.sfx);
    let warning = code::store(&cart.code, mem.code_mut());

    let mut pixels = cover::compose(template, width, height, &cart.label, title, author, glyphs);
    stego::embed(&mut pixels, mem.as_bytes())?;
    Ok((pixels, warning))
}
