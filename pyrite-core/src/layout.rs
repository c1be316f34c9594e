//! The fixed cartridge address space.
//!
//! Every cartridge, regardless of how it reached us (steganographic PNG or
//! plain text), is a 32 KiB memory image with a fixed region layout:
//!
//!   0x0000-0x1FFF: Sprite sheet (2 packed 4-bit pixels per byte, 128x128)
//!   0x2000-0x2FFF: Tilemap, upper 32 rows (1 byte per tile, 128x32)
//!   0x3000-0x30FF: Sprite flags (1 byte per sprite, 256 sprites)
//!   0x3100-0x31FF: Music patterns (64 patterns x 4 bytes)
//!   0x3200-0x42FF: Sound effects (64 effects x 68 bytes)
//!   0x4300-      : Program text (raw, ":c:"-compressed or "pxa"-compressed)
//!
//! The last 0x800 bytes of the sprite sheet double as the lower 32 tilemap
//! rows. The codec carries those bytes in the sprite-sheet region and
//! exposes the shared window read-only; it never interprets them.

pub const ROM_SIZE: usize = 0x8000;

pub const GFX_START: usize = 0x0000;
pub const GFX_LEN: usize = 0x2000;
pub const MAP_START: usize = 0x2000;
pub const MAP_LEN: usize = 0x1000;
pub const FLAGS_START: usize = 0x3000;
pub const FLAGS_LEN: usize = 0x0100;
pub const MUSIC_START: usize = 0x3100;
pub const MUSIC_LEN: usize = 0x0100;
pub const SFX_START: usize = 0x3200;
pub const SFX_LEN: usize = 0x1100;
pub const CODE_START: usize = 0x4300;
pub const CODE_LEN: usize = 0x37FD;

/// Bytes at the tail of the sprite sheet shared with the lower tilemap rows.
pub const SHARED_LEN: usize = 0x0800;

/// A complete cartridge memory image.
///
/// Always exactly [`ROM_SIZE`] bytes; the region accessors below are the
/// only sanctioned way to address it.
pub struct MemoryImage {
    bytes: [u8; ROM_SIZE],
}

impl MemoryImage {
    pub fn new() -> Self {
        MemoryImage {
            bytes: [0u8; ROM_SIZE],
        }
    }

    pub fn from_bytes(bytes: [u8; ROM_SIZE]) -> Self {
        MemoryImage { bytes }
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn as_bytes_mut(&mut self) -> &mut [u8] {
        &mut self.bytes
    }

    pub fn gfx(&self) -> &[u8] {
        &self.bytes[GFX_START..GFX_START + GFX_LEN]
    }

    pub fn gfx_mut(&mut self) -> &mut [u8] {
        &mut self.bytes[GFX_START..GFX_START + GFX_LEN]
    }

    /// Upper 32 tilemap rows. The lower 32 live in the sprite-sheet tail,
    /// see [`MemoryImage::map_lower`].
    pub fn map_upper(&self) -> &[u8] {
        &self.bytes[MAP_START..MAP_START + MAP_LEN]
    }

    pub fn map_upper_mut(&mut self) -> &mut [u8] {
        &mut self.bytes[MAP_START..MAP_START + MAP_LEN]
    }

    /// Lower 32 tilemap rows: a read-only view of the shared sprite-sheet
    /// tail. Mutations go through [`MemoryImage::gfx_mut`].
    pub fn map_lower(&self) -> &[u8] {
        &self.bytes[GFX_START + GFX_LEN - SHARED_LEN..GFX_START + GFX_LEN]
    }

    pub fn flags(&self) -> &[u8] {
        &self.bytes[FLAGS_START..FLAGS_START + FLAGS_LEN]
    }

    pub fn flags_mut(&mut self) -> &mut [u8] {
        &mut self.bytes[FLAGS_START..FLAGS_START + FLAGS_LEN]
    }

    pub fn music(&self) -> &[u8] {
        &self.bytes[MUSIC_START..MUSIC_START + MUSIC_LEN]
    }

    pub fn music_mut(&mut self) -> &mut [u8] {
        &mut self.bytes[MUSIC_START..MUSIC_START + MUSIC_LEN]
    }

    pub fn sfx(&self) -> &[u8] {
        &self.bytes[SFX_START..SFX_START + SFX_LEN]
    }

    pub fn sfx_mut(&mut self) -> &mut [u8] {
        &mut self.bytes[SFX_START..SFX_START + SFX_LEN]
    }

    pub fn code(&self) -> &[u8] {
        &self.bytes[CODE_START..CODE_START + CODE_LEN]
    }

    pub fn code_mut(&mut self) -> &mut [u8] {
        &mut self.bytes[CODE_START..CODE_START + CODE_LEN]
    }
}

impl Default for MemoryImage {
    fn default() -> Self {
        Self::new()
    }
}
