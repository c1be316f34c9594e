//! PNG boundary for the pyrite cartridge codec.
//!
//! Cartridges are distributed as PNG images with the 32 KiB memory image
//! hidden steganographically in the pixel data. This crate owns the PNG
//! decode/encode step and hands flat RGBA buffers to `pyrite-core`, which
//! does everything else.

use pyrite_core::{CartRecord, EncodeWarning, GlyphMap};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PngCartError {
    #[error("cartridge image decode failed: {0}")]
    Decode(#[from] png::DecodingError),
    #[error("cartridge image encode failed: {0}")]
    Encode(#[from] png::EncodingError),
    #[error("unsupported PNG color type {0:?}")]
    ColorType(png::ColorType),
    #[error(transparent)]
    Cart(#[from] pyrite_core::CartError),
}

/// Parse a cartridge PNG from raw file bytes.
///
/// Any malformed or truncated PNG fails the whole decode; no partial
/// record is ever returned.
pub fn read_cart(png_bytes: &[u8]) -> Result<CartRecord, PngCartError> {
    let (pixels, width, height) = decode_rgba(png_bytes)?;
    Ok(pyrite_core::decode_pixels(&pixels, width, height)?)
}

/// Serialize a cartridge record into a finished cover PNG.
///
/// `template_png` supplies the cover art the label and text are drawn
/// onto. A non-fatal [`EncodeWarning`] is returned alongside the bytes
/// when the program text had to be truncated.
pub fn write_cart(
    cart: &CartRecord,
    template_png: &[u8],
    title: &str,
    author: &str,
    glyphs: &GlyphMap,
) -> Result<(Vec<u8>, Option<EncodeWarning>), PngCartError> {
    let (template, width, height) = decode_rgba(template_png)?;
    let (pixels, warning) =
        pyrite_core::encode_pixels(cart, &template, width, height, title, author, glyphs)?;

    let mut out = Vec::new();
    {
        let mut encoder = png::Encoder::new(&mut out, width as u32, height as u32);
        encoder.set_color(png::ColorType::Rgba);
        encoder.set_depth(png::BitDepth::Eight);
        let mut writer = encoder.write_header()?;
        writer.write_image_data(&pixels)?;
    }
    if let Some(w) = warning {
        log::warn!("cartridge saved with data loss: {:?}", w);
    }
    Ok((out, warning))
}

/// Decode a PNG into a flat RGBA buffer. RGB images are accepted and get
/// an opaque alpha channel; other color types are rejected.
fn decode_rgba(png_bytes: &[u8]) -> Result<(Vec<u8>, usize, usize), PngCartError> {
    let decoder = png::Decoder::new(png_bytes);
    let mut reader = decoder.read_info()?;

    let mut buf = vec![0u8; reader.output_buffer_size()];
    let info = reader.next_frame(&mut buf)?;
    let (width, height) = (info.width as usize, info.height as usize);
    buf.truncate(info.buffer_size());

    match info.color_type {
        png::ColorType::Rgba => Ok((buf, width, height)),
        png::ColorType::Rgb => {
            let mut rgba = Vec::with_capacity(width * height * 4);
            for p in buf.chunks_exact(3) {
                rgba.extend_from_slice(p);
                rgba.push(0xFF);
            }
            Ok((rgba, width, height))
        }
        other => Err(PngCartError::ColorType(other)),
    }
}
