//! Cover image compositing for the save path.
//!
//! A saved cartridge PNG is built in three layers before the memory image
//! is hidden in it: the stock template art, the 128x128 label at its fixed
//! window, and two lines of bitmap text (title and author) under the label.

use alloc::vec::Vec;

use crate::font::GlyphMap;
use crate::stego::{Label, LABEL_H, LABEL_W, LABEL_X, LABEL_Y};

/// Top-left of the title line.
pub const TITLE_X: usize = 18;
pub const TITLE_Y: usize = 166;
/// Top-left of the author line.
pub const AUTHOR_X: usize = 18;
pub const AUTHOR_Y: usize = 176;

const WHITE: [u8; 4] = [0xFF, 0xFF, 0xFF, 0xFF];

/// Build the cover pixel buffer: template, label overlay, then text.
///
/// `template` is row-major RGBA of at least `width * height` pixels. The
/// label is a straight per-pixel copy (no blending); text pixels are
/// opaque white. Everything is clipped per pixel against the destination.
pub fn compose(
    template: &[u8],
    width: usize,
    height: usize,
    label: &Label,
    title: &str,
    author: &str,
    glyphs: &GlyphMap,
) -> Vec<u8> {
    let mut out = template[..width * height * 4].to_vec();

    for ly in 0..LABEL_H {
        for lx in 0..LABEL_W {
            let x = LABEL_X + lx;
            let y = LABEL_Y + ly;
            if x < width && y < height {
                let src = (ly * LABEL_W + lx) * 4;
                let dst = (y * width + x) * 4;
                out[dst..dst + 4].copy_from_slice(&label.rgba[src..src + 4]);
            }
        }
    }

    draw_text(&mut out, width, height, title, TITLE_X, TITLE_Y, glyphs);
    draw_text(&mut out, width, height, author, AUTHOR_X, AUTHOR_Y, glyphs);
    out
}

/// Render one line of text. ASCII advances 4 pixels, wider code points 8.
/// Characters without a glyph leave a gap but still advance the cursor.
fn draw_text(
    buf: &mut [u8],
    width: usize,
    height: usize,
    text: &str,
    x: usize,
    y: usize,
    glyphs: &GlyphMap,
) {
    let mut cx = x;
    for ch in text.chars() {
        if let Some(glyph) = glyphs.get(&ch) {
            for (row, &bits) in glyph.iter().enumerate() {
                for col in 0..8 {
                    if bits & (1 << col) != 0 {
                        let px = cx + col;
                        let py = y + row;
                        if px < width && py < height {
                            let dst = (py * width + px) * 4;
                            buf[dst..dst + 4].copy_from_slice(&WHITE);
                        }
                    }
                }
            }
        }
        cx += if (ch as u32) < 128 { 4 } else { 8 };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::font::{Glyph, GlyphMap};
    use alloc::vec;

    const W: usize = 160;
    const H: usize = 205;

    fn pixel(buf: &[u8], x: usize, y: usize) -> [u8; 4] {
        let o = (y * W + x) * 4;
        [buf[o], buf[o + 1], buf[o + 2], buf[o + 3]]
    }

    fn dot_glyphs() -> GlyphMap {
        // One pixel in the top-left of the glyph cell.
        let dot: Glyph = [1, 0, 0, 0, 0, 0, 0, 0];
        let mut map = GlyphMap::new();
        map.insert('a', dot);
        map.insert('✗', dot);
        map
    }

    #[test]
    fn label_lands_at_its_window() {
        let template = vec![0u8; W * H * 4];
        let mut label = Label::new();
        label.rgba[..4].copy_from_slice(&[1, 2, 3, 4]);
        let out = compose(&template, W, H, &label, "", "", &GlyphMap::new());
        assert_eq!(pixel(&out, LABEL_X, LABEL_Y), [1, 2, 3, 4]);
        assert_eq!(pixel(&out, LABEL_X - 1, LABEL_Y), [0, 0, 0, 0]);
    }

    #[test]
    fn template_shows_through_outside_overlays() {
        let template = vec![0x80u8; W * H * 4];
        let out = compose(&template, W, H, &Label::new(), "", "", &GlyphMap::new());
        assert_eq!(pixel(&out, 0, 0), [0x80; 4]);
        // Inside the label window the (blank) label replaced the template.
        assert_eq!(pixel(&out, LABEL_X, LABEL_Y), [0, 0, 0, 0]);
    }

    #[test]
    fn title_and_author_rows() {
        let template = vec![0u8; W * H * 4];
        let out = compose(&template, W, H, &Label::new(), "a", "a", &dot_glyphs());
        assert_eq!(pixel(&out, TITLE_X, TITLE_Y), WHITE);
        assert_eq!(pixel(&out, AUTHOR_X, AUTHOR_Y), WHITE);
    }

    #[test]
    fn ascii_advances_four_pixels() {
        let template = vec![0u8; W * H * 4];
        let out = compose(&template, W, H, &Label::new(), "aa", "", &dot_glyphs());
        assert_eq!(pixel(&out, TITLE_X, TITLE_Y), WHITE);
        assert_eq!(pixel(&out, TITLE_X + 4, TITLE_Y), WHITE);
    }

    #[test]
    fn wide_chars_advance_eight_pixels() {
        let template = vec![0u8; W * H * 4];
        let out = compose(&template, W, H, &Label::new(), "✗a", "", &dot_glyphs());
        assert_eq!(pixel(&out, TITLE_X, TITLE_Y), WHITE);
        assert_eq!(pixel(&out, TITLE_X + 8, TITLE_Y), WHITE);
        assert_eq!(pixel(&out, TITLE_X + 4, TITLE_Y), [0, 0, 0, 0]);
    }

    #[test]
    fn missing_glyph_leaves_gap_but_advances() {
        let template = vec![0u8; W * H * 4];
        let out = compose(&template, W, H, &Label::new(), "za", "", &dot_glyphs());
        assert_eq!(pixel(&out, TITLE_X, TITLE_Y), [0, 0, 0, 0]);
        assert_eq!(pixel(&out, TITLE_X + 4, TITLE_Y), WHITE);
    }

    #[test]
    fn text_clips_at_image_edge() {
        let template = vec![0u8; W * H * 4];
        let long: alloc::string::String = core::iter::repeat('a').take(60).collect();
        // 60 * 4 = 240 > 160 wide; must not panic.
        let out = compose(&template, W, H, &Label::new(), &long, "", &dot_glyphs());
        assert_eq!(pixel(&out, W - 2, TITLE_Y), WHITE);
    }
}
