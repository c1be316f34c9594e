//! Builtin pixel font for cover-image text.
//!
//! Glyphs are 8 row bytes with the least significant bit as the leftmost
//! column. The builtin set uses 3x5 shapes in the upper-left corner, which
//! fits the 4-pixel advance used for ASCII text on labels. Callers with
//! wide-glyph needs supply their own map.

use alloc::collections::BTreeMap;

pub type Glyph = [u8; 8];
pub type GlyphMap = BTreeMap<char, Glyph>;

/// 3x5 glyph rows, top to bottom. Letters are listed lowercase; the
/// builtin map aliases uppercase onto the same shapes.
const GLYPHS: &[(char, [u8; 5])] = &[
    ('a', [7, 5, 7, 5, 5]),
    ('b', [3, 5, 3, 5, 3]),
    ('c', [7, 1, 1, 1, 7]),
    ('d', [3, 5, 5, 5, 3]),
    ('e', [7, 1, 3, 1, 7]),
    ('f', [7, 1, 3, 1, 1]),
    ('g', [7, 1, 5, 5, 7]),
    ('h', [5, 5, 7, 5, 5]),
    ('i', [7, 2, 2, 2, 7]),
    ('j', [4, 4, 4, 5, 7]),
    ('k', [5, 5, 3, 5, 5]),
    ('l', [1, 1, 1, 1, 7]),
    ('m', [5, 7, 7, 5, 5]),
    ('n', [3, 5, 5, 5, 5]),
    ('o', [7, 5, 5, 5, 7]),
    ('p', [7, 5, 7, 1, 1]),
    ('q', [7, 5, 5, 7, 4]),
    ('r', [7, 5, 3, 5, 5]),
    ('s', [7, 1, 7, 4, 7]),
    ('t', [7, 2, 2, 2, 2]),
    ('u', [5, 5, 5, 5, 7]),
    ('v', [5, 5, 5, 5, 2]),
    ('w', [5, 5, 7, 7, 5]),
    ('x', [5, 5, 2, 5, 5]),
    ('y', [5, 5, 7, 2, 2]),
    ('z', [7, 4, 2, 1, 7]),
    ('0', [7, 5, 5, 5, 7]),
    ('1', [3, 2, 2, 2, 7]),
    ('2', [7, 4, 7, 1, 7]),
    ('3', [7, 4, 6, 4, 7]),
    ('4', [5, 5, 7, 4, 4]),
    ('5', [7, 1, 7, 4, 7]),
    ('6', [1, 1, 7, 5, 7]),
    ('7', [7, 4, 4, 4, 4]),
    ('8', [7, 5, 7, 5, 7]),
    ('9', [7, 5, 7, 4, 4]),
    ('-', [0, 0, 7, 0, 0]),
    ('.', [0, 0, 0, 0, 2]),
    (',', [0, 0, 0, 2, 1]),
    (':', [0, 2, 0, 2, 0]),
    (';', [0, 2, 0, 2, 1]),
    ('!', [2, 2, 2, 0, 2]),
    ('?', [7, 4, 6, 0, 2]),
    ('\'', [2, 2, 0, 0, 0]),
    ('"', [5, 5, 0, 0, 0]),
    ('(', [2, 1, 1, 1, 2]),
    (')', [2, 4, 4, 4, 2]),
    ('[', [3, 1, 1, 1, 3]),
    (']', [6, 4, 4, 4, 6]),
    ('/', [4, 4, 2, 1, 1]),
    ('*', [5, 2, 7, 2, 5]),
    ('+', [0, 2, 7, 2, 0]),
    ('=', [0, 7, 0, 7, 0]),
    ('_', [0, 0, 0, 0, 7]),
    ('#', [5, 7, 5, 7, 5]),
    ('<', [4, 2, 1, 2, 4]),
    ('>', [1, 2, 4, 2, 1]),
    ('%', [5, 4, 2, 1, 5]),
];

/// The builtin ASCII glyph map. Characters absent here (including space)
/// are rendered as gaps.
pub fn builtin_glyphs() -> GlyphMap {
    let mut map = GlyphMap::new();
    for &(ch, rows) in GLYPHS {
        let glyph: Glyph = [rows[0], rows[1], rows[2], rows[3], rows[4], 0, 0, 0];
        map.insert(ch, glyph);
        if ch.is_ascii_lowercase() {
            map.insert(ch.to_ascii_uppercase(), glyph);
        }
    }
    map
}
