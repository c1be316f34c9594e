#![no_std]
extern crate alloc;

pub mod cart;
pub mod code;
pub mod cover;
pub mod error;
pub mod font;
pub mod layout;
pub mod legacy;
pub mod pxa;
pub mod stego;

pub use cart::{decode_pixels, encode_pixels, CartRecord};
pub use code::{CodeFormat, EncodeWarning};
pub use error::CartError;
pub use font::{builtin_glyphs, GlyphMap};
pub use stego::Label;
