use thiserror::Error;

/// Errors raised by the cartridge codec.
///
/// The reference runtime is deliberately tolerant of malformed cartridges:
/// out-of-range back-references and corrupt pxa bitstreams degrade to
/// no-ops or partial output instead of failing. Only conditions that make
/// it impossible to produce (or persist) a whole memory image are errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CartError {
    /// The pixel buffer cannot hold a full 32 KiB memory image.
    #[error("pixel buffer too small: {pixels} pixels, need at least {need}")]
    ShortImage { pixels: usize, need: usize },

    /// A compressed code section ended before its fixed header did.
    #[error("compressed code section truncated ({len} bytes)")]
    TruncatedStream { len: usize },

    /// A compressed code section carries the wrong magic for its decoder.
    #[error("compressed code section has unexpected magic bytes")]
    BadMagic,
}
