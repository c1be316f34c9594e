//! Program-text region handling: format sniffing, decompression dispatch
//! and the storage policy for saving.

use alloc::string::String;
use alloc::vec::Vec;

use crate::error::CartError;
use crate::{legacy, pxa};

/// How the program text is stored in the code region.
///
/// Decoding understands all three; encoding only ever produces `Raw` or
/// `Legacy`. A cart read from a `Pxa` stream and saved again is therefore
/// re-encoded with the legacy scheme: same program text, different bytes
/// on disk. That downgrade is deliberate and mirrors the reference tools.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CodeFormat {
    /// NUL-terminated plain text.
    Raw,
    /// ":c:" back-reference compression, the only writable scheme.
    Legacy,
    /// "pxa" move-to-front compression, readable only.
    Pxa,
}

/// Saving produced a usable image, but not a faithful one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EncodeWarning {
    /// Program text exceeded the region even compressed; the stored copy
    /// lost `lost` bytes off the end.
    CodeTruncated { lost: usize },
}

pub fn detect(region: &[u8]) -> CodeFormat {
    if region.len() >= 4 && region[..4] == legacy::MAGIC {
        CodeFormat::Legacy
    } else if region.len() >= 4 && region[..4] == pxa::MAGIC {
        CodeFormat::Pxa
    } else {
        CodeFormat::Raw
    }
}

/// Recover the program text from a code region.
///
/// Stray non-UTF-8 bytes are replaced rather than rejected; the reference
/// runtime keeps running on carts with binary junk in the text.
pub fn load(region: &[u8]) -> Result<(String, CodeFormat), CartError> {
    let format = detect(region);
    log::debug!("code region stored as {:?}", format);
    let bytes: Vec<u8> = match format {
        CodeFormat::Legacy => legacy::decompress(region)?,
        CodeFormat::Pxa => pxa::decompress(region)?,
        CodeFormat::Raw => {
            let end = region
                .iter()
                .position(|&b| b == 0)
                .unwrap_or(region.len());
            region[..end].to_vec()
        }
    };
    Ok((String::from_utf8_lossy(&bytes).into_owned(), format))
}

/// Write program text into a zeroed code region.
///
/// Raw storage wins when the text fits; otherwise the legacy compressor
/// gets a shot; if even that overflows, the text is cut at the region
/// boundary and the loss is surfaced instead of failing the save.
pub fn store(code: &str, region: &mut [u8]) -> Option<EncodeWarning> {
    region.fill(0);
    let bytes = code.as_bytes();

    if bytes.len() <= region.len() {
        region[..bytes.len()].copy_from_slice(bytes);
        return None;
    }

    if let Some(packed) = legacy::compress(bytes) {
        if packed.len() <= region.len() {
            region[..packed.len()].copy_from_slice(&packed);
            return None;
        }
    }

    let lost = bytes.len() - region.len();
    log::warn!(
        "code section overflow: storing {} of {} bytes",
        region.len(),
        bytes.len()
    );
    region.copy_from_slice(&bytes[..region.len()]);
    Some(EncodeWarning::CodeTruncated { lost })
}
