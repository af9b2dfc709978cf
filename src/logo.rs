//! Optional logo asset.
//!
//! A logo is immutable raw bytes plus a format tag detected from the magic
//! signature. Embedding into a document happens per document (an embedded
//! image handle belongs to one document's resource table), so the asset is
//! kept as bytes and re-embedded for every generated PDF.

use crate::error::{Error, Result};
use std::path::Path;

/// Image format accepted for logos.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogoFormat {
    /// PNG, transcoded to raw RGB at embed time.
    Png,
    /// JPEG, embedded as-is with the DCTDecode filter.
    Jpeg,
}

/// Raw logo bytes with their detected format.
#[derive(Debug, Clone)]
pub struct LogoAsset {
    bytes: Vec<u8>,
    format: LogoFormat,
}

impl LogoAsset {
    /// Accept raw bytes as a logo if the magic signature is PNG or JPEG.
    pub fn from_bytes(bytes: Vec<u8>) -> Result<Self> {
        let format = detect_format(&bytes)
            .ok_or_else(|| Error::Image("Logo is neither PNG nor JPEG".to_string()))?;
        Ok(Self { bytes, format })
    }

    /// Read a logo image from a file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let bytes = std::fs::read(path.as_ref())?;
        Self::from_bytes(bytes)
    }

    /// Raw image bytes.
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Detected image format.
    pub fn format(&self) -> LogoFormat {
        self.format
    }
}

/// Detect PNG (`89 50 4E`) or JPEG (`FF D8 FF`) from the leading bytes.
fn detect_format(bytes: &[u8]) -> Option<LogoFormat> {
    if bytes.len() < 3 {
        return None;
    }
    if bytes[0] == 0x89 && bytes[1] == 0x50 && bytes[2] == 0x4E {
        Some(LogoFormat::Png)
    } else if bytes[0] == 0xFF && bytes[1] == 0xD8 && bytes[2] == 0xFF {
        Some(LogoFormat::Jpeg)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_png() {
        let bytes = vec![0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A];
        assert_eq!(detect_format(&bytes), Some(LogoFormat::Png));
    }

    #[test]
    fn test_detect_jpeg() {
        let bytes = vec![0xFF, 0xD8, 0xFF, 0xE0];
        assert_eq!(detect_format(&bytes), Some(LogoFormat::Jpeg));
    }

    #[test]
    fn test_reject_unknown_magic() {
        assert_eq!(detect_format(b"GIF89a"), None);
        assert_eq!(detect_format(&[]), None);
        assert!(LogoAsset::from_bytes(b"not an image".to_vec()).is_err());
    }

    #[test]
    fn test_accepts_png_magic_with_garbage_body() {
        // Format detection is magic-only; decode failures surface at embed
        // time and are recovered there.
        let mut bytes = vec![0x89, 0x50, 0x4E, 0x47];
        bytes.extend_from_slice(b"garbage");
        let asset = LogoAsset::from_bytes(bytes).unwrap();
        assert_eq!(asset.format(), LogoFormat::Png);
    }
}
