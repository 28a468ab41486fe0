//! Core types for thumbnail editing.

use std::path::Path;

use base64::Engine;

use crate::error::{Result, TubeRankError};

/// Fixed MIME type assumed for edited output, regardless of the upload's
/// MIME type.
pub const OUTPUT_MIME_TYPE: &str = "image/png";

/// Supported source image formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ImageFormat {
    /// PNG format (lossless).
    #[default]
    Png,
    /// JPEG format (lossy).
    Jpeg,
    /// WebP format (modern, efficient).
    WebP,
}

impl ImageFormat {
    /// Returns the file extension for this format.
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Png => "png",
            Self::Jpeg => "jpg",
            Self::WebP => "webp",
        }
    }

    /// Returns the MIME type for this format.
    pub fn mime_type(&self) -> &'static str {
        match self {
            Self::Png => "image/png",
            Self::Jpeg => "image/jpeg",
            Self::WebP => "image/webp",
        }
    }

    /// Attempts to detect format from a file extension.
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "png" => Some(Self::Png),
            "jpg" | "jpeg" => Some(Self::Jpeg),
            "webp" => Some(Self::WebP),
            _ => None,
        }
    }

    /// Detects image format from magic bytes.
    pub fn from_magic_bytes(data: &[u8]) -> Option<Self> {
        if data.len() < 12 {
            return None;
        }

        // PNG: 89 50 4E 47 0D 0A 1A 0A
        if data.starts_with(&[0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A]) {
            return Some(Self::Png);
        }

        // JPEG: FF D8 FF
        if data.starts_with(&[0xFF, 0xD8, 0xFF]) {
            return Some(Self::Jpeg);
        }

        // WebP: RIFF....WEBP
        if data.starts_with(b"RIFF") && &data[8..12] == b"WEBP" {
            return Some(Self::WebP);
        }

        None
    }
}

/// A validated request to edit one source image.
#[derive(Debug, Clone)]
pub struct EditRequest {
    /// Raw source image bytes.
    pub image: Vec<u8>,
    /// MIME type of the source image.
    pub mime_type: String,
    /// Natural-language edit instruction.
    pub instruction: String,
}

impl EditRequest {
    /// Creates a request, rejecting an empty image or blank instruction.
    pub fn new(
        image: Vec<u8>,
        mime_type: impl Into<String>,
        instruction: impl Into<String>,
    ) -> Result<Self> {
        let instruction = instruction.into();
        if image.is_empty() {
            return Err(TubeRankError::InvalidRequest(
                "edit request requires a source image".into(),
            ));
        }
        if instruction.trim().is_empty() {
            return Err(TubeRankError::InvalidRequest(
                "edit request requires an instruction".into(),
            ));
        }
        Ok(Self {
            image,
            mime_type: mime_type.into(),
            instruction,
        })
    }
}

/// An edited image returned by the gateway.
///
/// Carries raw bytes only; the gateway's reported MIME type is discarded
/// and [`OUTPUT_MIME_TYPE`] is assumed for save and data-URL output.
#[derive(Debug, Clone, PartialEq, Eq)]
#[must_use = "edited image should be saved or displayed"]
pub struct EditedImage {
    /// Raw image bytes.
    pub data: Vec<u8>,
}

impl EditedImage {
    /// Wraps raw result bytes.
    pub fn new(data: Vec<u8>) -> Self {
        Self { data }
    }

    /// Returns the size of the image data in bytes.
    pub fn size(&self) -> usize {
        self.data.len()
    }

    /// Saves the image to the specified path.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        std::fs::write(path, &self.data)?;
        Ok(())
    }

    /// Encodes the image data as base64.
    pub fn to_base64(&self) -> String {
        base64::engine::general_purpose::STANDARD.encode(&self.data)
    }

    /// Returns the image as a data URL under the fixed output MIME type.
    pub fn to_data_url(&self) -> String {
        format!("data:{};base64,{}", OUTPUT_MIME_TYPE, self.to_base64())
    }
}
