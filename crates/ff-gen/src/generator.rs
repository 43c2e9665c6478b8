//! The generator seam every stage calls through.

use std::path::Path;

use async_trait::async_trait;

use crate::error::GeneratorError;

/// Image bytes sent alongside a prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InlineImage {
    pub mime_type: String,
    pub data: Vec<u8>,
}

impl InlineImage {
    #[must_use]
    pub fn new(mime_type: impl Into<String>, data: Vec<u8>) -> Self {
        Self {
            mime_type: mime_type.into(),
            data,
        }
    }

    /// Read an image file, inferring the MIME type from its extension.
    ///
    /// # Errors
    ///
    /// Returns the I/O error if the file cannot be read.
    pub fn from_file(path: &Path) -> std::io::Result<Self> {
        let data = std::fs::read(path)?;
        Ok(Self::new(mime_for(path), data))
    }
}

/// MIME type for an image path. Unknown extensions are sent as JPEG.
#[must_use]
pub fn mime_for(path: &Path) -> &'static str {
    match path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase)
        .as_deref()
    {
        Some("png") => "image/png",
        Some("webp") => "image/webp",
        Some("gif") => "image/gif",
        _ => "image/jpeg",
    }
}

/// A text generator addressed by model name.
#[async_trait]
pub trait Generator: Send + Sync {
    /// Generate text for `prompt`, optionally grounded on an image.
    async fn generate(
        &self,
        model: &str,
        prompt: &str,
        image: Option<&InlineImage>,
    ) -> Result<String, GeneratorError>;
}

/// Stand-in used when no API key is configured. Every call fails with a
/// non-retryable error, so stages take their deterministic fallbacks where
/// they have one.
#[derive(Debug, Default, Clone, Copy)]
pub struct UnconfiguredGenerator;

#[async_trait]
impl Generator for UnconfiguredGenerator {
    async fn generate(
        &self,
        _model: &str,
        _prompt: &str,
        _image: Option<&InlineImage>,
    ) -> Result<String, GeneratorError> {
        Err(GeneratorError::unknown(
            "generator not configured: set gemini.api_key or FIELDFIX_GEMINI__API_KEY",
        ))
    }
}
