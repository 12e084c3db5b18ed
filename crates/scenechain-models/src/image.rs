//! Inline image payloads.
//!
//! The compute service accepts images as `data:` URLs embedded directly in
//! the job input, so intermediate frames never need to be uploaded anywhere.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use serde::{Deserialize, Serialize};

/// An image encoded as a `data:<mime>;base64,<payload>` URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InlineImage(String);

impl InlineImage {
    /// Encode raw image bytes with the given MIME type.
    pub fn from_bytes(mime: &str, bytes: &[u8]) -> Self {
        Self(format!("data:{};base64,{}", mime, BASE64.encode(bytes)))
    }

    /// Encode raw JPEG bytes (the transfer form of extracted frames).
    pub fn jpeg(bytes: &[u8]) -> Self {
        Self::from_bytes("image/jpeg", bytes)
    }

    /// The data URL string, as sent to the compute service.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_bytes_builds_data_url() {
        let img = InlineImage::from_bytes("image/png", b"abc");
        assert_eq!(img.as_str(), "data:image/png;base64,YWJj");
    }

    #[test]
    fn test_jpeg_mime() {
        let img = InlineImage::jpeg(b"frame");
        assert!(img.as_str().starts_with("data:image/jpeg;base64,"));
    }

    #[test]
    fn test_serde_transparent() {
        let img = InlineImage::from_bytes("image/png", b"x");
        let json = serde_json::to_string(&img).unwrap();
        assert_eq!(json, format!("\"{}\"", img.as_str()));
    }
}
