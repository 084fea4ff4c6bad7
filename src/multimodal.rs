//! Image inputs for vision chat.
//!
//! Three ways to hand an image to a vision model, matching what the hosted
//! endpoints accept in an `image_url` content part:
//! - pass a public URL through unchanged
//! - read a local file and embed it as a base64 `data:` URI
//! - fetch a URL over HTTP first, then embed the bytes (for endpoints that
//!   cannot reach the source themselves)

use crate::transport::TransportError;
use crate::types::message::ContentPart;
use crate::{Error, Result};
use base64::Engine as _;
use std::path::Path;
use std::time::Duration;

const DEFAULT_FETCH_TIMEOUT: Duration = Duration::from_secs(10);

/// An image destined for a chat message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageInput {
    /// Remote URL, passed through for the provider to fetch.
    Url(String),
    /// Inline base64 payload with its media type.
    Data { media_type: String, base64: String },
}

impl ImageInput {
    pub fn url(url: impl Into<String>) -> Self {
        ImageInput::Url(url.into())
    }

    /// Read and encode a local image file. The media type comes from the
    /// file extension.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let media_type = guess_media_type(path).ok_or_else(|| {
            Error::Validation(format!(
                "Unrecognized image extension: {}",
                path.display()
            ))
        })?;
        let bytes = std::fs::read(path)?;
        Ok(ImageInput::Data {
            media_type: media_type.to_string(),
            base64: base64::engine::general_purpose::STANDARD.encode(bytes),
        })
    }

    /// Download an image and encode it inline. The media type comes from the
    /// response `Content-Type` header.
    pub async fn fetch(url: &str) -> Result<Self> {
        Self::fetch_with_timeout(url, DEFAULT_FETCH_TIMEOUT).await
    }

    pub async fn fetch_with_timeout(url: &str, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| Error::Transport(TransportError::Other(e.to_string())))?;

        let response = client
            .get(url)
            .send()
            .await
            .map_err(|e| Error::Transport(TransportError::Http(e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::Remote {
                status: status.as_u16(),
                message: format!("Error fetching image from {}", url),
            });
        }

        let media_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(|v| v.split(';').next().unwrap_or(v).trim().to_string())
            .unwrap_or_default();
        if !media_type.starts_with("image/") {
            return Err(Error::Validation(format!(
                "URL did not return an image (content-type: {})",
                if media_type.is_empty() { "missing" } else { media_type.as_str() }
            )));
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| Error::Transport(TransportError::Http(e)))?;

        Ok(ImageInput::Data {
            media_type,
            base64: base64::engine::general_purpose::STANDARD.encode(&bytes),
        })
    }

    /// Convert into an `image_url` content part.
    pub fn into_part(self) -> ContentPart {
        match self {
            ImageInput::Url(url) => ContentPart::image_url(url),
            ImageInput::Data { media_type, base64 } => {
                ContentPart::image_url(format!("data:{};base64,{}", media_type, base64))
            }
        }
    }
}

fn guess_media_type(path: &Path) -> Option<&'static str> {
    let ext = path
        .extension()
        .and_then(|s| s.to_str())
        .unwrap_or("")
        .to_lowercase();
    match ext.as_str() {
        "png" => Some("image/png"),
        "jpg" | "jpeg" => Some("image/jpeg"),
        "webp" => Some("image/webp"),
        "gif" => Some("image/gif"),
        _ => None,
    }
}
