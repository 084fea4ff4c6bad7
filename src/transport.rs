//! Single-request HTTP layer over reqwest.
//!
//! One POST, one JSON response. Non-2xx statuses are mapped to
//! [`Error::Remote`] with the provider's error message pulled out of the
//! standard `{"error": {"message": ...}}` envelope when present.

use crate::provider::ProviderConfig;
use crate::{Error, Result};
use std::env;
use std::time::Duration;

const DEFAULT_TIMEOUT_SECS: u64 = 30;

#[derive(Debug)]
pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    /// Build a transport. `timeout` overrides the `HM_HTTP_TIMEOUT_SECS`
    /// environment variable (default 30s).
    pub fn new(timeout: Option<Duration>) -> Result<Self> {
        let timeout = timeout.unwrap_or_else(|| {
            let secs = env::var("HM_HTTP_TIMEOUT_SECS")
                .ok()
                .and_then(|s| s.parse::<u64>().ok())
                .unwrap_or(DEFAULT_TIMEOUT_SECS);
            Duration::from_secs(secs)
        });

        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| Error::Transport(TransportError::Other(e.to_string())))?;

        Ok(Self { client })
    }

    /// POST a JSON body with the provider's auth scheme and return the
    /// response JSON.
    pub async fn post_json(
        &self,
        config: &ProviderConfig,
        url: &str,
        body: &serde_json::Value,
    ) -> Result<serde_json::Value> {
        let req = config.apply_auth(self.client.post(url).json(body));

        let response = req
            .send()
            .await
            .map_err(|e| Error::Transport(TransportError::Http(e)))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| Error::Transport(TransportError::Http(e)))?;

        if !status.is_success() {
            return Err(Error::Remote {
                status: status.as_u16(),
                message: extract_error_message(&text),
            });
        }

        serde_json::from_str(&text).map_err(Error::from)
    }
}

/// Pull the human-readable message out of a provider error body, falling back
/// to the raw body.
fn extract_error_message(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| {
            v.pointer("/error/message")
                .and_then(|m| m.as_str())
                .map(String::from)
        })
        .unwrap_or_else(|| body.trim().to_string())
}

#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Transport error: {0}")]
    Other(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_error_message_envelope() {
        let body = r#"{"error": {"message": "Rate limit exceeded", "code": "429"}}"#;
        assert_eq!(extract_error_message(body), "Rate limit exceeded");
    }

    #[test]
    fn test_extract_error_message_raw_fallback() {
        assert_eq!(extract_error_message("Bad Gateway\n"), "Bad Gateway");
        assert_eq!(extract_error_message(r#"{"detail": "no"}"#), r#"{"detail": "no"}"#);
    }
}
