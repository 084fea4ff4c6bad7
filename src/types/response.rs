//! Chat completion response types.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Parsed chat completion response.
#[derive(Debug, Clone, Deserialize)]
pub struct ChatResponse {
    pub choices: Vec<Choice>,
    #[serde(default)]
    pub usage: Option<Usage>,
    #[serde(default)]
    pub model: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Choice {
    pub message: ResponseMessage,
    #[serde(default)]
    pub finish_reason: Option<FinishReason>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ResponseMessage {
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub refusal: Option<String>,
}

/// Why the model stopped generating.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FinishReason {
    Stop,
    Length,
    ContentFilter,
    ToolCalls,
    #[serde(other)]
    Other,
}

/// Token accounting for one request.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Usage {
    #[serde(default)]
    pub prompt_tokens: u32,
    #[serde(default)]
    pub completion_tokens: u32,
    #[serde(default)]
    pub total_tokens: u32,
}

impl fmt::Display for Usage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Usage(requests=1, request_tokens={}, response_tokens={}, total_tokens={})",
            self.prompt_tokens, self.completion_tokens, self.total_tokens
        )
    }
}

impl ChatResponse {
    /// Content of the first choice.
    ///
    /// A refusal maps to [`Error::Refusal`], a `length` finish reason to
    /// [`Error::LengthLimit`] (truncated output is useless for structured
    /// parsing), and missing content to [`Error::EmptyResponse`].
    pub fn text(&self) -> Result<&str> {
        let choice = self.choices.first().ok_or(Error::EmptyResponse)?;

        if let Some(refusal) = &choice.message.refusal {
            return Err(Error::Refusal(refusal.clone()));
        }
        if choice.finish_reason == Some(FinishReason::Length) {
            return Err(Error::LengthLimit);
        }

        match &choice.message.content {
            Some(content) if !content.trim().is_empty() => Ok(content),
            _ => Err(Error::EmptyResponse),
        }
    }

    /// Token usage, zeroed when the provider omits it.
    pub fn usage(&self) -> Usage {
        self.usage.unwrap_or_default()
    }
}
