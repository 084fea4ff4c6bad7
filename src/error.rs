use crate::structured::SchemaViolation;
use thiserror::Error;

/// Unified error type for the crate.
///
/// Aggregates configuration, transport, and response-handling failures into
/// actionable categories. Every fallible operation in the library returns
/// `crate::Result<T>` with this error.
#[derive(Debug, Error)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Network transport error: {0}")]
    Transport(#[from] crate::transport::TransportError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Remote error: HTTP {status}: {message}")]
    Remote { status: u16, message: String },

    #[error("Model refused the request: {0}")]
    Refusal(String),

    #[error("Response truncated by token limit")]
    LengthLimit,

    #[error("Empty response from model")]
    EmptyResponse,

    #[error("Schema validation failed: {}", format_violations(.0))]
    SchemaValidation(Vec<SchemaViolation>),
}

fn format_violations(violations: &[SchemaViolation]) -> String {
    violations
        .iter()
        .map(|v| v.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}
