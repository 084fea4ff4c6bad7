//! # hosted-models
//!
//! Client library and demos for hosted large-language-model inference
//! endpoints: GitHub Models, Azure OpenAI, and OpenAI.
//!
//! ## Overview
//!
//! This crate covers two use cases against OpenAI-compatible chat-completion
//! APIs:
//!
//! - **Structured output**: generate a JSON schema for a Rust type, request a
//!   completion constrained to it, validate the response against the schema,
//!   and deserialize it into the type.
//! - **Multimodal chat**: send text+image messages, with images referenced by
//!   URL, loaded from local files, or fetched over HTTP and embedded as
//!   base64 data URIs.
//!
//! Each request is a single HTTP round trip. There is no retry, streaming,
//! caching, or concurrency machinery here; the crate is deliberately a thin,
//! well-typed layer over the wire format.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use hosted_models::{create_agent, Agent, Provider};
//! use schemars::JsonSchema;
//! use serde::Deserialize;
//!
//! #[derive(Debug, Deserialize, JsonSchema)]
//! struct CityLocation {
//!     city: String,
//!     country: String,
//! }
//!
//! #[tokio::main]
//! async fn main() -> hosted_models::Result<()> {
//!     let agent: Agent<CityLocation> = create_agent(Provider::GitHubModels)?;
//!     let run = agent.run("Where were the olympics held in 2012?").await?;
//!     println!("{:?}", run.output);
//!     println!("{}", run.usage);
//!     Ok(())
//! }
//! ```
//!
//! ## Module Organization
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`provider`] | Provider endpoints, credentials, and auth schemes |
//! | [`transport`] | Single-request HTTP layer over reqwest |
//! | [`types`] | OpenAI wire-format messages and responses |
//! | [`client`] | Chat completion client and request builder |
//! | [`structured`] | Schema generation, JSON extraction, schema validation |
//! | [`agent`] | Typed structured-output agent |
//! | [`multimodal`] | Image inputs for vision chat |

pub mod agent;
pub mod client;
pub mod multimodal;
pub mod provider;
pub mod structured;
pub mod transport;
pub mod types;

// Re-export main types for convenience
pub use agent::{create_agent, Agent, AgentBuilder, AgentRun, SchemaMode};
pub use client::{ChatClient, ChatClientBuilder};
pub use multimodal::ImageInput;
pub use provider::{Provider, ProviderConfig};
pub use types::message::{ContentPart, Message, MessageContent, MessageRole};
pub use types::response::{ChatResponse, FinishReason, Usage};

/// Result type alias for the library
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for the library
pub mod error;
pub use error::Error;
