//! OpenAI wire-format request and response types.

pub mod message;
pub mod response;

pub use message::{ContentPart, ImageUrl, Message, MessageContent, MessageRole};
pub use response::{ChatResponse, Choice, FinishReason, ResponseMessage, Usage};
