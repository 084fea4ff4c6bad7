//! Typed structured-output agent.
//!
//! The agent owns the full structured pass: generate the schema for `T`,
//! issue one chat completion constrained to it, extract and validate the JSON
//! payload, deserialize into `T`. No loop, no state between runs.

use crate::client::ChatClient;
use crate::multimodal::ImageInput;
use crate::provider::Provider;
use crate::structured::{
    extract_json, schema_for_type, schema_instruction, ResponseFormat, SchemaValidator,
};
use crate::types::message::{ContentPart, Message};
use crate::types::response::Usage;
use crate::Result;
use schemars::JsonSchema;
use serde::de::DeserializeOwned;
use std::marker::PhantomData;

/// How the schema reaches the model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SchemaMode {
    /// Provider-native `response_format: json_schema` enforcement.
    #[default]
    ResponseFormat,
    /// Schema embedded in a system prompt, paired with `json_object` mode.
    /// For providers or models without native schema support.
    PromptInjection,
}

/// Result of one agent run.
#[derive(Debug, Clone)]
pub struct AgentRun<T> {
    pub output: T,
    pub usage: Usage,
    /// Raw model output, kept for debugging and logging.
    pub raw: String,
}

/// Agent producing schema-validated values of `T` from natural-language
/// prompts.
pub struct Agent<T> {
    client: ChatClient,
    instructions: Option<String>,
    temperature: Option<f64>,
    max_tokens: Option<u32>,
    mode: SchemaMode,
    schema_name: String,
    schema: serde_json::Value,
    validator: SchemaValidator,
    _output: PhantomData<fn() -> T>,
}

impl<T> Agent<T>
where
    T: JsonSchema + DeserializeOwned,
{
    /// Agent with default settings over an existing client.
    pub fn new(client: ChatClient) -> Result<Self> {
        Self::builder().build(client)
    }

    pub fn builder() -> AgentBuilder<T> {
        AgentBuilder::new()
    }

    pub fn schema(&self) -> &serde_json::Value {
        &self.schema
    }

    /// Run a text-only prompt.
    pub async fn run(&self, prompt: impl Into<String>) -> Result<AgentRun<T>> {
        self.run_message(Message::user(prompt.into())).await
    }

    /// Run a prompt alongside an image.
    pub async fn run_with_image(
        &self,
        prompt: impl Into<String>,
        image: ImageInput,
    ) -> Result<AgentRun<T>> {
        let message = Message::user_parts(vec![
            ContentPart::text(prompt.into()),
            image.into_part(),
        ]);
        self.run_message(message).await
    }

    async fn run_message(&self, user_message: Message) -> Result<AgentRun<T>> {
        let mut messages = Vec::new();
        if let Some(instructions) = &self.instructions {
            messages.push(Message::system(instructions.clone()));
        }

        let format = match self.mode {
            SchemaMode::ResponseFormat => ResponseFormat::JsonSchema {
                name: self.schema_name.clone(),
                schema: self.schema.clone(),
                strict: true,
            },
            SchemaMode::PromptInjection => {
                messages.push(Message::system(schema_instruction(&self.schema)));
                ResponseFormat::JsonObject
            }
        };
        messages.push(user_message);

        let mut request = self
            .client
            .chat()
            .messages(messages)
            .response_format(format);
        if let Some(temperature) = self.temperature {
            request = request.temperature(temperature);
        }
        if let Some(max_tokens) = self.max_tokens {
            request = request.max_tokens(max_tokens);
        }

        let response = request.send().await?;
        let raw = response.text()?.to_string();

        let value = extract_json(&raw)?;
        self.validator.validate(&value)?;
        let output: T = serde_json::from_value(value)?;

        tracing::debug!(
            schema = %self.schema_name,
            usage = %response.usage(),
            "structured run complete"
        );

        Ok(AgentRun {
            output,
            usage: response.usage(),
            raw,
        })
    }
}

/// Builder for [`Agent`].
pub struct AgentBuilder<T> {
    instructions: Option<String>,
    temperature: Option<f64>,
    max_tokens: Option<u32>,
    mode: SchemaMode,
    _output: PhantomData<fn() -> T>,
}

impl<T> Default for AgentBuilder<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> AgentBuilder<T> {
    pub fn new() -> Self {
        Self {
            instructions: None,
            temperature: None,
            max_tokens: None,
            mode: SchemaMode::default(),
            _output: PhantomData,
        }
    }

    /// System prompt sent ahead of every run.
    pub fn instructions(mut self, instructions: impl Into<String>) -> Self {
        self.instructions = Some(instructions.into());
        self
    }

    pub fn temperature(mut self, temperature: f64) -> Self {
        self.temperature = Some(temperature);
        self
    }

    pub fn max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = Some(max_tokens);
        self
    }

    pub fn schema_mode(mut self, mode: SchemaMode) -> Self {
        self.mode = mode;
        self
    }
}

impl<T> AgentBuilder<T>
where
    T: JsonSchema + DeserializeOwned,
{
    /// Generate and compile the schema for `T` and bind the agent to a
    /// client.
    pub fn build(self, client: ChatClient) -> Result<Agent<T>> {
        let (schema_name, schema) = schema_for_type::<T>();
        let validator = SchemaValidator::new(&schema)?;
        Ok(Agent {
            client,
            instructions: self.instructions,
            temperature: self.temperature,
            max_tokens: self.max_tokens,
            mode: self.mode,
            schema_name,
            schema,
            validator,
            _output: PhantomData,
        })
    }
}

/// Agent for `T` with credentials from the environment and the provider's
/// default model.
pub fn create_agent<T>(provider: Provider) -> Result<Agent<T>>
where
    T: JsonSchema + DeserializeOwned,
{
    Agent::new(ChatClient::from_env(provider)?)
}
