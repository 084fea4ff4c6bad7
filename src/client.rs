//! Chat completion client.
//!
//! One client per provider+model. Each call is a single request/response pass
//! with no retry or streaming; callers that need resilience should wrap it
//! themselves.

use crate::provider::{Provider, ProviderConfig};
use crate::structured::ResponseFormat;
use crate::transport::HttpTransport;
use crate::types::message::Message;
use crate::types::response::ChatResponse;
use crate::Result;
use std::time::Duration;

/// Client for one provider endpoint and model.
#[derive(Debug)]
pub struct ChatClient {
    transport: HttpTransport,
    config: ProviderConfig,
    model: String,
}

impl ChatClient {
    pub fn builder(provider: Provider) -> ChatClientBuilder {
        ChatClientBuilder::new(provider)
    }

    /// Client with credentials from the environment and the provider's
    /// default model.
    pub fn from_env(provider: Provider) -> Result<Self> {
        Self::builder(provider).build()
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn provider(&self) -> Provider {
        self.config.provider
    }

    /// Start building a chat completion request.
    pub fn chat(&self) -> ChatRequestBuilder<'_> {
        ChatRequestBuilder::new(self)
    }
}

/// Builder for [`ChatClient`].
///
/// `base_url` and `api_key` overrides exist for tests (mock servers) and
/// self-hosted OpenAI-compatible gateways; when both are set the environment
/// is not consulted.
pub struct ChatClientBuilder {
    provider: Provider,
    model: Option<String>,
    base_url: Option<String>,
    api_key: Option<String>,
    api_version: Option<String>,
    timeout: Option<Duration>,
}

impl ChatClientBuilder {
    pub fn new(provider: Provider) -> Self {
        Self {
            provider,
            model: None,
            base_url: None,
            api_key: None,
            api_version: None,
            timeout: None,
        }
    }

    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    pub fn api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    pub fn api_version(mut self, api_version: impl Into<String>) -> Self {
        self.api_version = Some(api_version.into());
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn build(self) -> Result<ChatClient> {
        let mut config = match (&self.base_url, &self.api_key) {
            (Some(base_url), Some(api_key)) => {
                ProviderConfig::new(self.provider, base_url.clone(), api_key.clone())
            }
            _ => {
                let mut config = ProviderConfig::from_env(self.provider)?;
                if let Some(base_url) = self.base_url {
                    config.base_url = base_url;
                }
                if let Some(api_key) = self.api_key {
                    config.api_key = api_key;
                }
                config
            }
        };
        if let Some(api_version) = self.api_version {
            config = config.with_api_version(api_version);
        }

        let model = self
            .model
            .unwrap_or_else(|| self.provider.default_model().to_string());
        let transport = HttpTransport::new(self.timeout)?;

        Ok(ChatClient {
            transport,
            config,
            model,
        })
    }
}

/// Builder for a single chat completion request.
pub struct ChatRequestBuilder<'a> {
    client: &'a ChatClient,
    messages: Vec<Message>,
    temperature: Option<f64>,
    max_tokens: Option<u32>,
    response_format: Option<ResponseFormat>,
}

impl<'a> ChatRequestBuilder<'a> {
    fn new(client: &'a ChatClient) -> Self {
        Self {
            client,
            messages: Vec::new(),
            temperature: None,
            max_tokens: None,
            response_format: None,
        }
    }

    pub fn messages(mut self, messages: Vec<Message>) -> Self {
        self.messages = messages;
        self
    }

    pub fn message(mut self, message: Message) -> Self {
        self.messages.push(message);
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

    pub fn response_format(mut self, format: ResponseFormat) -> Self {
        self.response_format = Some(format);
        self
    }

    /// Send the request and parse the response.
    pub async fn send(self) -> Result<ChatResponse> {
        let client = self.client;
        let url = client.config.chat_completions_url(&client.model);
        let body = self.into_body();

        tracing::debug!(
            provider = %client.config.provider,
            model = %client.model,
            "dispatching chat completion request"
        );

        let json = client.transport.post_json(&client.config, &url, &body).await?;
        let response: ChatResponse = serde_json::from_value(json)?;

        if response.choices.is_empty() {
            tracing::warn!(
                provider = %client.config.provider,
                model = %client.model,
                "chat completion returned no choices"
            );
        }

        Ok(response)
    }

    fn into_body(self) -> serde_json::Value {
        let mut body = serde_json::Map::new();
        if self.client.config.model_in_body() {
            body.insert("model".into(), self.client.model.clone().into());
        }
        body.insert(
            "messages".into(),
            serde_json::to_value(&self.messages).unwrap_or_default(),
        );
        if let Some(temperature) = self.temperature {
            body.insert("temperature".into(), temperature.into());
        }
        if let Some(max_tokens) = self.max_tokens {
            body.insert("max_tokens".into(), max_tokens.into());
        }
        if let Some(format) = self.response_format {
            body.insert("response_format".into(), format.to_request_value());
        }
        body.into()
    }
}
