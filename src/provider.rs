//! Provider configuration for hosted inference endpoints.
//!
//! All three providers speak the OpenAI chat-completions wire format; they
//! differ only in base URL, credential source, and auth scheme. Azure OpenAI
//! additionally routes by deployment name in the path and authenticates with
//! an `api-key` header instead of a bearer token.

use crate::{Error, Result};
use std::env;
use std::fmt;
use std::str::FromStr;

/// GitHub Models inference endpoint (authenticated with a GitHub token).
pub const GITHUB_MODELS_BASE_URL: &str = "https://models.github.ai/inference";

/// Official OpenAI API endpoint.
pub const OPENAI_BASE_URL: &str = "https://api.openai.com/v1";

/// Default Azure OpenAI API version when `AZURE_API_VERSION` is not set.
pub const DEFAULT_AZURE_API_VERSION: &str = "2023-12-01-preview";

/// Supported hosted inference providers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Provider {
    GitHubModels,
    AzureOpenAi,
    OpenAi,
}

impl Provider {
    pub fn as_str(&self) -> &'static str {
        match self {
            Provider::GitHubModels => "github",
            Provider::AzureOpenAi => "azure",
            Provider::OpenAi => "openai",
        }
    }

    /// Model identifier used by the demos when none is given explicitly.
    ///
    /// GitHub Models namespaces models by publisher; Azure uses the bare
    /// deployment name.
    pub fn default_model(&self) -> &'static str {
        match self {
            Provider::GitHubModels => "openai/gpt-4o",
            Provider::AzureOpenAi => "gpt-4o",
            Provider::OpenAi => "gpt-4o",
        }
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Provider {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "github" => Ok(Provider::GitHubModels),
            "azure" => Ok(Provider::AzureOpenAi),
            "openai" | "local" => Ok(Provider::OpenAi),
            other => Err(Error::Configuration(format!(
                "Unsupported provider '{}' (expected: github, azure, openai)",
                other
            ))),
        }
    }
}

/// Resolved endpoint and credential for one provider.
#[derive(Debug, Clone)]
pub struct ProviderConfig {
    pub provider: Provider,
    pub base_url: String,
    pub api_key: String,
    /// Only meaningful for Azure OpenAI.
    pub api_version: Option<String>,
}

impl ProviderConfig {
    /// Build a config from explicit values.
    ///
    /// Used by tests (mock servers) and self-hosted OpenAI-compatible
    /// gateways. Azure gets the default API version unless overridden via
    /// [`ProviderConfig::with_api_version`].
    pub fn new(
        provider: Provider,
        base_url: impl Into<String>,
        api_key: impl Into<String>,
    ) -> Self {
        let api_version = match provider {
            Provider::AzureOpenAi => Some(DEFAULT_AZURE_API_VERSION.to_string()),
            _ => None,
        };
        Self {
            provider,
            base_url: base_url.into(),
            api_key: api_key.into(),
            api_version,
        }
    }

    /// Resolve endpoint and credential from the environment.
    ///
    /// - GitHub Models: `GITHUB_TOKEN`
    /// - Azure OpenAI: `AZURE_ENDPOINT`, `AZURE_API_KEY`, optional `AZURE_API_VERSION`
    /// - OpenAI: `OPENAI_API_KEY`
    pub fn from_env(provider: Provider) -> Result<Self> {
        match provider {
            Provider::GitHubModels => {
                let api_key = require_env("GITHUB_TOKEN")?;
                Ok(Self::new(provider, GITHUB_MODELS_BASE_URL, api_key))
            }
            Provider::AzureOpenAi => {
                let base_url = require_env("AZURE_ENDPOINT")?;
                let api_key = require_env("AZURE_API_KEY")?;
                let api_version = env::var("AZURE_API_VERSION")
                    .unwrap_or_else(|_| DEFAULT_AZURE_API_VERSION.to_string());
                Ok(Self::new(provider, base_url, api_key).with_api_version(api_version))
            }
            Provider::OpenAi => {
                let api_key = require_env("OPENAI_API_KEY")?;
                Ok(Self::new(provider, OPENAI_BASE_URL, api_key))
            }
        }
    }

    pub fn with_api_version(mut self, api_version: impl Into<String>) -> Self {
        self.api_version = Some(api_version.into());
        self
    }

    /// Full URL for a chat completion request against `model`.
    pub fn chat_completions_url(&self, model: &str) -> String {
        let base = self.base_url.trim_end_matches('/');
        match self.provider {
            Provider::AzureOpenAi => {
                let version = self
                    .api_version
                    .as_deref()
                    .unwrap_or(DEFAULT_AZURE_API_VERSION);
                format!(
                    "{}/openai/deployments/{}/chat/completions?api-version={}",
                    base, model, version
                )
            }
            _ => format!("{}/chat/completions", base),
        }
    }

    /// Attach the provider's auth scheme to an outgoing request.
    pub fn apply_auth(&self, req: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match self.provider {
            Provider::AzureOpenAi => req.header("api-key", &self.api_key),
            _ => req.bearer_auth(&self.api_key),
        }
    }

    /// Whether the request body should carry a `model` field.
    ///
    /// Azure routes by deployment name in the URL, so the body omits it.
    pub fn model_in_body(&self) -> bool {
        !matches!(self.provider, Provider::AzureOpenAi)
    }
}

fn require_env(name: &str) -> Result<String> {
    match env::var(name) {
        Ok(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(Error::Configuration(format!(
            "{} not set in environment",
            name
        ))),
    }
}
