//! LLM provider adapters
//!
//! Every provider answers the same questions through [`LlmProvider`]:
//! - Q1 which model is answering (identity)
//! - continent facts (OpenAI, Google, Groq and Mistral only)
//! - Q2 country facts
//! - Q3 up to five most populous cities
//!
//! Five providers speak the OpenAI chat-completions dialect and share
//! [`chat::ChatProvider`]; Anthropic, Google and Cohere have their own
//! request shapes.

pub mod ai21;
pub mod anthropic;
pub mod chat;
pub mod cohere;
pub mod deepseek;
pub mod google;
pub mod groq;
pub mod http;
pub mod mistral;
pub mod openai;
pub mod parse;

use crate::error::ProviderError;
use crate::models::{CityInfo, ContinentInfo, CountryInfo, ModelIdentity};
use async_trait::async_trait;
use clap::ValueEnum;
use geofacts_common::config::{resolve_api_key, TomlConfig};
use std::fmt;

/// Structured-output operations every provider supports
#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// Display name, e.g. "OpenAI"
    fn name(&self) -> &'static str;

    /// Model identifier sent with each request
    fn model(&self) -> &str;

    async fn model_identity(&self) -> Result<ModelIdentity, ProviderError>;

    async fn continent_info(&self, _continent: &str) -> Result<ContinentInfo, ProviderError> {
        Err(ProviderError::Unsupported {
            provider: self.name(),
            operation: "continent info",
        })
    }

    async fn country_info(&self, country: &str) -> Result<CountryInfo, ProviderError>;

    async fn cities_info(&self, country: &str) -> Result<Vec<CityInfo>, ProviderError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum)]
pub enum ProviderKind {
    #[value(name = "openai")]
    OpenAi,
    #[value(name = "anthropic")]
    Anthropic,
    #[value(name = "google")]
    Google,
    #[value(name = "cohere")]
    Cohere,
    #[value(name = "deepseek")]
    DeepSeek,
    #[value(name = "groq")]
    Groq,
    #[value(name = "mistral")]
    Mistral,
    #[value(name = "ai21")]
    Ai21,
}

impl ProviderKind {
    pub const ALL: [ProviderKind; 8] = [
        Self::OpenAi,
        Self::Anthropic,
        Self::Google,
        Self::Cohere,
        Self::DeepSeek,
        Self::Groq,
        Self::Mistral,
        Self::Ai21,
    ];

    pub fn display_name(self) -> &'static str {
        match self {
            Self::OpenAi => "OpenAI",
            Self::Anthropic => "Anthropic",
            Self::Google => "Google",
            Self::Cohere => "Cohere",
            Self::DeepSeek => "DeepSeek",
            Self::Groq => "Groq",
            Self::Mistral => "Mistral",
            Self::Ai21 => "AI21",
        }
    }

    /// Lowercase name used on the command line and in `[api_keys]`
    pub fn key(self) -> &'static str {
        match self {
            Self::OpenAi => "openai",
            Self::Anthropic => "anthropic",
            Self::Google => "google",
            Self::Cohere => "cohere",
            Self::DeepSeek => "deepseek",
            Self::Groq => "groq",
            Self::Mistral => "mistral",
            Self::Ai21 => "ai21",
        }
    }

    pub fn env_var(self) -> &'static str {
        match self {
            Self::OpenAi => "OPENAI_API_KEY",
            Self::Anthropic => "ANTHROPIC_API_KEY",
            Self::Google => "GOOGLE_API_KEY",
            Self::Cohere => "CO_API_KEY",
            Self::DeepSeek => "DEEPSEEK_API_KEY",
            Self::Groq => "GROQ_API_KEY",
            Self::Mistral => "MISTRAL_API_KEY",
            Self::Ai21 => "AI21_API_KEY",
        }
    }

    pub fn default_model(self) -> &'static str {
        match self {
            Self::OpenAi => openai::DEFAULT_MODEL,
            Self::Anthropic => anthropic::DEFAULT_MODEL,
            Self::Google => google::DEFAULT_MODEL,
            Self::Cohere => cohere::DEFAULT_MODEL,
            Self::DeepSeek => deepseek::DEFAULT_MODEL,
            Self::Groq => groq::DEFAULT_MODEL,
            Self::Mistral => mistral::DEFAULT_MODEL,
            Self::Ai21 => ai21::DEFAULT_MODEL,
        }
    }

    pub fn default_base_url(self) -> &'static str {
        match self {
            Self::OpenAi => openai::BASE_URL,
            Self::Anthropic => anthropic::BASE_URL,
            Self::Google => google::BASE_URL,
            Self::Cohere => cohere::BASE_URL,
            Self::DeepSeek => deepseek::BASE_URL,
            Self::Groq => groq::BASE_URL,
            Self::Mistral => mistral::BASE_URL,
            Self::Ai21 => ai21::BASE_URL,
        }
    }

    pub fn supports_continent(self) -> bool {
        matches!(self, Self::OpenAi | Self::Google | Self::Groq | Self::Mistral)
    }

    /// Case-insensitive lookup, e.g. an LLM column header from the countries CSV
    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.trim();
        Self::ALL.into_iter().find(|kind| {
            kind.key().eq_ignore_ascii_case(name) || kind.display_name().eq_ignore_ascii_case(name)
        })
    }
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Connection details for one provider
#[derive(Debug, Clone)]
pub struct ProviderConfig {
    pub api_key: String,
    pub model: String,
    pub base_url: String,
}

impl ProviderConfig {
    /// Resolve the key (ENV → TOML `[api_keys]`) and take the default model and endpoint
    pub fn resolve(kind: ProviderKind, toml: &TomlConfig) -> Result<Self, ProviderError> {
        let api_key = resolve_api_key(kind.env_var(), kind.key(), toml)
            .map_err(|_| ProviderError::MissingApiKey(kind.env_var().to_string()))?;

        Ok(Self {
            api_key,
            model: kind.default_model().to_string(),
            base_url: kind.default_base_url().to_string(),
        })
    }
}

/// Construct the adapter for `kind` from an explicit config
pub fn build_provider(
    kind: ProviderKind,
    config: ProviderConfig,
) -> Result<Box<dyn LlmProvider>, ProviderError> {
    let provider: Box<dyn LlmProvider> = match kind {
        ProviderKind::OpenAi => Box::new(openai::provider(config)?),
        ProviderKind::Anthropic => Box::new(anthropic::AnthropicProvider::new(config)?),
        ProviderKind::Google => Box::new(google::GoogleProvider::new(config)?),
        ProviderKind::Cohere => Box::new(cohere::CohereProvider::new(config)?),
        ProviderKind::DeepSeek => Box::new(deepseek::provider(config)?),
        ProviderKind::Groq => Box::new(groq::provider(config)?),
        ProviderKind::Mistral => Box::new(mistral::provider(config)?),
        ProviderKind::Ai21 => Box::new(ai21::provider(config)?),
    };

    tracing::debug!(provider = %kind, model = provider.model(), "Provider initialized");
    Ok(provider)
}

/// Resolve configuration for `kind` and construct its adapter
pub fn create_provider(
    kind: ProviderKind,
    toml: &TomlConfig,
) -> Result<Box<dyn LlmProvider>, ProviderError> {
    build_provider(kind, ProviderConfig::resolve(kind, toml)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_name() {
        assert_eq!(ProviderKind::from_name("OpenAI"), Some(ProviderKind::OpenAi));
        assert_eq!(ProviderKind::from_name("ai21"), Some(ProviderKind::Ai21));
        assert_eq!(ProviderKind::from_name(" DeepSeek "), Some(ProviderKind::DeepSeek));
        assert_eq!(ProviderKind::from_name("llama"), None);
    }

    #[test]
    fn test_clap_names() {
        assert_eq!(
            ProviderKind::from_str("deepseek", true),
            Ok(ProviderKind::DeepSeek)
        );
        assert_eq!(ProviderKind::from_str("openai", true), Ok(ProviderKind::OpenAi));
    }

    #[test]
    fn test_continent_support() {
        let supported: Vec<_> = ProviderKind::ALL
            .into_iter()
            .filter(|k| k.supports_continent())
            .map(ProviderKind::key)
            .collect();
        assert_eq!(supported, ["openai", "google", "groq", "mistral"]);
    }

    #[test]
    fn test_toml_key_used_when_env_missing() {
        let toml = TomlConfig::from_toml_str("[api_keys]\nmistral = \"m-key\"\n").unwrap();
        // Only meaningful if the variable is absent from the test environment
        if std::env::var("MISTRAL_API_KEY").is_err() {
            let config = ProviderConfig::resolve(ProviderKind::Mistral, &toml).unwrap();
            assert_eq!(config.api_key, "m-key");
            assert_eq!(config.model, "mistral-large-latest");
        }
    }
}
