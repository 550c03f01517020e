//! OpenAI-compatible chat-completions adapter
//!
//! OpenAI, DeepSeek, Groq, Mistral and AI21 accept the same request
//! (`POST {base}/chat/completions` with bearer auth and
//! `response_format: json_object`) and return the answer in
//! `choices[0].message.content`. What differs between them is captured in
//! a [`ChatProfile`].

use super::http::{build_client, send_json};
use super::parse;
use super::{LlmProvider, ProviderConfig};
use crate::error::ProviderError;
use crate::models::{CityInfo, ContinentInfo, CountryInfo, ModelIdentity};
use crate::prompts;
use async_trait::async_trait;
use serde_json::{json, Value};

/// Token cap for the identity question
const IDENTITY_MAX_TOKENS: u32 = 100;
const CONTINENT_MAX_TOKENS: u32 = 500;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdentitySource {
    /// Ask the model and parse its self-description
    AskModel,
    /// Report the configured provider and model; self-reports are unreliable
    Fixed,
}

/// Per-provider behaviour on top of the shared request shape
#[derive(Debug, Clone, Copy)]
pub struct ChatProfile {
    pub name: &'static str,
    pub identity: IdentitySource,
    /// Run extract + sanitize before parsing
    pub repair_json: bool,
    pub supports_continent: bool,
    pub country_max_tokens: Option<u32>,
    pub cities_max_tokens: Option<u32>,
}

pub struct ChatProvider {
    profile: ChatProfile,
    http_client: reqwest::Client,
    endpoint: String,
    api_key: String,
    model: String,
}

impl ChatProvider {
    pub fn new(profile: ChatProfile, config: ProviderConfig) -> Result<Self, ProviderError> {
        Ok(Self {
            profile,
            http_client: build_client()?,
            endpoint: format!("{}/chat/completions", config.base_url.trim_end_matches('/')),
            api_key: config.api_key,
            model: config.model,
        })
    }

    pub fn profile(&self) -> &ChatProfile {
        &self.profile
    }

    /// One chat completion; returns the message text (empty if the model sent none)
    async fn complete(
        &self,
        system: Option<&str>,
        user: &str,
        json_mode: bool,
        max_tokens: Option<u32>,
    ) -> Result<String, ProviderError> {
        let mut messages = Vec::with_capacity(2);
        if let Some(system) = system {
            messages.push(json!({"role": "system", "content": system}));
        }
        messages.push(json!({"role": "user", "content": user}));

        let mut body = json!({
            "model": self.model,
            "messages": messages,
        });
        if json_mode {
            body["response_format"] = json!({"type": "json_object"});
        }
        if let Some(max_tokens) = max_tokens {
            body["max_tokens"] = json!(max_tokens);
        }

        tracing::debug!(provider = self.profile.name, model = %self.model, "Sending chat completion");

        let response = send_json(
            self.http_client
                .post(&self.endpoint)
                .bearer_auth(&self.api_key)
                .json(&body),
        )
        .await?;

        Ok(message_content(&response))
    }
}

/// `choices[0].message.content`, or empty
pub fn message_content(response: &Value) -> String {
    response["choices"][0]["message"]["content"]
        .as_str()
        .unwrap_or_default()
        .to_string()
}

#[async_trait]
impl LlmProvider for ChatProvider {
    fn name(&self) -> &'static str {
        self.profile.name
    }

    fn model(&self) -> &str {
        &self.model
    }

    async fn model_identity(&self) -> Result<ModelIdentity, ProviderError> {
        match self.profile.identity {
            IdentitySource::Fixed => Ok(ModelIdentity::new(self.profile.name, self.model.as_str())),
            IdentitySource::AskModel => {
                let content = self
                    .complete(None, prompts::IDENTITY_PROMPT, false, Some(IDENTITY_MAX_TOKENS))
                    .await?;
                parse::parse_identity(&content)
            }
        }
    }

    async fn continent_info(&self, continent: &str) -> Result<ContinentInfo, ProviderError> {
        if !self.profile.supports_continent {
            return Err(ProviderError::Unsupported {
                provider: self.profile.name,
                operation: "continent info",
            });
        }

        let content = self
            .complete(
                Some(prompts::CONTINENT_SYSTEM_PROMPT),
                &prompts::continent_user_prompt(continent),
                true,
                Some(CONTINENT_MAX_TOKENS),
            )
            .await?;
        parse::parse_continent(&content, self.profile.name, self.profile.repair_json)
    }

    async fn country_info(&self, country: &str) -> Result<CountryInfo, ProviderError> {
        let content = self
            .complete(
                Some(prompts::COUNTRY_SYSTEM_PROMPT),
                &prompts::country_user_prompt(country),
                true,
                self.profile.country_max_tokens,
            )
            .await?;
        parse::parse_country(&content, self.profile.name, self.profile.repair_json)
    }

    async fn cities_info(&self, country: &str) -> Result<Vec<CityInfo>, ProviderError> {
        let content = self
            .complete(
                Some(prompts::CITY_SYSTEM_PROMPT),
                &prompts::cities_user_prompt(country),
                true,
                self.profile.cities_max_tokens,
            )
            .await?;
        parse::parse_cities(&content, self.profile.name, self.profile.repair_json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_content() {
        let response = json!({"choices": [{"message": {"role": "assistant", "content": "{\"a\": 1}"}}]});
        assert_eq!(message_content(&response), "{\"a\": 1}");
        assert_eq!(message_content(&json!({"choices": []})), "");
    }

    #[test]
    fn test_endpoint_trailing_slash() {
        let provider = ChatProvider::new(
            super::super::groq::PROFILE,
            ProviderConfig {
                api_key: "k".into(),
                model: "m".into(),
                base_url: "http://localhost:1234/v1/".into(),
            },
        )
        .unwrap();
        assert_eq!(provider.endpoint, "http://localhost:1234/v1/chat/completions");
    }
}
