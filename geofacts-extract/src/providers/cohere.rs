//! Cohere v2 chat with JSON-schema constrained output
//!
//! Cohere rejects `maxLength` in schemas, so schemas are built without it
//! and long strings are truncated after parsing instead.

use super::http::{build_client, send_json};
use super::parse;
use super::{LlmProvider, ProviderConfig};
use crate::error::ProviderError;
use crate::models::{CityInfo, CountryInfo, ModelIdentity};
use crate::prompts;
use async_trait::async_trait;
use serde_json::{json, Value};

pub const BASE_URL: &str = "https://api.cohere.com";
pub const DEFAULT_MODEL: &str = "command-r-plus-08-2024";

const NAME: &str = "Cohere";

pub struct CohereProvider {
    http_client: reqwest::Client,
    endpoint: String,
    api_key: String,
    model: String,
}

impl CohereProvider {
    pub fn new(config: ProviderConfig) -> Result<Self, ProviderError> {
        Ok(Self {
            http_client: build_client()?,
            endpoint: format!("{}/v2/chat", config.base_url.trim_end_matches('/')),
            api_key: config.api_key,
            model: config.model,
        })
    }

    async fn chat(&self, system: &str, user: &str, schema: Value) -> Result<String, ProviderError> {
        let body = json!({
            "model": self.model,
            "messages": [
                {"role": "system", "content": system},
                {"role": "user", "content": user},
            ],
            "response_format": {"type": "json_object", "json_schema": schema},
        });

        let response = send_json(
            self.http_client
                .post(&self.endpoint)
                .bearer_auth(&self.api_key)
                .json(&body),
        )
        .await?;

        Ok(message_text(&response))
    }
}

/// Concatenated text items of `message.content`
pub fn message_text(response: &Value) -> String {
    response["message"]["content"]
        .as_array()
        .into_iter()
        .flatten()
        .filter_map(|item| item["text"].as_str())
        .collect()
}

#[async_trait]
impl LlmProvider for CohereProvider {
    fn name(&self) -> &'static str {
        NAME
    }

    fn model(&self) -> &str {
        &self.model
    }

    async fn model_identity(&self) -> Result<ModelIdentity, ProviderError> {
        Ok(ModelIdentity::new(NAME, self.model.as_str()))
    }

    async fn country_info(&self, country: &str) -> Result<CountryInfo, ProviderError> {
        let content = self
            .chat(
                prompts::COUNTRY_SYSTEM_PROMPT,
                &prompts::country_user_prompt(country),
                prompts::country_json_schema(false),
            )
            .await?;
        parse::parse_country(&content, NAME, true)
    }

    async fn cities_info(&self, country: &str) -> Result<Vec<CityInfo>, ProviderError> {
        let content = self
            .chat(
                prompts::CITY_SYSTEM_PROMPT,
                &prompts::cities_user_prompt(country),
                prompts::cities_json_schema(false),
            )
            .await?;
        parse::parse_cities(&content, NAME, true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_text() {
        let response = json!({
            "message": {"role": "assistant", "content": [{"type": "text", "text": "{}"}]}
        });
        assert_eq!(message_text(&response), "{}");
    }

    #[tokio::test]
    async fn test_identity_is_fixed() {
        let provider = CohereProvider::new(ProviderConfig {
            api_key: "co-key".into(),
            model: DEFAULT_MODEL.into(),
            base_url: BASE_URL.into(),
        })
        .unwrap();

        let identity = provider.model_identity().await.unwrap();
        assert_eq!(identity.model_provider, "Cohere");
        assert_eq!(identity.model_name, "command-r-plus-08-2024");
    }

    #[tokio::test]
    async fn test_continent_unsupported() {
        let provider = CohereProvider::new(ProviderConfig {
            api_key: "co-key".into(),
            model: DEFAULT_MODEL.into(),
            base_url: BASE_URL.into(),
        })
        .unwrap();

        let err = provider.continent_info("Africa").await.unwrap_err();
        assert!(err.is_permanent());
        assert_eq!(err.to_string(), "Cohere does not support continent info");
    }
}
