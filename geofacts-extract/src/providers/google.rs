//! Google Gemini `generateContent`
//!
//! JSON output is requested with `responseMimeType: application/json` and
//! parsed as returned.

use super::http::{build_client, send_json};
use super::parse;
use super::{LlmProvider, ProviderConfig};
use crate::error::ProviderError;
use crate::models::{CityInfo, ContinentInfo, CountryInfo, ModelIdentity};
use crate::prompts;
use async_trait::async_trait;
use serde_json::{json, Value};

pub const BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";

const NAME: &str = "Google";
const IDENTITY_MAX_TOKENS: u32 = 100;
const CONTINENT_MAX_TOKENS: u32 = 500;

pub struct GoogleProvider {
    http_client: reqwest::Client,
    base_url: String,
    api_key: String,
    model: String,
}

impl GoogleProvider {
    pub fn new(config: ProviderConfig) -> Result<Self, ProviderError> {
        Ok(Self {
            http_client: build_client()?,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key,
            model: config.model,
        })
    }

    async fn generate(
        &self,
        system: Option<&str>,
        prompt: &str,
        json_output: bool,
        max_tokens: Option<u32>,
    ) -> Result<String, ProviderError> {
        let mut generation_config = serde_json::Map::new();
        if json_output {
            generation_config.insert("responseMimeType".into(), json!("application/json"));
        }
        if let Some(max_tokens) = max_tokens {
            generation_config.insert("maxOutputTokens".into(), json!(max_tokens));
        }

        let mut body = json!({
            "contents": [{"role": "user", "parts": [{"text": prompt}]}],
            "generationConfig": generation_config,
        });
        if let Some(system) = system {
            body["systemInstruction"] = json!({"parts": [{"text": system}]});
        }

        let url = format!("{}/models/{}:generateContent", self.base_url, self.model);
        let response = send_json(
            self.http_client
                .post(url)
                .query(&[("key", self.api_key.as_str())])
                .json(&body),
        )
        .await?;

        Ok(candidate_text(&response))
    }
}

/// Concatenated text parts of the first candidate
pub fn candidate_text(response: &Value) -> String {
    response["candidates"][0]["content"]["parts"]
        .as_array()
        .into_iter()
        .flatten()
        .filter_map(|part| part["text"].as_str())
        .collect()
}

#[async_trait]
impl LlmProvider for GoogleProvider {
    fn name(&self) -> &'static str {
        NAME
    }

    fn model(&self) -> &str {
        &self.model
    }

    async fn model_identity(&self) -> Result<ModelIdentity, ProviderError> {
        let content = self
            .generate(None, prompts::IDENTITY_PROMPT, false, Some(IDENTITY_MAX_TOKENS))
            .await?;
        parse::parse_identity(&content)
    }

    async fn continent_info(&self, continent: &str) -> Result<ContinentInfo, ProviderError> {
        let content = self
            .generate(
                Some(prompts::CONTINENT_SYSTEM_PROMPT),
                &prompts::continent_user_prompt(continent),
                true,
                Some(CONTINENT_MAX_TOKENS),
            )
            .await?;
        parse::parse_continent(&content, NAME, false)
    }

    async fn country_info(&self, country: &str) -> Result<CountryInfo, ProviderError> {
        let content = self
            .generate(
                Some(prompts::COUNTRY_SYSTEM_PROMPT),
                &prompts::country_user_prompt(country),
                true,
                None,
            )
            .await?;
        parse::parse_country(&content, NAME, false)
    }

    async fn cities_info(&self, country: &str) -> Result<Vec<CityInfo>, ProviderError> {
        let content = self
            .generate(
                Some(prompts::CITY_SYSTEM_PROMPT),
                &prompts::cities_user_prompt(country),
                true,
                None,
            )
            .await?;
        parse::parse_cities(&content, NAME, false)
    }
}
