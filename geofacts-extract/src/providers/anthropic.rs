//! Anthropic Messages API with forced tool use
//!
//! Country and city answers are requested as a call to a single tool
//! (`tool_choice: {type: "tool"}`), so the structured input arrives already
//! parsed in the `tool_use` content block.

use super::http::{build_client, send_json};
use super::parse;
use super::{LlmProvider, ProviderConfig};
use crate::error::ProviderError;
use crate::models::{CityInfo, CountryInfo, ModelIdentity};
use crate::prompts;
use async_trait::async_trait;
use serde_json::{json, Value};

pub const BASE_URL: &str = "https://api.anthropic.com";
pub const DEFAULT_MODEL: &str = "claude-haiku-4-5";
pub const API_VERSION: &str = "2023-06-01";

const NAME: &str = "Anthropic";
const IDENTITY_MAX_TOKENS: u32 = 100;
const COUNTRY_MAX_TOKENS: u32 = 1500;
const CITIES_MAX_TOKENS: u32 = 3000;

pub struct AnthropicProvider {
    http_client: reqwest::Client,
    endpoint: String,
    api_key: String,
    model: String,
}

impl AnthropicProvider {
    pub fn new(config: ProviderConfig) -> Result<Self, ProviderError> {
        Ok(Self {
            http_client: build_client()?,
            endpoint: format!("{}/v1/messages", config.base_url.trim_end_matches('/')),
            api_key: config.api_key,
            model: config.model,
        })
    }

    async fn send(&self, body: &Value) -> Result<Value, ProviderError> {
        send_json(
            self.http_client
                .post(&self.endpoint)
                .header("x-api-key", &self.api_key)
                .header("anthropic-version", API_VERSION)
                .json(body),
        )
        .await
    }

    /// Force a call to `tool` and return its input
    async fn call_tool(
        &self,
        system: &str,
        user: &str,
        tool: Value,
        tool_name: &str,
        max_tokens: u32,
    ) -> Result<Value, ProviderError> {
        let body = json!({
            "model": self.model,
            "max_tokens": max_tokens,
            "system": system,
            "messages": [{"role": "user", "content": user}],
            "tools": [tool],
            "tool_choice": {"type": "tool", "name": tool_name},
        });

        let response = self.send(&body).await?;
        tool_input(&response, tool_name)
    }
}

/// Input of the first `tool_use` block naming `tool_name`
pub fn tool_input(response: &Value, tool_name: &str) -> Result<Value, ProviderError> {
    response["content"]
        .as_array()
        .into_iter()
        .flatten()
        .find(|block| block["type"] == "tool_use" && block["name"] == tool_name)
        .map(|block| block["input"].clone())
        .ok_or_else(|| ProviderError::ToolNotUsed(tool_name.to_string()))
}

/// Concatenated `text` blocks
pub fn text_content(response: &Value) -> String {
    response["content"]
        .as_array()
        .into_iter()
        .flatten()
        .filter(|block| block["type"] == "text")
        .filter_map(|block| block["text"].as_str())
        .collect()
}

#[async_trait]
impl LlmProvider for AnthropicProvider {
    fn name(&self) -> &'static str {
        NAME
    }

    fn model(&self) -> &str {
        &self.model
    }

    async fn model_identity(&self) -> Result<ModelIdentity, ProviderError> {
        let body = json!({
            "model": self.model,
            "max_tokens": IDENTITY_MAX_TOKENS,
            "messages": [{"role": "user", "content": prompts::IDENTITY_PROMPT}],
        });
        let response = self.send(&body).await?;
        parse::parse_identity(&text_content(&response))
    }

    async fn country_info(&self, country: &str) -> Result<CountryInfo, ProviderError> {
        let input = self
            .call_tool(
                prompts::COUNTRY_SYSTEM_PROMPT,
                &prompts::country_user_prompt(country),
                prompts::country_tool(),
                prompts::COUNTRY_TOOL_NAME,
                COUNTRY_MAX_TOKENS,
            )
            .await?;
        parse::country_from_value(input, NAME)
    }

    async fn cities_info(&self, country: &str) -> Result<Vec<CityInfo>, ProviderError> {
        let input = self
            .call_tool(
                prompts::CITY_SYSTEM_PROMPT,
                &prompts::cities_user_prompt(country),
                prompts::cities_tool(),
                prompts::CITIES_TOOL_NAME,
                CITIES_MAX_TOKENS,
            )
            .await?;
        parse::cities_from_value(input, NAME)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tool_input_found() {
        let response = json!({
            "content": [
                {"type": "text", "text": "Recording now"},
                {"type": "tool_use", "name": "record_country_info", "input": {"gdp": 1.0}}
            ]
        });
        assert_eq!(
            tool_input(&response, "record_country_info").unwrap(),
            json!({"gdp": 1.0})
        );
    }

    #[test]
    fn test_tool_not_used() {
        let response = json!({"content": [{"type": "text", "text": "Nigeria is..."}]});
        let err = tool_input(&response, "record_cities_info").unwrap_err();
        assert_eq!(err.to_string(), "Claude did not use the record_cities_info tool");
    }

    #[test]
    fn test_text_content() {
        let response = json!({
            "content": [
                {"type": "text", "text": "Model Provider: Anthropic | "},
                {"type": "text", "text": "Model Name: claude-haiku-4-5"}
            ]
        });
        assert_eq!(
            text_content(&response),
            "Model Provider: Anthropic | Model Name: claude-haiku-4-5"
        );
    }
}
