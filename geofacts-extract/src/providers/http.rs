//! Shared HTTP plumbing for provider clients

use crate::error::ProviderError;
use reqwest::StatusCode;
use serde_json::Value;
use std::time::Duration;

const USER_AGENT: &str = concat!("geofacts/", env!("CARGO_PKG_VERSION"));

/// Structured-output calls can take a while on large models
const REQUEST_TIMEOUT_SECS: u64 = 120;

pub fn build_client() -> Result<reqwest::Client, ProviderError> {
    reqwest::Client::builder()
        .user_agent(USER_AGENT)
        .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
        .build()
        .map_err(|e| ProviderError::Network(e.to_string()))
}

/// Send a request and decode the JSON body
///
/// 401/403 map to `InvalidApiKey`, 429 to `RateLimited`, any other
/// non-2xx status to `Api(status, body)`.
pub async fn send_json(request: reqwest::RequestBuilder) -> Result<Value, ProviderError> {
    let response = request
        .send()
        .await
        .map_err(|e| ProviderError::Network(e.to_string()))?;

    let status = response.status();

    if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
        return Err(ProviderError::InvalidApiKey(status.as_u16()));
    }

    if status == StatusCode::TOO_MANY_REQUESTS {
        let error_text = response.text().await.unwrap_or_default();
        return Err(ProviderError::RateLimited(error_text));
    }

    if !status.is_success() {
        let error_text = response.text().await.unwrap_or_default();
        return Err(ProviderError::Api(status.as_u16(), error_text));
    }

    response
        .json::<Value>()
        .await
        .map_err(|e| ProviderError::Parse(e.to_string()))
}
