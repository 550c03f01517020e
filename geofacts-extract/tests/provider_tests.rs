//! Provider adapters against a mock HTTP server
//!
//! Each test points one adapter at a wiremock server standing in for the
//! vendor API and checks request routing plus response handling.

use geofacts_extract::prompts;
use geofacts_extract::providers::{build_provider, LlmProvider, ProviderConfig, ProviderKind};
use geofacts_extract::retry::{with_retry, RetryPolicy};
use geofacts_extract::ProviderError;
use serde_json::{json, Value};
use std::time::Duration;
use wiremock::matchers::{body_partial_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn country_json() -> Value {
    json!({
        "description": "A West African country",
        "interesting_fact": "Most populous country in Africa",
        "area_sq_mile": 356669.0,
        "area_sq_km": 923768.0,
        "population": 223800000,
        "ppp": 5860.0,
        "life_expectancy": 53.9,
        "travel_risk_level": "Level 3: Reconsider Travel",
        "global_peace_index_score": 2.7,
        "global_peace_index_rank": 147,
        "happiness_index_score": 4.9,
        "happiness_index_rank": 95,
        "gdp": 477000000000.0,
        "gdp_growth_rate": 2.9,
        "inflation_rate": 24.7,
        "unemployment_rate": 5.0,
        "govt_debt": 38.0,
        "credit_rating": "B-",
        "poverty_rate": 40.1,
        "gini_coefficient": 35.1,
        "military_spending": 0.6
    })
}

fn cities_json() -> Value {
    json!({
        "cities": [
            {
                "name": "Abuja",
                "is_capital": true,
                "description": "Planned capital city",
                "interesting_fact": "Became the capital in 1991",
                "area_sq_mile": 2824.0,
                "area_sq_km": 7315.0,
                "population": 3840000,
                "airport_code": "ABV"
            },
            {
                "name": "Lagos",
                "is_capital": false,
                "description": "Largest city in Nigeria",
                "interesting_fact": "Hosts Africa's busiest port",
                "area_sq_mile": 452.0,
                "area_sq_km": 1171.0,
                "population": 15400000,
                "airport_code": "LO"
            }
        ]
    })
}

fn chat_completion(content: &str) -> Value {
    json!({
        "id": "chatcmpl-1",
        "choices": [{"index": 0, "message": {"role": "assistant", "content": content}}]
    })
}

fn provider_for(kind: ProviderKind, server: &MockServer) -> Box<dyn LlmProvider> {
    build_provider(
        kind,
        ProviderConfig {
            api_key: "test-key".to_string(),
            model: kind.default_model().to_string(),
            base_url: server.uri(),
        },
    )
    .unwrap()
}

fn fast_policy() -> RetryPolicy {
    RetryPolicy {
        max_attempts: 3,
        retry_delay: Duration::from_millis(1),
        rate_limit_delay: Duration::from_millis(1),
    }
}

#[tokio::test]
async fn test_openai_country_info() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .and(header("authorization", "Bearer test-key"))
        .and(body_partial_json(json!({
            "model": ProviderKind::OpenAi.default_model(),
            "messages": [{"role": "system", "content": prompts::COUNTRY_SYSTEM_PROMPT}],
            "response_format": {"type": "json_object"}
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(chat_completion(
            &country_json().to_string(),
        )))
        .expect(1)
        .mount(&server)
        .await;

    let provider = provider_for(ProviderKind::OpenAi, &server);
    let info = provider.country_info("Nigeria").await.unwrap();

    assert_eq!(info.population, 223_800_000);
    assert_eq!(info.credit_rating, "B-");
}

#[tokio::test]
async fn test_openai_model_identity() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(chat_completion(
            "Model Provider: OpenAI | Model Name: gpt-4o-mini",
        )))
        .mount(&server)
        .await;

    let provider = provider_for(ProviderKind::OpenAi, &server);
    let identity = provider.model_identity().await.unwrap();

    assert_eq!(identity.model_provider, "OpenAI");
    assert_eq!(identity.model_name, "gpt-4o-mini");
}

#[tokio::test]
async fn test_cities_clear_short_airport_code() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .and(body_partial_json(json!({"response_format": {"type": "json_object"}})))
        .respond_with(ResponseTemplate::new(200).set_body_json(chat_completion(
            &cities_json().to_string(),
        )))
        .mount(&server)
        .await;

    let provider = provider_for(ProviderKind::Groq, &server);
    let cities = provider.cities_info("Nigeria").await.unwrap();

    assert_eq!(cities.len(), 2);
    assert!(cities[0].is_capital);
    assert_eq!(cities[0].airport_code.as_deref(), Some("ABV"));
    assert_eq!(cities[1].airport_code, None);
}

#[tokio::test]
async fn test_unauthorized_is_invalid_api_key() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(401).set_body_string("bad key"))
        .mount(&server)
        .await;

    let provider = provider_for(ProviderKind::Mistral, &server);
    let err = provider.country_info("France").await.unwrap_err();

    assert!(matches!(err, ProviderError::InvalidApiKey(401)));
    assert!(err.is_permanent());
}

#[tokio::test]
async fn test_too_many_requests_is_rate_limited() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(429).set_body_string("slow down"))
        .mount(&server)
        .await;

    let provider = provider_for(ProviderKind::DeepSeek, &server);
    let err = provider.country_info("China").await.unwrap_err();

    assert!(matches!(err, ProviderError::RateLimited(_)));
    assert!(err.is_rate_limited());
}

#[tokio::test]
async fn test_server_error_carries_status() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(503).set_body_string("overloaded"))
        .mount(&server)
        .await;

    let provider = provider_for(ProviderKind::OpenAi, &server);
    let err = provider.country_info("Chile").await.unwrap_err();

    match err {
        ProviderError::Api(status, body) => {
            assert_eq!(status, 503);
            assert_eq!(body, "overloaded");
        }
        other => panic!("expected Api error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_empty_object_is_empty_response() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(chat_completion("{}")))
        .mount(&server)
        .await;

    let provider = provider_for(ProviderKind::OpenAi, &server);
    let err = provider.country_info("Peru").await.unwrap_err();

    assert!(matches!(err, ProviderError::EmptyResponse(_)));
}

#[tokio::test]
async fn test_ai21_repairs_fenced_json() {
    let server = MockServer::start().await;
    let body = format!(
        "Here you go:\n```json\n{}\n```",
        country_json()
            .to_string()
            .replace("223800000", "223,800,000")
    );
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .and(body_partial_json(json!({
            "max_tokens": 1000,
            "response_format": {"type": "json_object"}
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(chat_completion(&body)))
        .mount(&server)
        .await;

    let provider = provider_for(ProviderKind::Ai21, &server);
    let info = provider.country_info("Nigeria").await.unwrap();

    assert_eq!(info.population, 223_800_000);
}

#[tokio::test]
async fn test_ai21_identity_needs_no_request() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500))
        .expect(0)
        .mount(&server)
        .await;

    let provider = provider_for(ProviderKind::Ai21, &server);
    let identity = provider.model_identity().await.unwrap();

    assert_eq!(identity.model_provider, "AI21");
    assert_eq!(identity.model_name, ProviderKind::Ai21.default_model());
}

#[tokio::test]
async fn test_anthropic_tool_use() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/messages"))
        .and(header("x-api-key", "test-key"))
        .and(header("anthropic-version", "2023-06-01"))
        .and(body_partial_json(json!({
            "max_tokens": 1500,
            "system": prompts::COUNTRY_SYSTEM_PROMPT,
            "tools": [{"name": prompts::COUNTRY_TOOL_NAME}],
            "tool_choice": {"type": "tool", "name": prompts::COUNTRY_TOOL_NAME}
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "content": [
                {"type": "text", "text": "Calling the tool."},
                {"type": "tool_use", "id": "tu_1", "name": "record_country_info", "input": country_json()}
            ],
            "stop_reason": "tool_use"
        })))
        .mount(&server)
        .await;

    let provider = provider_for(ProviderKind::Anthropic, &server);
    let info = provider.country_info("Nigeria").await.unwrap();

    assert_eq!(info.global_peace_index_rank, 147);
}

#[tokio::test]
async fn test_anthropic_without_tool_use() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/messages"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "content": [{"type": "text", "text": "I cannot help with that."}]
        })))
        .mount(&server)
        .await;

    let provider = provider_for(ProviderKind::Anthropic, &server);
    let err = provider.country_info("Nigeria").await.unwrap_err();

    assert!(matches!(err, ProviderError::ToolNotUsed(_)));
}

#[tokio::test]
async fn test_google_generate_content() {
    let server = MockServer::start().await;
    let model = ProviderKind::Google.default_model();
    Mock::given(method("POST"))
        .and(path(format!("/models/{}:generateContent", model)))
        .and(query_param("key", "test-key"))
        .and(body_partial_json(json!({
            "generationConfig": {"responseMimeType": "application/json"},
            "systemInstruction": {"parts": [{"text": prompts::COUNTRY_SYSTEM_PROMPT}]}
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "candidates": [{
                "content": {"role": "model", "parts": [{"text": country_json().to_string()}]}
            }]
        })))
        .mount(&server)
        .await;

    let provider = provider_for(ProviderKind::Google, &server);
    let info = provider.country_info("Nigeria").await.unwrap();

    assert_eq!(info.happiness_index_rank, 95);
}

#[tokio::test]
async fn test_cohere_chat() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v2/chat"))
        .and(header("authorization", "Bearer test-key"))
        .and(body_partial_json(json!({
            "response_format": {
                "type": "json_object",
                "json_schema": prompts::cities_json_schema(false)
            }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "message": {
                "role": "assistant",
                "content": [{"type": "text", "text": cities_json().to_string()}]
            }
        })))
        .mount(&server)
        .await;

    let provider = provider_for(ProviderKind::Cohere, &server);
    let cities = provider.cities_info("Nigeria").await.unwrap();

    assert_eq!(cities[0].name, "Abuja");
}

#[tokio::test]
async fn test_continent_unsupported_without_request() {
    let server = MockServer::start().await;
    let provider = provider_for(ProviderKind::DeepSeek, &server);

    let err = provider.continent_info("Asia").await.unwrap_err();

    assert!(matches!(err, ProviderError::Unsupported { .. }));
    assert!(server.received_requests().await.unwrap_or_default().is_empty());
}

#[tokio::test]
async fn test_retry_recovers_after_server_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(chat_completion(
            &country_json().to_string(),
        )))
        .mount(&server)
        .await;

    let provider = provider_for(ProviderKind::OpenAi, &server);
    let policy = fast_policy();
    let provider = provider.as_ref();
    let info = with_retry("country info", &policy, move || provider.country_info("Nigeria"))
        .await
        .unwrap();

    assert_eq!(info.population, 223_800_000);
    assert_eq!(server.received_requests().await.unwrap_or_default().len(), 2);
}

#[tokio::test]
async fn test_retry_stops_on_invalid_key() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let provider = provider_for(ProviderKind::OpenAi, &server);
    let policy = fast_policy();
    let provider = provider.as_ref();
    let err = with_retry("country info", &policy, move || provider.country_info("Nigeria"))
        .await
        .unwrap_err();

    assert!(matches!(err, ProviderError::InvalidApiKey(401)));
    assert_eq!(server.received_requests().await.unwrap_or_default().len(), 1);
}

#[tokio::test]
async fn test_google_keeps_valid_json_intact() {
    let server = MockServer::start().await;
    let mut country = country_json();
    country["description"] = json!("Federal republic, capital: Abuja");
    country["interesting_fact"] = json!("Census data at https://nigeria.example.org");
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "candidates": [{
                "content": {"role": "model", "parts": [{"text": country.to_string()}]}
            }]
        })))
        .mount(&server)
        .await;

    let provider = provider_for(ProviderKind::Google, &server);
    let info = provider.country_info("Nigeria").await.unwrap();

    assert_eq!(info.description, "Federal republic, capital: Abuja");
    assert_eq!(info.interesting_fact, "Census data at https://nigeria.example.org");
}
