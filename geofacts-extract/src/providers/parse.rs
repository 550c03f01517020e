//! Turning raw provider output into validated models
//!
//! Pipeline for every answer: parse (repairing on failure when enabled), empty check,
//! string truncation, typed deserialization, validation.

use crate::error::ProviderError;
use crate::models::{CitiesResponse, CityInfo, ContinentInfo, CountryInfo, ModelIdentity};
use crate::prompts::truncate_long_strings;
use crate::sanitize::repair_json;
use regex::Regex;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use std::sync::LazyLock;

static IDENTITY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)Model Provider:\s*([^|]+)\s*\|\s*Model Name:\s*(.+)").expect("valid regex")
});

/// Parse "Model Provider: X | Model Name: Y"
pub fn parse_identity(content: &str) -> Result<ModelIdentity, ProviderError> {
    let caps = IDENTITY
        .captures(content)
        .ok_or_else(|| ProviderError::Identity(content.to_string()))?;

    let identity = ModelIdentity::new(caps[1].trim(), caps[2].trim());
    identity.validate()?;
    Ok(identity)
}

/// Parse text into a JSON value
///
/// With `repair` set, text that fails to parse as-is gets one more try
/// after [`repair_json`]. Valid JSON is never rewritten.
pub fn parse_value(content: &str, provider: &str, repair: bool) -> Result<Value, ProviderError> {
    if content.trim().is_empty() {
        return Err(ProviderError::EmptyResponse(provider.to_string()));
    }

    match serde_json::from_str(content) {
        Ok(value) => Ok(value),
        Err(e) if !repair => Err(e.into()),
        Err(_) => {
            let repaired = repair_json(content);
            serde_json::from_str(&repaired).map_err(|e| {
                tracing::debug!(provider, raw = content, sanitized = %repaired, "Unparseable JSON");
                ProviderError::from(e)
            })
        }
    }
}

fn into_object(value: Value, provider: &str) -> Result<Map<String, Value>, ProviderError> {
    match value {
        Value::Object(map) if map.is_empty() => {
            Err(ProviderError::EmptyResponse(provider.to_string()))
        }
        Value::Object(map) => Ok(map),
        other => Err(ProviderError::Parse(format!(
            "expected a JSON object from {}, got {}",
            provider,
            json_kind(&other)
        ))),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

fn typed<T: DeserializeOwned>(object: Map<String, Value>) -> Result<T, ProviderError> {
    Ok(serde_json::from_value(Value::Object(object))?)
}

pub fn continent_from_value(value: Value, provider: &str) -> Result<ContinentInfo, ProviderError> {
    let mut object = into_object(value, provider)?;
    truncate_long_strings(&mut object);
    let info: ContinentInfo = typed(object)?;
    info.validate()?;
    Ok(info)
}

pub fn country_from_value(value: Value, provider: &str) -> Result<CountryInfo, ProviderError> {
    let mut object = into_object(value, provider)?;
    truncate_long_strings(&mut object);
    let info: CountryInfo = typed(object)?;
    info.validate()?;
    Ok(info)
}

/// Accepts a bare array or `{"cities": [...]}`
pub fn cities_from_value(value: Value, provider: &str) -> Result<Vec<CityInfo>, ProviderError> {
    let items = match value {
        Value::Array(items) => items,
        Value::Object(mut map) => match map.remove("cities") {
            Some(Value::Array(items)) => items,
            _ if map.is_empty() => return Err(ProviderError::EmptyResponse(provider.to_string())),
            _ => return Err(ProviderError::UnexpectedFormat("object without 'cities' array".into())),
        },
        other => return Err(ProviderError::UnexpectedFormat(json_kind(&other).to_string())),
    };

    let cities = items
        .into_iter()
        .map(|item| match item {
            Value::Object(mut city) => {
                truncate_long_strings(&mut city);
                clear_short_airport_code(&mut city);
                typed::<CityInfo>(city)
            }
            other => Err(ProviderError::UnexpectedFormat(format!(
                "city entry is {}",
                json_kind(&other)
            ))),
        })
        .collect::<Result<Vec<_>, _>>()?;

    let response = CitiesResponse { cities };
    response.validate()?;
    Ok(response.cities)
}

/// Null out an airport_code shorter than 3 characters
fn clear_short_airport_code(city: &mut Map<String, Value>) {
    if let Some(code) = city.get_mut("airport_code") {
        let too_short = match code {
            Value::String(s) => s.chars().count() < 3,
            _ => false,
        };
        if too_short {
            *code = Value::Null;
        }
    }
}

pub fn parse_continent(content: &str, provider: &str, repair: bool) -> Result<ContinentInfo, ProviderError> {
    continent_from_value(parse_value(content, provider, repair)?, provider)
}

pub fn parse_country(content: &str, provider: &str, repair: bool) -> Result<CountryInfo, ProviderError> {
    country_from_value(parse_value(content, provider, repair)?, provider)
}

pub fn parse_cities(content: &str, provider: &str, repair: bool) -> Result<Vec<CityInfo>, ProviderError> {
    cities_from_value(parse_value(content, provider, repair)?, provider)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn city(name: &str, airport: Value) -> Value {
        json!({
            "name": name,
            "is_capital": false,
            "description": "d".repeat(300),
            "interesting_fact": "f",
            "area_sq_mile": 10.0,
            "area_sq_km": 25.9,
            "population": 100000,
            "airport_code": airport
        })
    }

    #[test]
    fn test_identity_parsed_and_trimmed() {
        let identity =
            parse_identity("I am. Model Provider:  OpenAI  | Model Name: gpt-4o-2024-08-06 ").unwrap();
        assert_eq!(identity.model_provider, "OpenAI");
        assert_eq!(identity.model_name, "gpt-4o-2024-08-06");

        let identity = parse_identity("model provider: Google | model name: gemini").unwrap();
        assert_eq!(identity.model_provider, "Google");
    }

    #[test]
    fn test_identity_unparseable() {
        let err = parse_identity("I'm a helpful assistant").unwrap_err();
        assert_eq!(
            err.to_string(),
            "Could not parse model identity from: I'm a helpful assistant"
        );
    }

    #[test]
    fn test_empty_object_rejected() {
        let err = parse_country("{}", "Cohere", false).unwrap_err();
        assert_eq!(err.to_string(), "Empty JSON response from Cohere");

        let err = parse_country("   ", "AI21", true).unwrap_err();
        assert!(matches!(err, ProviderError::EmptyResponse(_)));
    }

    #[test]
    fn test_cities_accepts_array_and_object() {
        let wrapped = json!({"cities": [city("Lagos", json!("LOS"))]});
        let cities = cities_from_value(wrapped, "Groq").unwrap();
        assert_eq!(cities.len(), 1);
        assert_eq!(cities[0].description.chars().count(), 250);

        let bare = json!([city("Abuja", json!("ABV")), city("Kano", json!("KAN"))]);
        assert_eq!(cities_from_value(bare, "Groq").unwrap().len(), 2);
    }

    #[test]
    fn test_cities_unexpected_format() {
        let err = cities_from_value(json!({"towns": []}), "Groq").unwrap_err();
        assert!(err.to_string().starts_with("Unexpected cities format"));

        let err = cities_from_value(json!("Lagos"), "Groq").unwrap_err();
        assert!(matches!(err, ProviderError::UnexpectedFormat(_)));
    }

    #[test]
    fn test_short_airport_code_cleared() {
        let cities = cities_from_value(
            json!([city("Tiny", json!("")), city("Mid", json!("AB")), city("Null", Value::Null)]),
            "AI21",
        )
        .unwrap();
        assert!(cities.iter().all(|c| c.airport_code.is_none()));
    }

    #[test]
    fn test_too_many_cities_rejected() {
        let six: Vec<Value> = (0..6).map(|i| city(&format!("C{}", i), json!("ABC"))).collect();
        let err = cities_from_value(Value::Array(six), "Mistral").unwrap_err();
        assert!(matches!(err, ProviderError::Validation(_)));
    }

    #[test]
    fn test_repair_applied_when_requested() {
        let raw = "```json\n{\"description\": \"Big\", \"area_sq_mile\": 11,730,000, \
                   \"area_sq_km\": 30370000, \"population\": 1400000000, \"num_country\": 54,}\n```";
        assert!(parse_continent(raw, "Google", false).is_err());
        let info = parse_continent(raw, "Google", true).unwrap();
        assert_eq!(info.area_sq_mile, 11_730_000.0);
        assert_eq!(info.num_country, 54);
    }

    #[test]
    fn test_valid_json_not_rewritten_by_repair() {
        let raw = r#"{"description": "Vast and diverse, capital: many cities. See https://example.org/africa", "area_sq_mile": 11730000, "area_sq_km": 30370000, "population": 1400000000, "num_country": 54}"#;
        let value = parse_value(raw, "AI21", true).unwrap();
        assert_eq!(
            value["description"],
            "Vast and diverse, capital: many cities. See https://example.org/africa"
        );

        let info = parse_continent(raw, "AI21", true).unwrap();
        assert_eq!(info.num_country, 54);
    }
}
