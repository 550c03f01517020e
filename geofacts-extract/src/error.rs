//! Error types for the extraction pipeline

use crate::models::ValidationError;
use thiserror::Error;

/// Errors from a single provider call
#[derive(Debug, Error)]
pub enum ProviderError {
    /// No key in the environment or the TOML `[api_keys]` table
    #[error("{0} environment variable not set")]
    MissingApiKey(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Invalid API key ({0})")]
    InvalidApiKey(u16),

    #[error("Rate limited (429): {0}")]
    RateLimited(String),

    #[error("API error {0}: {1}")]
    Api(u16, String),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Empty JSON response from {0}")]
    EmptyResponse(String),

    #[error("Unexpected cities format: {0}")]
    UnexpectedFormat(String),

    #[error("Could not parse model identity from: {0}")]
    Identity(String),

    #[error("Claude did not use the {0} tool")]
    ToolNotUsed(String),

    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("{provider} does not support {operation}")]
    Unsupported {
        provider: &'static str,
        operation: &'static str,
    },

    #[error("Failed after {attempts} attempts: {last}")]
    RetriesExhausted { attempts: u32, last: Box<ProviderError> },
}

impl ProviderError {
    /// Failures that another attempt cannot fix
    pub fn is_permanent(&self) -> bool {
        matches!(
            self,
            Self::MissingApiKey(_) | Self::InvalidApiKey(_) | Self::Unsupported { .. }
        )
    }

    /// HTTP 429, or a transport/API message mentioning "429" or "rate"
    ///
    /// Parse and validation messages are excluded: field names such as
    /// `inflation_rate` would otherwise match.
    pub fn is_rate_limited(&self) -> bool {
        match self {
            Self::RateLimited(_) => true,
            Self::Network(message) | Self::Api(_, message) => {
                let message = message.to_lowercase();
                message.contains("429") || message.contains("rate")
            }
            _ => false,
        }
    }
}

impl From<serde_json::Error> for ProviderError {
    fn from(err: serde_json::Error) -> Self {
        Self::Parse(err.to_string())
    }
}

/// Errors from the country / continent pipeline
#[derive(Debug, Error)]
pub enum ExtractError {
    #[error(transparent)]
    Provider(#[from] ProviderError),

    #[error(transparent)]
    Common(#[from] geofacts_common::Error),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Invalid continent: {name}. Valid continents: {valid}")]
    InvalidContinent { name: String, valid: String },

    #[error("Unknown provider: {0}")]
    UnknownProvider(String),
}

pub type Result<T> = std::result::Result<T, ExtractError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_permanent_errors() {
        assert!(ProviderError::MissingApiKey("GROQ_API_KEY".into()).is_permanent());
        assert!(ProviderError::InvalidApiKey(401).is_permanent());
        assert!(!ProviderError::Network("timeout".into()).is_permanent());
        assert!(!ProviderError::Parse("eof".into()).is_permanent());
    }

    #[test]
    fn test_rate_limit_detection() {
        assert!(ProviderError::RateLimited("slow down".into()).is_rate_limited());
        assert!(ProviderError::Api(500, "Rate exceeded".into()).is_rate_limited());
        assert!(!ProviderError::Api(500, "Internal".into()).is_rate_limited());
        assert!(!ProviderError::Parse("invalid type at inflation_rate".into()).is_rate_limited());
    }

    #[test]
    fn test_messages() {
        assert_eq!(
            ProviderError::MissingApiKey("CO_API_KEY".into()).to_string(),
            "CO_API_KEY environment variable not set"
        );
        let exhausted = ProviderError::RetriesExhausted {
            attempts: 3,
            last: Box::new(ProviderError::EmptyResponse("Cohere".into())),
        };
        assert_eq!(
            exhausted.to_string(),
            "Failed after 3 attempts: Empty JSON response from Cohere"
        );
    }
}
