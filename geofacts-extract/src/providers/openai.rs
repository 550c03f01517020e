//! OpenAI chat completions
//!
//! Identity is asked of the model. Continent queries are supported.

use super::chat::{ChatProfile, ChatProvider, IdentitySource};
use super::ProviderConfig;
use crate::error::ProviderError;

pub const BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_MODEL: &str = "gpt-4o";

pub const PROFILE: ChatProfile = ChatProfile {
    name: "OpenAI",
    identity: IdentitySource::AskModel,
    repair_json: false,
    supports_continent: true,
    country_max_tokens: None,
    cities_max_tokens: None,
};

pub fn provider(config: ProviderConfig) -> Result<ChatProvider, ProviderError> {
    ChatProvider::new(PROFILE, config)
}
