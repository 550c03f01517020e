//! Groq (OpenAI-compatible API)

use super::chat::{ChatProfile, ChatProvider, IdentitySource};
use super::ProviderConfig;
use crate::error::ProviderError;

pub const BASE_URL: &str = "https://api.groq.com/openai/v1";
pub const DEFAULT_MODEL: &str = "meta-llama/llama-4-scout-17b-16e-instruct";

pub const PROFILE: ChatProfile = ChatProfile {
    name: "Groq",
    identity: IdentitySource::Fixed,
    repair_json: false,
    supports_continent: true,
    country_max_tokens: None,
    cities_max_tokens: None,
};

pub fn provider(config: ProviderConfig) -> Result<ChatProvider, ProviderError> {
    ChatProvider::new(PROFILE, config)
}
