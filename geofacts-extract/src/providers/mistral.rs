//! Mistral chat completions

use super::chat::{ChatProfile, ChatProvider, IdentitySource};
use super::ProviderConfig;
use crate::error::ProviderError;

pub const BASE_URL: &str = "https://api.mistral.ai/v1";
pub const DEFAULT_MODEL: &str = "mistral-large-latest";

pub const PROFILE: ChatProfile = ChatProfile {
    name: "Mistral",
    identity: IdentitySource::Fixed,
    repair_json: false,
    supports_continent: true,
    country_max_tokens: None,
    cities_max_tokens: None,
};

pub fn provider(config: ProviderConfig) -> Result<ChatProvider, ProviderError> {
    ChatProvider::new(PROFILE, config)
}
