//! DeepSeek (OpenAI-compatible API)
//!
//! JSON mode output occasionally carries prose or formatted numbers, so
//! answers go through JSON repair.

use super::chat::{ChatProfile, ChatProvider, IdentitySource};
use super::ProviderConfig;
use crate::error::ProviderError;

pub const BASE_URL: &str = "https://api.deepseek.com";
pub const DEFAULT_MODEL: &str = "deepseek-chat";

pub const PROFILE: ChatProfile = ChatProfile {
    name: "DeepSeek",
    identity: IdentitySource::Fixed,
    repair_json: true,
    supports_continent: false,
    country_max_tokens: None,
    cities_max_tokens: None,
};

pub fn provider(config: ProviderConfig) -> Result<ChatProvider, ProviderError> {
    ChatProvider::new(PROFILE, config)
}
