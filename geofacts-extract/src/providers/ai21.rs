//! AI21 Jamba chat completions
//!
//! Jamba truncates long answers unless given an explicit token budget and
//! often wraps its JSON in markdown, so both are configured here.

use super::chat::{ChatProfile, ChatProvider, IdentitySource};
use super::ProviderConfig;
use crate::error::ProviderError;

pub const BASE_URL: &str = "https://api.ai21.com/studio/v1";
pub const DEFAULT_MODEL: &str = "jamba-mini";

pub const PROFILE: ChatProfile = ChatProfile {
    name: "AI21",
    identity: IdentitySource::Fixed,
    repair_json: true,
    supports_continent: false,
    country_max_tokens: Some(1000),
    cities_max_tokens: Some(2000),
};

pub fn provider(config: ProviderConfig) -> Result<ChatProvider, ProviderError> {
    ChatProvider::new(PROFILE, config)
}
