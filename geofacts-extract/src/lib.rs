//! # geofacts extraction
//!
//! Asks LLM providers for structured continent, country and city facts,
//! repairs and validates their JSON, and upserts the results into
//! PostgreSQL together with the model that produced them.

pub mod cli;
pub mod db;
pub mod error;
pub mod models;
pub mod pipeline;
pub mod prompts;
pub mod providers;
pub mod retry;
pub mod sanitize;

pub use error::{ExtractError, ProviderError, Result};
