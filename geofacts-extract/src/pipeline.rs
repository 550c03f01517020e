//! Country and continent extraction pipelines
//!
//! Country flow:
//! 1. Q1 model identity → upsert `ai_models`
//! 2. Resolve the continent id (NULL when unknown)
//! 3. Q2 country facts (retried) → upsert `countries`
//! 4. Q3 up to five cities (retried, optional) → upsert `cities`
//!
//! Continent flow is Q1 followed by continent facts. Every provider call
//! awaits its response before the next one starts.

use crate::db;
use crate::error::{ExtractError, Result};
use crate::models::{CityInfo, ContinentInfo, CountryInfo};
use crate::providers::{LlmProvider, ProviderKind};
use crate::retry::{with_retry, RetryPolicy};
use geofacts_common::countries::CountryAssignments;
use serde::Serialize;
use sqlx::PgPool;
use tracing::{info, warn};

pub const VALID_CONTINENTS: [&str; 7] = [
    "Africa",
    "Antarctica",
    "Asia",
    "Europe",
    "North America",
    "Oceania",
    "South America",
];

/// Provider used for countries missing from the assignment CSV
pub const FALLBACK_PROVIDER: ProviderKind = ProviderKind::Ai21;

/// Ids written by one country run, plus the facts stored under them
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CountryResult {
    pub ai_model_id: i32,
    pub continent_id: Option<i32>,
    pub country_id: i32,
    pub city_ids: Vec<i32>,
    pub country: CountryInfo,
    pub cities: Vec<CityInfo>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ContinentResult {
    pub ai_model_id: i32,
    pub continent_id: i32,
    pub continent: ContinentInfo,
}

/// A country resolved against the assignment CSV
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CountryTarget {
    pub country: String,
    pub continent: Option<String>,
    pub provider: ProviderKind,
}

/// Work out continent and provider for `country`
///
/// An explicit provider wins over the CSV assignment. A country missing
/// from the CSV gets no continent and falls back to [`FALLBACK_PROVIDER`].
pub fn resolve_country_target(
    country: &str,
    requested: Option<ProviderKind>,
    assignments: &CountryAssignments,
) -> Result<CountryTarget> {
    match assignments.country_info(country) {
        Ok(assignment) => {
            info!(country, continent = %assignment.continent, "Continent lookup");
            let provider = match requested {
                Some(kind) => kind,
                None => {
                    let kind = ProviderKind::from_name(&assignment.llm)
                        .ok_or_else(|| ExtractError::UnknownProvider(assignment.llm.clone()))?;
                    info!(provider = %kind, "Provider auto-detected");
                    kind
                }
            };
            Ok(CountryTarget {
                country: country.to_string(),
                continent: Some(assignment.continent.clone()),
                provider,
            })
        }
        Err(_) => {
            warn!(country, "Country not in countries CSV - continent will be NULL");
            let provider = requested.unwrap_or_else(|| {
                warn!(provider = %FALLBACK_PROVIDER, "Using default provider");
                FALLBACK_PROVIDER
            });
            Ok(CountryTarget {
                country: country.to_string(),
                continent: None,
                provider,
            })
        }
    }
}

/// Title-case each word: "north america" → "North America"
pub fn title_case(name: &str) -> String {
    let mut result = String::with_capacity(name.len());
    let mut at_word_start = true;
    for c in name.chars() {
        if c.is_alphabetic() {
            if at_word_start {
                result.extend(c.to_uppercase());
            } else {
                result.extend(c.to_lowercase());
            }
            at_word_start = false;
        } else {
            result.push(c);
            at_word_start = true;
        }
    }
    result
}

/// Normalize and check a continent name
///
/// With `skip_validation` the trimmed input is used as-is.
pub fn validate_continent_name(name: &str, skip_validation: bool) -> Result<String> {
    let trimmed = name.trim();
    if skip_validation {
        return Ok(trimmed.to_string());
    }

    let normalized = title_case(trimmed);
    if VALID_CONTINENTS.contains(&normalized.as_str()) {
        Ok(normalized)
    } else {
        Err(ExtractError::InvalidContinent {
            name: name.to_string(),
            valid: VALID_CONTINENTS.join(", "),
        })
    }
}

async fn record_identity(pool: &PgPool, provider: &dyn LlmProvider) -> Result<i32> {
    info!("Q1: Getting model identity...");
    let identity = provider.model_identity().await?;
    info!(
        model_provider = %identity.model_provider,
        model_name = %identity.model_name,
        "Model identity"
    );
    Ok(db::upsert_ai_model(pool, &identity).await?)
}

/// Run Q1–Q3 for one country and persist the results
pub async fn process_country(
    pool: &PgPool,
    provider: &dyn LlmProvider,
    country: &str,
    continent: Option<&str>,
    skip_cities: bool,
    policy: &RetryPolicy,
) -> Result<CountryResult> {
    info!(country, provider = provider.name(), "=== Processing country ===");

    let ai_model_id = record_identity(pool, provider).await?;

    let continent_id = match continent {
        Some(name) => {
            let id = db::get_continent_id(pool, name).await?;
            match id {
                Some(id) => info!(continent_id = id, continent = name, "Continent resolved"),
                None => warn!(continent = name, "Continent not in database"),
            }
            id
        }
        None => None,
    };

    info!(country, "Q2: Getting country info...");
    let info = with_retry("country info", policy, move || provider.country_info(country)).await?;
    info!(
        population = info.population,
        area_sq_km = info.area_sq_km,
        gdp = info.gdp,
        life_expectancy = info.life_expectancy,
        "Country info received"
    );
    let country_id = db::upsert_country(pool, country, &info, ai_model_id, continent_id).await?;

    let mut city_ids = Vec::new();
    let mut cities = Vec::new();
    if skip_cities {
        info!("Q3: Skipped (--skip-cities)");
    } else {
        info!(country, "Q3: Getting cities info...");
        cities = with_retry("cities info", policy, move || provider.cities_info(country)).await?;
        info!(count = cities.len(), "Cities received");

        for city in &cities {
            city_ids.push(db::upsert_city(pool, city, country_id).await?);
        }
    }

    Ok(CountryResult {
        ai_model_id,
        continent_id,
        country_id,
        city_ids,
        country: info,
        cities,
    })
}

/// Identity plus continent facts for one (already validated) continent
pub async fn process_continent(
    pool: &PgPool,
    provider: &dyn LlmProvider,
    continent: &str,
    policy: &RetryPolicy,
) -> Result<ContinentResult> {
    info!(continent, provider = provider.name(), "=== Processing continent ===");

    let ai_model_id = record_identity(pool, provider).await?;

    info!(continent, "Q2: Getting continent info...");
    let info = with_retry("continent info", policy, move || provider.continent_info(continent)).await?;
    info!(
        population = info.population,
        area_sq_km = info.area_sq_km,
        num_country = info.num_country,
        "Continent info received"
    );

    let continent_id = db::upsert_continent(pool, continent, &info, ai_model_id).await?;

    Ok(ContinentResult {
        ai_model_id,
        continent_id,
        continent: info,
    })
}
