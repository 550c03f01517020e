//! HTTP API handlers for geofacts-api

pub mod ai_models;
pub mod cities;
pub mod continents;
pub mod countries;
pub mod glossary;
pub mod health;

pub use ai_models::ai_model_routes;
pub use cities::city_routes;
pub use continents::continent_routes;
pub use countries::country_routes;
pub use glossary::glossary_routes;
pub use health::{health_routes, root};

use crate::{ApiError, ApiResult};

/// Parse an integer path id, rejecting anything else with 400
pub fn parse_id(raw: &str, what: &str) -> ApiResult<i32> {
    raw.trim()
        .parse::<i32>()
        .map_err(|_| ApiError::BadRequest(format!("Invalid {}: '{}' is not an integer", what, raw)))
}

/// `Some(row)` or 404 with `detail`
pub fn found<T>(row: Option<T>, detail: &str) -> ApiResult<T> {
    row.ok_or_else(|| ApiError::NotFound(detail.to_string()))
}
