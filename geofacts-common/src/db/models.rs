//! Database row models, serialized as the API response shapes

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct AiModel {
    pub ai_model_id: i32,
    pub model_provider: String,
    pub model_name: String,
    pub description: Option<String>,
    pub supports_structured_output: bool,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Continent row; the `name` column is exposed as `continent_name`
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Continent {
    pub continent_id: i32,
    #[sqlx(rename = "name")]
    pub continent_name: String,
    pub description: Option<String>,
    pub area_sq_mile: Option<f64>,
    pub area_sq_km: Option<f64>,
    pub population: Option<i64>,
    pub num_country: Option<i32>,
    pub ai_model_id: Option<i32>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Country {
    pub country_id: i32,
    pub name: String,
    pub description: Option<String>,
    pub interesting_fact: Option<String>,
    pub area_sq_mile: Option<f64>,
    pub area_sq_km: Option<f64>,
    pub population: Option<i64>,
    pub ppp: Option<f64>,
    pub life_expectancy: Option<f64>,
    pub travel_risk_level: Option<String>,
    pub global_peace_index_score: Option<f64>,
    pub global_peace_index_rank: Option<i32>,
    pub happiness_index_score: Option<f64>,
    pub happiness_index_rank: Option<i32>,
    pub gdp: Option<f64>,
    pub gdp_growth_rate: Option<f64>,
    pub inflation_rate: Option<f64>,
    pub unemployment_rate: Option<f64>,
    pub govt_debt: Option<f64>,
    pub credit_rating: Option<String>,
    pub poverty_rate: Option<f64>,
    pub gini_coefficient: Option<f64>,
    pub military_spending: Option<f64>,
    pub continent_id: Option<i32>,
    pub ai_model_id: Option<i32>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct City {
    pub city_id: i32,
    pub country_id: Option<i32>,
    pub name: String,
    pub is_capital: Option<bool>,
    pub description: Option<String>,
    pub interesting_fact: Option<String>,
    pub area_sq_mile: Option<f64>,
    pub area_sq_km: Option<f64>,
    pub population: Option<i64>,
    pub sci_score: Option<f64>,
    pub sci_rank: Option<i32>,
    pub numbeo_si: Option<f64>,
    pub numbeo_ci: Option<f64>,
    pub airport_code: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct GlossaryRow {
    pub glossary_id: i32,
    pub entry: String,
    pub meaning: String,
    pub range: Option<String>,
    pub interpretation: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
