//! Structured-output models returned by LLM providers
//!
//! Deserialization is strict in the serde_json sense: integers reject
//! floats, strings reject numbers and booleans reject strings, while floats
//! accept integers. Unknown fields are ignored. Range and length
//! constraints are checked afterwards by `validate()`.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Upper bound on cities accepted per country
pub const MAX_CITIES: usize = 5;

/// A field that failed a range or length constraint
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{field}: {message}")]
pub struct ValidationError {
    pub field: &'static str,
    pub message: String,
}

impl ValidationError {
    fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

type Validation = std::result::Result<(), ValidationError>;

fn max_chars(field: &'static str, value: &str, max: usize) -> Validation {
    let len = value.chars().count();
    if len > max {
        return Err(ValidationError::new(
            field,
            format!("at most {} characters allowed, got {}", max, len),
        ));
    }
    Ok(())
}

fn positive(field: &'static str, value: f64) -> Validation {
    if value > 0.0 {
        Ok(())
    } else {
        Err(ValidationError::new(field, format!("must be greater than 0, got {}", value)))
    }
}

fn at_least(field: &'static str, value: f64, min: f64) -> Validation {
    if value >= min {
        Ok(())
    } else {
        Err(ValidationError::new(
            field,
            format!("must be at least {}, got {}", min, value),
        ))
    }
}

fn within(field: &'static str, value: f64, min: f64, max: f64) -> Validation {
    if (min..=max).contains(&value) {
        Ok(())
    } else {
        Err(ValidationError::new(
            field,
            format!("must be between {} and {}, got {}", min, max, value),
        ))
    }
}

/// Which model answered a query
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelIdentity {
    pub model_provider: String,
    pub model_name: String,
}

impl ModelIdentity {
    pub fn new(model_provider: impl Into<String>, model_name: impl Into<String>) -> Self {
        Self {
            model_provider: model_provider.into(),
            model_name: model_name.into(),
        }
    }

    pub fn validate(&self) -> Validation {
        max_chars("model_provider", &self.model_provider, 50)?;
        max_chars("model_name", &self.model_name, 100)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContinentInfo {
    pub description: String,
    pub area_sq_mile: f64,
    pub area_sq_km: f64,
    pub population: i64,
    pub num_country: i32,
}

impl ContinentInfo {
    pub fn validate(&self) -> Validation {
        max_chars("description", &self.description, 250)?;
        positive("area_sq_mile", self.area_sq_mile)?;
        positive("area_sq_km", self.area_sq_km)?;
        positive("population", self.population as f64)?;
        at_least("num_country", self.num_country as f64, 0.0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CountryInfo {
    pub description: String,
    pub interesting_fact: String,
    pub area_sq_mile: f64,
    pub area_sq_km: f64,
    pub population: i64,
    pub ppp: f64,
    pub life_expectancy: f64,
    pub travel_risk_level: String,
    pub global_peace_index_score: f64,
    pub global_peace_index_rank: i32,
    pub happiness_index_score: f64,
    pub happiness_index_rank: i32,
    pub gdp: f64,
    pub gdp_growth_rate: f64,
    pub inflation_rate: f64,
    pub unemployment_rate: f64,
    pub govt_debt: f64,
    pub credit_rating: String,
    pub poverty_rate: f64,
    pub gini_coefficient: f64,
    pub military_spending: f64,
}

impl CountryInfo {
    pub fn validate(&self) -> Validation {
        max_chars("description", &self.description, 250)?;
        max_chars("interesting_fact", &self.interesting_fact, 250)?;
        positive("area_sq_mile", self.area_sq_mile)?;
        positive("area_sq_km", self.area_sq_km)?;
        positive("population", self.population as f64)?;
        at_least("ppp", self.ppp, 0.0)?;
        positive("life_expectancy", self.life_expectancy)?;
        within("life_expectancy", self.life_expectancy, 0.0, 150.0)?;
        max_chars("travel_risk_level", &self.travel_risk_level, 50)?;
        at_least("global_peace_index_score", self.global_peace_index_score, 0.0)?;
        at_least("global_peace_index_rank", self.global_peace_index_rank as f64, 1.0)?;
        at_least("happiness_index_score", self.happiness_index_score, 0.0)?;
        at_least("happiness_index_rank", self.happiness_index_rank as f64, 1.0)?;
        at_least("gdp", self.gdp, 0.0)?;
        at_least("unemployment_rate", self.unemployment_rate, 0.0)?;
        at_least("govt_debt", self.govt_debt, 0.0)?;
        max_chars("credit_rating", &self.credit_rating, 10)?;
        at_least("poverty_rate", self.poverty_rate, 0.0)?;
        within("gini_coefficient", self.gini_coefficient, 0.0, 100.0)?;
        at_least("military_spending", self.military_spending, 0.0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CityInfo {
    pub name: String,
    pub is_capital: bool,
    pub description: String,
    pub interesting_fact: String,
    pub area_sq_mile: f64,
    pub area_sq_km: f64,
    pub population: i64,
    #[serde(default)]
    pub sci_score: Option<f64>,
    #[serde(default)]
    pub sci_rank: Option<i32>,
    #[serde(default)]
    pub numbeo_si: Option<f64>,
    #[serde(default)]
    pub numbeo_ci: Option<f64>,
    #[serde(default)]
    pub airport_code: Option<String>,
}

impl CityInfo {
    pub fn validate(&self) -> Validation {
        max_chars("name", &self.name, 100)?;
        max_chars("description", &self.description, 250)?;
        max_chars("interesting_fact", &self.interesting_fact, 250)?;
        positive("area_sq_mile", self.area_sq_mile)?;
        positive("area_sq_km", self.area_sq_km)?;
        positive("population", self.population as f64)?;
        if let Some(score) = self.sci_score {
            within("sci_score", score, 0.0, 100.0)?;
        }
        if let Some(rank) = self.sci_rank {
            at_least("sci_rank", rank as f64, 1.0)?;
        }
        if let Some(si) = self.numbeo_si {
            within("numbeo_si", si, 0.0, 100.0)?;
        }
        if let Some(ci) = self.numbeo_ci {
            within("numbeo_ci", ci, 0.0, 100.0)?;
        }
        if let Some(code) = &self.airport_code {
            let len = code.chars().count();
            if len != 3 {
                return Err(ValidationError::new(
                    "airport_code",
                    format!("must be exactly 3 characters, got {}", len),
                ));
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CitiesResponse {
    pub cities: Vec<CityInfo>,
}

impl CitiesResponse {
    pub fn validate(&self) -> Validation {
        if self.cities.len() > MAX_CITIES {
            return Err(ValidationError::new(
                "cities",
                format!("at most {} cities allowed, got {}", MAX_CITIES, self.cities.len()),
            ));
        }
        self.cities.iter().try_for_each(CityInfo::validate)
    }
}
