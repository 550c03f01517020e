//! Country endpoints, including lookups by continent and by the AI model
//! that produced the facts

use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};
use geofacts_common::db::Country;
use serde::Serialize;

use super::{found, parse_id};
use crate::{db, ApiResult, AppState};

const NOT_FOUND: &str = "Country not found";

#[derive(Debug, Serialize)]
pub struct CountryList {
    pub countries: Vec<Country>,
    pub count: usize,
}

impl From<Vec<Country>> for CountryList {
    fn from(countries: Vec<Country>) -> Self {
        Self {
            count: countries.len(),
            countries,
        }
    }
}

/// GET /api/v1/countries/
pub async fn list_countries(State(state): State<AppState>) -> ApiResult<Json<CountryList>> {
    Ok(Json(db::list_countries(&state.db).await?.into()))
}

/// GET /api/v1/countries/:id
pub async fn get_country(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<Country>> {
    let id = parse_id(&id, "country_id")?;
    Ok(Json(found(db::get_country(&state.db, id).await?, NOT_FOUND)?))
}

/// GET /api/v1/countries/name/:name
pub async fn get_country_by_name(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> ApiResult<Json<Country>> {
    Ok(Json(found(
        db::get_country_by_name(&state.db, &name).await?,
        NOT_FOUND,
    )?))
}

/// GET /api/v1/countries/continent/:id
pub async fn by_continent_id(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<CountryList>> {
    let id = parse_id(&id, "continent_id")?;
    Ok(Json(db::countries_by_continent_id(&state.db, id).await?.into()))
}

/// GET /api/v1/countries/continent/name/:name
pub async fn by_continent_name(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> ApiResult<Json<CountryList>> {
    Ok(Json(db::countries_by_continent_name(&state.db, &name).await?.into()))
}

/// GET /api/v1/countries/model/:id
pub async fn by_model_id(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<CountryList>> {
    let id = parse_id(&id, "ai_model_id")?;
    Ok(Json(db::countries_by_model_id(&state.db, id).await?.into()))
}

/// GET /api/v1/countries/model/name/:provider
///
/// Matches the model provider (e.g. "OpenAI", "AI21"), not the model name.
pub async fn by_model_provider(
    State(state): State<AppState>,
    Path(provider): Path<String>,
) -> ApiResult<Json<CountryList>> {
    Ok(Json(db::countries_by_model_provider(&state.db, &provider).await?.into()))
}

pub fn country_routes() -> Router<AppState> {
    Router::new()
        .route("/countries", get(list_countries))
        .route("/countries/", get(list_countries))
        .route("/countries/:id", get(get_country))
        .route("/countries/name/:name", get(get_country_by_name))
        .route("/countries/continent/:id", get(by_continent_id))
        .route("/countries/continent/name/:name", get(by_continent_name))
        .route("/countries/model/:id", get(by_model_id))
        .route("/countries/model/name/:provider", get(by_model_provider))
}
