//! City endpoints

use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};
use geofacts_common::db::City;
use serde::Serialize;

use super::{found, parse_id};
use crate::{db, ApiResult, AppState};

const NOT_FOUND: &str = "City not found";

#[derive(Debug, Serialize)]
pub struct CityList {
    pub cities: Vec<City>,
    pub count: usize,
}

impl From<Vec<City>> for CityList {
    fn from(cities: Vec<City>) -> Self {
        Self {
            count: cities.len(),
            cities,
        }
    }
}

/// GET /api/v1/cities/
pub async fn list_cities(State(state): State<AppState>) -> ApiResult<Json<CityList>> {
    Ok(Json(db::list_cities(&state.db).await?.into()))
}

/// GET /api/v1/cities/:id
pub async fn get_city(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<City>> {
    let id = parse_id(&id, "city_id")?;
    Ok(Json(found(db::get_city(&state.db, id).await?, NOT_FOUND)?))
}

/// GET /api/v1/cities/name/:name
pub async fn get_city_by_name(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> ApiResult<Json<City>> {
    Ok(Json(found(db::get_city_by_name(&state.db, &name).await?, NOT_FOUND)?))
}

/// GET /api/v1/cities/country/:id
pub async fn by_country_id(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<CityList>> {
    let id = parse_id(&id, "country_id")?;
    Ok(Json(db::cities_by_country_id(&state.db, id).await?.into()))
}

/// GET /api/v1/cities/country/name/:name
pub async fn by_country_name(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> ApiResult<Json<CityList>> {
    Ok(Json(db::cities_by_country_name(&state.db, &name).await?.into()))
}

pub fn city_routes() -> Router<AppState> {
    Router::new()
        .route("/cities", get(list_cities))
        .route("/cities/", get(list_cities))
        .route("/cities/:id", get(get_city))
        .route("/cities/name/:name", get(get_city_by_name))
        .route("/cities/country/:id", get(by_country_id))
        .route("/cities/country/name/:name", get(by_country_name))
}
