//! Continent endpoints

use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};
use geofacts_common::db::Continent;
use serde::Serialize;

use super::{found, parse_id};
use crate::{db, ApiResult, AppState};

const NOT_FOUND: &str = "Continent not found";

#[derive(Debug, Serialize)]
pub struct ContinentList {
    pub continents: Vec<Continent>,
    pub count: usize,
}

impl From<Vec<Continent>> for ContinentList {
    fn from(continents: Vec<Continent>) -> Self {
        Self {
            count: continents.len(),
            continents,
        }
    }
}

/// GET /api/v1/continents/
pub async fn list_continents(State(state): State<AppState>) -> ApiResult<Json<ContinentList>> {
    Ok(Json(db::list_continents(&state.db).await?.into()))
}

/// GET /api/v1/continents/:id
pub async fn get_continent(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<Continent>> {
    let id = parse_id(&id, "continent_id")?;
    Ok(Json(found(db::get_continent(&state.db, id).await?, NOT_FOUND)?))
}

/// GET /api/v1/continents/name/:name
pub async fn get_continent_by_name(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> ApiResult<Json<Continent>> {
    Ok(Json(found(
        db::get_continent_by_name(&state.db, &name).await?,
        NOT_FOUND,
    )?))
}

pub fn continent_routes() -> Router<AppState> {
    Router::new()
        .route("/continents", get(list_continents))
        .route("/continents/", get(list_continents))
        .route("/continents/:id", get(get_continent))
        .route("/continents/name/:name", get(get_continent_by_name))
}
