//! Glossary endpoints

use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};
use geofacts_common::db::GlossaryRow;
use serde::Serialize;

use super::{found, parse_id};
use crate::{db, ApiResult, AppState};

const NOT_FOUND: &str = "Glossary entry not found";

#[derive(Debug, Serialize)]
pub struct GlossaryList {
    pub glossary: Vec<GlossaryRow>,
    pub count: usize,
}

/// GET /api/v1/glossary/
pub async fn list_glossary(State(state): State<AppState>) -> ApiResult<Json<GlossaryList>> {
    let glossary = db::list_glossary(&state.db).await?;
    Ok(Json(GlossaryList {
        count: glossary.len(),
        glossary,
    }))
}

/// GET /api/v1/glossary/:id
pub async fn get_glossary_entry(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<GlossaryRow>> {
    let id = parse_id(&id, "glossary_id")?;
    Ok(Json(found(db::get_glossary_entry(&state.db, id).await?, NOT_FOUND)?))
}

/// GET /api/v1/glossary/entry/:entry
pub async fn get_glossary_by_entry(
    State(state): State<AppState>,
    Path(entry): Path<String>,
) -> ApiResult<Json<GlossaryRow>> {
    Ok(Json(found(
        db::get_glossary_by_entry(&state.db, &entry).await?,
        NOT_FOUND,
    )?))
}

pub fn glossary_routes() -> Router<AppState> {
    Router::new()
        .route("/glossary", get(list_glossary))
        .route("/glossary/", get(list_glossary))
        .route("/glossary/:id", get(get_glossary_entry))
        .route("/glossary/entry/:entry", get(get_glossary_by_entry))
}
