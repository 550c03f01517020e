//! AI model provenance endpoints

use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};
use geofacts_common::db::AiModel;
use serde::Serialize;

use super::{found, parse_id};
use crate::{db, ApiResult, AppState};

#[derive(Debug, Serialize)]
pub struct AiModelList {
    pub ai_models: Vec<AiModel>,
    pub count: usize,
}

/// GET /api/v1/ai-models/
pub async fn list_ai_models(State(state): State<AppState>) -> ApiResult<Json<AiModelList>> {
    let ai_models = db::list_ai_models(&state.db).await?;
    Ok(Json(AiModelList {
        count: ai_models.len(),
        ai_models,
    }))
}

/// GET /api/v1/ai-models/:id
pub async fn get_ai_model(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<AiModel>> {
    let id = parse_id(&id, "ai_model_id")?;
    Ok(Json(found(
        db::get_ai_model(&state.db, id).await?,
        "AI model not found",
    )?))
}

pub fn ai_model_routes() -> Router<AppState> {
    Router::new()
        .route("/ai-models", get(list_ai_models))
        .route("/ai-models/", get(list_ai_models))
        .route("/ai-models/:id", get(get_ai_model))
}
