//! geofacts-api library - read-only REST service over the geofacts database
//!
//! Every resource is served under `/api/v1`. List endpoints answer with and
//! without a trailing slash and wrap results as `{"<entities>": [...], "count": N}`.

use axum::http::HeaderValue;
use axum::Router;
use geofacts_common::config::Settings;
use sqlx::PgPool;
use std::sync::Arc;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::warn;

pub mod api;
pub mod db;
pub mod error;

pub use error::{ApiError, ApiResult};

/// Application state shared across HTTP handlers
#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    pub settings: Arc<Settings>,
}

impl AppState {
    pub fn new(db: PgPool, settings: Settings) -> Self {
        Self {
            db,
            settings: Arc::new(settings),
        }
    }
}

/// Build application router
pub fn build_router(state: AppState) -> Router {
    use axum::routing::get;

    let v1 = Router::new()
        .merge(api::health_routes())
        .merge(api::continent_routes())
        .merge(api::country_routes())
        .merge(api::city_routes())
        .merge(api::ai_model_routes())
        .merge(api::glossary_routes());

    let cors = cors_layer(&state.settings.cors_origins);

    Router::new()
        .route("/", get(api::root))
        .nest("/api/v1", v1)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// CORS from configured origins; `*` allows any origin
pub fn cors_layer(origins: &[String]) -> CorsLayer {
    let base = CorsLayer::new().allow_methods(Any).allow_headers(Any);

    if origins.is_empty() || origins.iter().any(|o| o == "*") {
        return base.allow_origin(Any);
    }

    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                warn!(origin = %origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    base.allow_origin(AllowOrigin::list(allowed))
}
