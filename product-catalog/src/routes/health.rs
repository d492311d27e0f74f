use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use serde_json::json;

use crate::{AppState, database};

pub async fn health_check() -> impl IntoResponse {
    (StatusCode::OK, Json(json!({ "status": "ok" })))
}

/// 503 while the MongoDB deployment does not answer a ping.
pub async fn readiness_check(State(state): State<AppState>) -> impl IntoResponse {
    if let Err(e) = database::check_health(&state.db).await {
        tracing::warn!("MongoDB readiness ping failed: {}", e);
        return (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(json!({ "status": "unavailable", "database": "disconnected" })),
        );
    }

    (
        StatusCode::OK,
        Json(json!({ "status": "ready", "database": "connected" })),
    )
}
