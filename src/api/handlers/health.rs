use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde_json::json;

use crate::AppState;

/// Always healthy: without a model the heuristic still serves every request.
pub async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    let model_available = state.engine.availability().is_usable();

    (
        StatusCode::OK,
        Json(json!({ "status": "healthy", "model_available": model_available })),
    )
}
