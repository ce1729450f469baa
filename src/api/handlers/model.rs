use axum::extract::State;
use axum::Json;
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::intelligence::{ConfidenceProxy, ModelAvailability};
use crate::AppState;

#[derive(Serialize)]
pub struct ModelStatus {
    pub available: bool,
    pub configured_path: String,
    pub enabled: bool,
    pub kind: Option<&'static str>,
    pub expected_features: Option<usize>,
    pub loaded_from: Option<String>,
    pub loaded_at: Option<DateTime<Utc>>,
    pub unavailable_reason: Option<String>,
    pub confidence_proxy: ConfidenceProxy,
}

/// GET /api/model — external model status.
pub async fn status(State(state): State<AppState>) -> Json<ModelStatus> {
    let proxy = state.engine.proxy();
    let configured_path = state.config.model_path.display().to_string();
    let enabled = state.config.model_enabled;

    let status = match state.engine.availability() {
        ModelAvailability::Usable {
            model,
            loaded_from,
            loaded_at,
        } => ModelStatus {
            available: true,
            configured_path,
            enabled,
            kind: Some(model.kind()),
            expected_features: Some(model.expected_features()),
            loaded_from: Some(loaded_from.display().to_string()),
            loaded_at: Some(*loaded_at),
            unavailable_reason: None,
            confidence_proxy: proxy,
        },
        ModelAvailability::Unavailable { reason } => ModelStatus {
            available: false,
            configured_path,
            enabled,
            kind: None,
            expected_features: None,
            loaded_from: None,
            loaded_at: None,
            unavailable_reason: Some(reason.clone()),
            confidence_proxy: proxy,
        },
    };

    Json(status)
}
