use axum::extract::State;
use axum::http::header::CONTENT_TYPE;
use axum::response::IntoResponse;

use crate::metrics::record_model_available;
use crate::AppState;

const PROMETHEUS_CONTENT_TYPE: &str = "text/plain; version=0.0.4";

/// GET /metrics — Prometheus scrape payload.
pub async fn scrape(State(state): State<AppState>) -> impl IntoResponse {
    record_model_available(state.engine.availability().is_usable());

    (
        [(CONTENT_TYPE, PROMETHEUS_CONTENT_TYPE)],
        state.metrics_handle.render(),
    )
}
