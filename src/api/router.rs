use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::AppState;
use super::handlers;

pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(handlers::health::health_check))
        .route("/metrics", get(handlers::metrics::scrape))
        .route("/predict", post(handlers::predict::predict))
        .route("/api/model", get(handlers::model::status))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
