pub mod api;
pub mod config;
pub mod errors;
pub mod intelligence;
pub mod metrics;
pub mod models;

use std::sync::Arc;

use crate::config::AppConfig;
use crate::intelligence::{resolve, ModelAvailability, RiskEngine};

#[derive(Clone)]
pub struct AppState {
    pub config: AppConfig,
    pub engine: Arc<RiskEngine>,
    pub metrics_handle: metrics_exporter_prometheus::PrometheusHandle,
}

/// Resolve the external model once and build the shared scoring engine.
pub fn build_engine(config: &AppConfig) -> RiskEngine {
    let availability = if config.model_enabled {
        resolve(&config.model_path)
    } else {
        tracing::info!("External model disabled (MODEL_ENABLED=false)");
        ModelAvailability::unavailable("model disabled by configuration")
    };

    RiskEngine::new(availability, config.confidence_proxy)
}
