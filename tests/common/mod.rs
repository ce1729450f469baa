use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;

use loan_risk::api::router::create_router;
use loan_risk::config::AppConfig;
use loan_risk::intelligence::ConfidenceProxy;
use loan_risk::{build_engine, AppState};

/// Minimal config for tests; the model path points nowhere unless overridden.
#[allow(dead_code)]
pub fn test_config(model_path: PathBuf) -> AppConfig {
    AppConfig {
        host: "127.0.0.1".into(),
        port: 0,
        model_path,
        model_enabled: true,
        confidence_proxy: ConfidenceProxy::default(),
    }
}

/// Write a model artifact into a fresh temp dir. Keep the dir alive for the
/// duration of the test.
#[allow(dead_code)]
pub fn write_model(json: &str) -> (tempfile::TempDir, PathBuf) {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("fraud_pipeline.json");
    let mut file = std::fs::File::create(&path).expect("Failed to create model file");
    file.write_all(json.as_bytes()).expect("Failed to write model file");
    (dir, path)
}

#[allow(dead_code)]
pub fn build_app(config: AppConfig) -> axum::Router {
    let engine = build_engine(&config);
    let state = AppState {
        config,
        engine: Arc::new(engine),
        metrics_handle: loan_risk::metrics::detached_handle(),
    };
    create_router(state)
}

/// App with no model artifact on disk.
#[allow(dead_code)]
pub fn heuristic_app() -> axum::Router {
    build_app(test_config(PathBuf::from("does/not/exist/fraud_pipeline.json")))
}
