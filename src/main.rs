use std::sync::Arc;

use loan_risk::api::router::create_router;
use loan_risk::config::AppConfig;
use loan_risk::metrics::{init_metrics, record_model_available};
use loan_risk::{build_engine, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();

    let config = AppConfig::from_env()?;
    let addr = config.bind_addr();

    let metrics_handle = init_metrics()?;

    // Resolved exactly once; the engine is immutable from here on.
    let engine = build_engine(&config);
    record_model_available(engine.availability().is_usable());

    tracing::info!(
        model_available = engine.availability().is_usable(),
        fraud_confidence = config.confidence_proxy.fraud,
        no_fraud_confidence = config.confidence_proxy.no_fraud,
        "Risk engine ready"
    );

    let state = AppState {
        config,
        engine: Arc::new(engine),
        metrics_handle,
    };
    let router = create_router(state);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server listening on {addr}");
    axum::serve(listener, router).await?;

    Ok(())
}

fn init_tracing() {
    use tracing_subscriber::{fmt, EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let json = std::env::var("LOG_FORMAT")
        .map(|v| v.eq_ignore_ascii_case("json"))
        .unwrap_or(false);

    let registry = tracing_subscriber::registry().with(filter);
    if json {
        registry.with(fmt::layer().json()).init();
    } else {
        registry.with(fmt::layer()).init();
    }
}
