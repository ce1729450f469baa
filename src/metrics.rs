use metrics::{counter, gauge, histogram};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};

/// Install the Prometheus exporter and register all application metrics.
/// Returns a `PrometheusHandle` whose `render()` method produces the
/// text/plain Prometheus scrape payload.
pub fn init_metrics() -> anyhow::Result<PrometheusHandle> {
    let handle = PrometheusBuilder::new().install_recorder()?;
    register_metrics();
    Ok(handle)
}

/// Build a handle without installing a global recorder. Used by tests, where
/// only one recorder may exist per process.
pub fn detached_handle() -> PrometheusHandle {
    PrometheusBuilder::new().build_recorder().handle()
}

fn register_metrics() {
    // Pre-register counters so they appear even before the first increment.
    counter!("risk_decisions_total", "source" => "model").absolute(0);
    counter!("risk_decisions_total", "source" => "heuristic").absolute(0);
    counter!("fraud_labels_total").absolute(0);
    counter!("model_fallbacks_total").absolute(0);

    gauge!("model_available").set(0.0);

    // Histogram is lazily created on first record; force creation.
    histogram!("scoring_latency_seconds").record(0.0);
}

/// Publish the startup model state.
pub fn record_model_available(available: bool) {
    gauge!("model_available").set(if available { 1.0 } else { 0.0 });
}
