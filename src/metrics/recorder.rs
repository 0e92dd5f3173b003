//! Metrics recording implementation using Prometheus.

use prometheus::{
    register_counter_vec_with_registry, register_histogram_vec_with_registry, CounterVec,
    Encoder, HistogramVec, Opts, Registry, TextEncoder,
};
use std::sync::Arc;

/// Trait for recording application metrics.
pub trait MetricsRecorder: Clone + Send + Sync + 'static {
    /// Records the outcome of one request to a named route.
    fn record_request(&self, route: &str, result: &str);

    /// Records a call to the identity provider with its outcome.
    fn record_identity_call(&self, operation: &str, result: &str);

    /// Records how long a call to the identity provider took.
    fn record_identity_duration(&self, operation: &str, duration_secs: f64);
}

/// Prometheus metrics collector.
#[derive(Clone)]
pub struct Metrics {
    registry: Arc<Registry>,

    requests_total: CounterVec,

    // Identity provider metrics
    identity_requests_total: CounterVec,
    identity_duration_seconds: HistogramVec,
}

impl Metrics {
    /// Creates a new metrics instance with its own Prometheus registry.
    pub fn new() -> Self {
        let registry = Arc::new(Registry::new());

        let requests_total = register_counter_vec_with_registry!(
            Opts::new("copypasta_requests_total", "Total requests per route and outcome"),
            &["route", "result"],
            registry.clone()
        )
        .expect("Failed to register copypasta_requests_total");

        let identity_requests_total = register_counter_vec_with_registry!(
            Opts::new(
                "copypasta_identity_provider_requests_total",
                "Total calls to the identity provider"
            ),
            &["operation", "result"],
            registry.clone()
        )
        .expect("Failed to register copypasta_identity_provider_requests_total");

        let identity_duration_seconds = register_histogram_vec_with_registry!(
            "copypasta_identity_provider_duration_seconds",
            "Identity provider call duration in seconds",
            &["operation"],
            vec![0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0],
            registry.clone()
        )
        .expect("Failed to register copypasta_identity_provider_duration_seconds");

        Metrics {
            registry,
            requests_total,
            identity_requests_total,
            identity_duration_seconds,
        }
    }

    /// Renders all metrics in Prometheus text format.
    pub fn render(&self) -> Result<String, String> {
        let encoder = TextEncoder::new();
        let metric_families = self.registry.gather();
        let mut buffer = Vec::new();
        encoder
            .encode(&metric_families, &mut buffer)
            .map_err(|e| format!("Failed to encode metrics: {}", e))?;
        String::from_utf8(buffer).map_err(|e| format!("Metrics were not UTF-8: {}", e))
    }
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}

impl MetricsRecorder for Metrics {
    fn record_request(&self, route: &str, result: &str) {
        self.requests_total.with_label_values(&[route, result]).inc();
    }

    fn record_identity_call(&self, operation: &str, result: &str) {
        self.identity_requests_total
            .with_label_values(&[operation, result])
            .inc();
    }

    fn record_identity_duration(&self, operation: &str, duration_secs: f64) {
        self.identity_duration_seconds
            .with_label_values(&[operation])
            .observe(duration_secs);
    }
}
