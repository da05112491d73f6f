//! Prometheus metrics for component lifecycles.
//!
//! All metrics follow the naming convention: `electrician_<subject>_<metric>_<unit>`
//!
//! ## Metric Types
//!
//! - **Counter**: Monotonically increasing value (e.g., components_started_total)
//! - **Histogram**: Distribution of values (e.g., component_start_duration_seconds)

use lazy_static::lazy_static;
use prometheus::{
    exponential_buckets, Counter, CounterVec, Encoder, Histogram, HistogramOpts, Opts, Registry,
    TextEncoder,
};
use std::time::Duration;

use crate::TelemetryError;

lazy_static! {
    /// Global metrics registry
    pub static ref REGISTRY: Registry = Registry::new();

    /// Components whose start operation completed
    pub static ref COMPONENTS_STARTED: Counter = Counter::new(
        "electrician_components_started_total",
        "Total number of components started"
    ).expect("metric creation failed");

    /// Components whose stop operation completed
    pub static ref COMPONENTS_STOPPED: Counter = Counter::new(
        "electrician_components_stopped_total",
        "Total number of components stopped"
    ).expect("metric creation failed");

    /// Failed start or stop operations
    pub static ref COMPONENT_FAILURES: CounterVec = CounterVec::new(
        Opts::new("electrician_component_failures_total", "Component operation failures by phase"),
        &["phase"]  // phase: start/stop
    ).expect("metric creation failed");

    /// Start operation duration
    pub static ref COMPONENT_START_DURATION: Histogram = Histogram::with_opts(
        HistogramOpts::new(
            "electrician_component_start_duration_seconds",
            "Time spent in component start operations"
        ).buckets(exponential_buckets(0.0001, 2.0, 18).expect("valid buckets"))
    ).expect("metric creation failed");

    /// Stop operation duration
    pub static ref COMPONENT_STOP_DURATION: Histogram = Histogram::with_opts(
        HistogramOpts::new(
            "electrician_component_stop_duration_seconds",
            "Time spent in component stop operations"
        ).buckets(exponential_buckets(0.0001, 2.0, 18).expect("valid buckets"))
    ).expect("metric creation failed");

    /// System state transitions by target state
    pub static ref LIFECYCLE_TRANSITIONS: CounterVec = CounterVec::new(
        Opts::new("electrician_lifecycle_transitions_total", "System lifecycle transitions"),
        &["to"]  // to: starting/started/stopping/stopped/failed
    ).expect("metric creation failed");
}

/// Proof that the lifecycle metrics are registered with [`REGISTRY`].
#[derive(Debug, Clone, Copy)]
pub struct MetricsHandle {
    _private: (),
}

/// Register all metrics with the global registry.
///
/// Safe to call more than once; metrics that are already registered are
/// left as they are.
pub fn register_metrics() -> Result<MetricsHandle, TelemetryError> {
    let metrics: Vec<Box<dyn prometheus::core::Collector>> = vec![
        Box::new(COMPONENTS_STARTED.clone()),
        Box::new(COMPONENTS_STOPPED.clone()),
        Box::new(COMPONENT_FAILURES.clone()),
        Box::new(COMPONENT_START_DURATION.clone()),
        Box::new(COMPONENT_STOP_DURATION.clone()),
        Box::new(LIFECYCLE_TRANSITIONS.clone()),
    ];

    for metric in metrics {
        match REGISTRY.register(metric) {
            Ok(()) | Err(prometheus::Error::AlreadyReg) => {}
            Err(e) => return Err(TelemetryError::MetricsInit(e.to_string())),
        }
    }

    Ok(MetricsHandle { _private: () })
}

/// Encode all metrics as Prometheus text format.
pub fn encode_metrics() -> Result<String, TelemetryError> {
    let encoder = TextEncoder::new();
    let metric_families = REGISTRY.gather();
    let mut buffer = Vec::new();
    encoder
        .encode(&metric_families, &mut buffer)
        .map_err(|e| TelemetryError::MetricsInit(e.to_string()))?;
    String::from_utf8(buffer).map_err(|e| TelemetryError::MetricsInit(e.to_string()))
}

pub fn record_component_started(elapsed: Duration) {
    COMPONENTS_STARTED.inc();
    COMPONENT_START_DURATION.observe(elapsed.as_secs_f64());
}

pub fn record_component_stopped(elapsed: Duration) {
    COMPONENTS_STOPPED.inc();
    COMPONENT_STOP_DURATION.observe(elapsed.as_secs_f64());
}

/// `phase` is the label value, `"start"` or `"stop"`.
pub fn record_component_failure(phase: &str) {
    COMPONENT_FAILURES.with_label_values(&[phase]).inc();
}

/// `to` is the label value of the state entered.
pub fn record_transition(to: &str) {
    LIFECYCLE_TRANSITIONS.with_label_values(&[to]).inc();
}
