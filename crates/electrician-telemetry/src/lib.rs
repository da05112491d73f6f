//! # Electrician Telemetry
//!
//! Logging and metrics for systems run by the `electrician` crate.
//!
//! ## Components
//!
//! - **Tracing**: `tracing-subscriber` registry with an `EnvFilter` and a
//!   pretty or JSON console layer
//! - **Metrics**: Prometheus counters and histograms for component starts,
//!   stops, failures and state transitions
//!
//! ## Usage
//!
//! ```rust,ignore
//! use electrician_telemetry::{init_telemetry, TelemetryConfig};
//!
//! #[tokio::main]
//! async fn main() {
//!     let _guard = init_telemetry(TelemetryConfig::from_env()).expect("Failed to init telemetry");
//!
//!     // Build and run systems here
//! }
//! ```
//!
//! ## Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `ELECTRICIAN_LOG_LEVEL` | `info` | Log level filter (falls back to `RUST_LOG`) |
//! | `ELECTRICIAN_JSON_LOGS` | `false` | JSON output (defaults to `true` in containers) |
//! | `ELECTRICIAN_CONSOLE_OUTPUT` | `true` | Write logs to the console |
//! | `ELECTRICIAN_SERVICE_NAME` | `electrician` | Service name in the startup log |

mod config;
mod logging;
pub mod metrics;
mod tracing_setup;

pub use config::TelemetryConfig;
pub use metrics::{
    encode_metrics, register_metrics, MetricsHandle, COMPONENTS_STARTED, COMPONENTS_STOPPED,
    COMPONENT_FAILURES, COMPONENT_START_DURATION, COMPONENT_STOP_DURATION, LIFECYCLE_TRANSITIONS,
};
pub use tracing_setup::{env_filter, init_tracing};

use thiserror::Error;

/// Telemetry initialization errors
#[derive(Error, Debug)]
pub enum TelemetryError {
    #[error("Failed to initialize tracing subscriber: {0}")]
    TracingInit(String),

    #[error("Failed to initialize Prometheus metrics: {0}")]
    MetricsInit(String),

    #[error("Invalid configuration: {0}")]
    Config(String),
}

/// Initialize logging and register metrics.
///
/// Returns a guard to hold for the lifetime of the application.
pub fn init_telemetry(config: TelemetryConfig) -> Result<TelemetryGuard, TelemetryError> {
    // Metrics first, so nothing recorded during startup is lost
    let metrics = register_metrics()?;

    tracing_setup::init_tracing(&config)?;

    Ok(TelemetryGuard {
        service_name: config.service_name,
        _metrics: metrics,
    })
}

/// Guard that keeps telemetry active.
pub struct TelemetryGuard {
    service_name: String,
    _metrics: MetricsHandle,
}

impl Drop for TelemetryGuard {
    fn drop(&mut self) {
        tracing::info!(service = %self.service_name, "Shutting down telemetry");
    }
}
