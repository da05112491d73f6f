//! Subscriber setup: level filter plus a pretty or JSON console layer.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::{TelemetryConfig, TelemetryError};

/// Parse the configured level into a filter.
///
/// `RUST_LOG` is already folded into `log_level` by
/// [`TelemetryConfig::from_env`], so the filter is built from the config only.
pub fn env_filter(config: &TelemetryConfig) -> Result<EnvFilter, TelemetryError> {
    EnvFilter::try_new(&config.log_level)
        .map_err(|e| TelemetryError::Config(format!("log level {:?}: {e}", config.log_level)))
}

/// Install the global subscriber. Fails if one is already installed.
pub fn init_tracing(config: &TelemetryConfig) -> Result<(), TelemetryError> {
    let env_filter = env_filter(config)?;

    // JSON output for containers/production
    let json_layer = (config.console_output && config.json_logs).then(|| {
        tracing_subscriber::fmt::layer()
            .json()
            .with_target(true)
            .with_thread_ids(true)
            .with_file(true)
            .with_line_number(true)
    });

    // Pretty output for development
    let fmt_layer = (config.console_output && !config.json_logs).then(|| {
        tracing_subscriber::fmt::layer()
            .with_target(true)
            .with_thread_ids(false)
            .with_file(false)
            .with_line_number(false)
            .with_ansi(true)
    });

    tracing_subscriber::registry()
        .with(env_filter)
        .with(json_layer)
        .with(fmt_layer)
        .try_init()
        .map_err(|e| TelemetryError::TracingInit(e.to_string()))?;

    tracing::info!(
        service = %config.service_name,
        level = %config.log_level,
        json = config.json_logs,
        "Tracing initialized"
    );

    Ok(())
}
