//! Telemetry configuration from environment variables.

use std::env;

/// Configuration for logging output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TelemetryConfig {
    /// Service name attached to the startup log line
    pub service_name: String,

    /// Log level filter (trace, debug, info, warn, error) or a full
    /// `EnvFilter` directive such as `electrician=debug,info`
    pub log_level: String,

    /// Whether to write logs to the console at all
    pub console_output: bool,

    /// Whether to format logs as JSON
    pub json_logs: bool,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            service_name: "electrician".to_string(),
            log_level: "info".to_string(),
            console_output: true,
            json_logs: false,
        }
    }
}

impl TelemetryConfig {
    /// Create configuration from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `ELECTRICIAN_SERVICE_NAME`: Service name (default: electrician)
    /// - `ELECTRICIAN_LOG_LEVEL` or `RUST_LOG`: Log level (default: info)
    /// - `ELECTRICIAN_CONSOLE_OUTPUT`: Enable console output (default: true)
    /// - `ELECTRICIAN_JSON_LOGS`: Enable JSON logs (default: false in dev, true in containers)
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Same as [`Self::from_env`], reading variables through `lookup`.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let is_container =
            lookup("KUBERNETES_SERVICE_HOST").is_some() || lookup("DOCKER_CONTAINER").is_some();

        Self {
            service_name: lookup("ELECTRICIAN_SERVICE_NAME")
                .unwrap_or_else(|| "electrician".to_string()),

            log_level: lookup("ELECTRICIAN_LOG_LEVEL")
                .or_else(|| lookup("RUST_LOG"))
                .unwrap_or_else(|| "info".to_string()),

            console_output: lookup("ELECTRICIAN_CONSOLE_OUTPUT")
                .map(|v| v.to_lowercase() != "false" && v != "0")
                .unwrap_or(true),

            json_logs: lookup("ELECTRICIAN_JSON_LOGS")
                .map(|v| v.to_lowercase() == "true" || v == "1")
                .unwrap_or(is_container),
        }
    }

    /// Same configuration with a different log level.
    pub fn with_log_level(mut self, level: impl Into<String>) -> Self {
        self.log_level = level.into();
        self
    }
}
