//! # Runtime Configuration
//!
//! Everything the `electrician` binary reads from its environment.

use crate::manifest::{ManifestError, SystemManifest};
use electrician_telemetry::TelemetryConfig;
use std::env;
use std::path::PathBuf;

/// Complete runtime configuration.
#[derive(Debug, Clone, Default)]
pub struct RuntimeConfig {
    /// Manifest to run. `None` runs [`SystemManifest::basic`].
    pub manifest_path: Option<PathBuf>,
    /// Print the Prometheus text exposition after shutdown.
    pub dump_metrics: bool,
    /// Logging configuration.
    pub telemetry: TelemetryConfig,
}

impl RuntimeConfig {
    /// Create configuration from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `ELECTRICIAN_MANIFEST`: Path to a JSON system manifest (default: built-in example)
    /// - `ELECTRICIAN_DUMP_METRICS`: Print metrics on exit (default: false)
    /// - Everything read by [`TelemetryConfig::from_env`]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Same as [`Self::from_env`], reading variables through `lookup`.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        Self {
            manifest_path: lookup("ELECTRICIAN_MANIFEST")
                .filter(|path| !path.trim().is_empty())
                .map(PathBuf::from),
            dump_metrics: lookup("ELECTRICIAN_DUMP_METRICS")
                .map(|v| v.to_lowercase() == "true" || v == "1")
                .unwrap_or(false),
            telemetry: TelemetryConfig::from_lookup(&lookup),
        }
    }

    /// Load the configured manifest, or the built-in one.
    pub fn load_manifest(&self) -> Result<SystemManifest, ManifestError> {
        match &self.manifest_path {
            Some(path) => SystemManifest::load(path),
            None => Ok(SystemManifest::basic()),
        }
    }
}
