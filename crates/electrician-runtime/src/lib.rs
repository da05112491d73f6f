//! # Electrician Runtime
//!
//! Runs a manifest-described system once: start everything in dependency
//! order, report what each component returned, stop everything in reverse.
//!
//! ## Run Sequence
//!
//! 1. Load configuration (env)
//! 2. Initialize telemetry (logging + metrics)
//! 3. Build the system from the manifest, with a metrics observer attached
//! 4. Start, log the context, stop
//! 5. Optionally print the metrics
//!
//! The binary in `main.rs` is a thin wrapper around [`run`].

pub mod adapters;
pub mod config;
pub mod manifest;

pub use config::RuntimeConfig;
pub use manifest::{ComponentSpec, ManifestError, SystemManifest};

use std::sync::Arc;

use anyhow::{Context as _, Result};
use electrician::{LifecycleError, System};
use electrician_telemetry::log_system_event;
use tracing::{info, warn};

use crate::adapters::{describe, EchoComponent, MetricsObserver};

/// What a completed run observed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunReport {
    /// Names in the order they were started.
    pub start_order: Vec<String>,
    /// Start result of each started component, rendered as text.
    pub context: Vec<(String, String)>,
}

/// Build a system of echo components from `manifest`.
pub fn build_system(manifest: &SystemManifest) -> System {
    manifest
        .components
        .iter()
        .fold(System::new(), |system, spec| {
            system.with_component(
                spec.name.as_str(),
                EchoComponent::new(spec.clone()).into_component(),
            )
        })
        .with_observer(Arc::new(MetricsObserver))
}

/// Start and stop the system described by `manifest`.
///
/// A component that fails to start leaves the components before it running;
/// they are reported, not stopped.
pub async fn run(manifest: &SystemManifest) -> Result<RunReport> {
    let mut system = build_system(manifest);
    let system_id = system.id();

    log_system_event!(info, system_id, "Running system", components = system.len());

    let context = match system.start().await {
        Ok(context) => context,
        Err(e) => {
            report_partial_start(&system, &e);
            return Err(e).with_context(|| format!("System {system_id} failed to start"));
        }
    };

    let report = RunReport {
        start_order: system
            .start_order()?
            .iter()
            .map(|name| name.to_string())
            .collect(),
        context: context
            .iter()
            .map(|(name, value)| (name.to_string(), describe(value)))
            .collect(),
    };

    for (name, value) in &report.context {
        info!(component = %name, value = %value, "Component ready");
    }
    info!("System started");

    system
        .stop()
        .await
        .with_context(|| format!("System {system_id} failed to stop"))?;
    info!("System stopped");

    Ok(report)
}

fn report_partial_start(system: &System, error: &LifecycleError) {
    let running: Vec<&str> = system
        .context()
        .names()
        .iter()
        .map(|name| name.as_str())
        .collect();

    if !running.is_empty() {
        warn!(
            error = %error,
            running = ?running,
            "Start failed; components already started are left running"
        );
    }
}
