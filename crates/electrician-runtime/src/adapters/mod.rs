//! Adapters between manifests, the orchestrator and telemetry.

pub mod echo;
pub mod metrics_observer;

pub use echo::{describe, EchoComponent};
pub use metrics_observer::MetricsObserver;
