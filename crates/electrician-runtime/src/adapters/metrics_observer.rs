//! Prometheus adapter for the lifecycle observer port.

use electrician::{ComponentName, LifecycleObserver, LifecycleState, Phase, SystemId};
use electrician_telemetry::metrics;
use std::error::Error;
use std::time::Duration;

/// Feeds lifecycle progress into the `electrician_*` metrics.
#[derive(Debug, Default, Clone, Copy)]
pub struct MetricsObserver;

impl LifecycleObserver for MetricsObserver {
    fn on_transition(&self, _system: SystemId, _from: LifecycleState, to: LifecycleState) {
        metrics::record_transition(to.as_str());
    }

    fn on_component_started(&self, _component: &ComponentName, elapsed: Duration) {
        metrics::record_component_started(elapsed);
    }

    fn on_component_stopped(&self, _component: &ComponentName, elapsed: Duration) {
        metrics::record_component_stopped(elapsed);
    }

    fn on_component_failed(
        &self,
        _component: &ComponentName,
        phase: Phase,
        _error: &(dyn Error + Send + Sync + 'static),
    ) {
        metrics::record_component_failure(phase.as_str());
    }
}
