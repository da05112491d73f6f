//! Outbound Ports (Driven Ports / SPI)
//!
//! What the orchestrator drives: the components themselves, and whoever
//! wants to watch them start and stop.

use crate::domain::entities::{Component, Dependencies};
use crate::domain::errors::BoxError;
use crate::domain::value_objects::{ComponentName, ComponentValue, LifecycleState, Phase, SystemId};
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;

/// Struct-style component.
///
/// An alternative to the closure builders on [`Component`] for components
/// that carry their own state.
///
/// ```rust,ignore
/// struct Cache { url: String }
///
/// #[async_trait]
/// impl Lifecycle for Cache {
///     fn dependencies(&self) -> Vec<ComponentName> { vec!["config".into()] }
///     async fn start(&self, deps: Dependencies) -> Result<ComponentValue, BoxError> {
///         let config = deps.get::<Config>(0)?;
///         Ok(ComponentValue::new(CacheClient::connect(&self.url, config).await?))
///     }
/// }
///
/// let cache = Component::from_lifecycle(Arc::new(Cache { url }));
/// ```
#[async_trait]
pub trait Lifecycle: Send + Sync + 'static {
    /// Components whose start results `start` receives, in order.
    fn dependencies(&self) -> Vec<ComponentName> {
        Vec::new()
    }

    async fn start(&self, dependencies: Dependencies) -> Result<ComponentValue, BoxError>;

    async fn stop(&self) -> Result<(), BoxError> {
        Ok(())
    }
}

impl Component {
    /// Adapt a [`Lifecycle`] implementation. The component always exposes
    /// both a start and a stop operation.
    pub fn from_lifecycle<L: Lifecycle>(component: Arc<L>) -> Self {
        let starter = Arc::clone(&component);
        Component::new()
            .depends_on(component.dependencies())
            .with_start(move |deps| {
                let starter = Arc::clone(&starter);
                async move { starter.start(deps).await }
            })
            .with_stop(move || {
                let stopper = Arc::clone(&component);
                async move { stopper.stop().await }
            })
    }
}

/// Observer of lifecycle progress.
///
/// Callbacks run inline on the executor, between component operations, and
/// cannot change the outcome. All methods default to no-ops.
pub trait LifecycleObserver: Send + Sync {
    fn on_transition(&self, _system: SystemId, _from: LifecycleState, _to: LifecycleState) {}

    fn on_component_started(&self, _component: &ComponentName, _elapsed: Duration) {}

    fn on_component_stopped(&self, _component: &ComponentName, _elapsed: Duration) {}

    fn on_component_failed(
        &self,
        _component: &ComponentName,
        _phase: Phase,
        _error: &(dyn std::error::Error + Send + Sync + 'static),
    ) {
    }
}
