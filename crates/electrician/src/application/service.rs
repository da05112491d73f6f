//! Lifecycle Service
//!
//! [`System`] owns a set of components and runs them through
//! `Unstarted → Starting → Started → Stopping → Stopped`.
//!
//! Execution is strictly sequential: one component operation at a time, in
//! resolved order, each awaited to completion before the next begins.

use crate::algorithms::resolve_start_order;
use crate::domain::entities::{
    Component, Context, Dependencies, StartOrder, SystemDefinition,
};
use crate::domain::errors::LifecycleError;
use crate::domain::value_objects::{
    ComponentName, ComponentValue, LifecycleState, Phase, SystemId,
};
use crate::ports::inbound::LifecycleApi;
use crate::ports::outbound::LifecycleObserver;
use async_trait::async_trait;
use std::fmt;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, debug_span, error, info, warn, Instrument};

/// A named collection of components with a start/stop lifecycle.
///
/// A system runs once. After it has stopped, or failed, build a new one.
pub struct System {
    id: SystemId,
    definition: SystemDefinition,
    state: LifecycleState,
    context: Context,
    start_order: Option<StartOrder>,
    observers: Vec<Arc<dyn LifecycleObserver>>,
}

impl System {
    /// Create an empty system
    pub fn new() -> Self {
        Self {
            id: SystemId::new(),
            definition: SystemDefinition::new(),
            state: LifecycleState::Unstarted,
            context: Context::new(),
            start_order: None,
            observers: Vec::new(),
        }
    }

    /// Create a system from `(name, component)` pairs. Registration order
    /// breaks ties between independent components.
    pub fn from_components<I, N>(components: I) -> Self
    where
        I: IntoIterator<Item = (N, Component)>,
        N: Into<ComponentName>,
    {
        components
            .into_iter()
            .fold(Self::new(), |system, (name, component)| {
                system.with_component(name, component)
            })
    }

    /// Register a component. A name registered twice keeps its first
    /// position and the later component.
    pub fn with_component(mut self, name: impl Into<ComponentName>, component: Component) -> Self {
        let name = name.into();
        if self.state != LifecycleState::Unstarted {
            warn!(
                system_id = %self.id,
                component = %name,
                state = %self.state,
                "Ignoring registration on a system that has already run"
            );
            return self;
        }
        if self.definition.insert(name.clone(), component).is_some() {
            warn!(system_id = %self.id, component = %name, "Component already registered, replacing");
        }
        self
    }

    /// Attach an observer. Observers are notified in attachment order.
    pub fn with_observer(mut self, observer: Arc<dyn LifecycleObserver>) -> Self {
        self.observers.push(observer);
        self
    }

    pub fn id(&self) -> SystemId {
        self.id
    }

    pub fn state(&self) -> LifecycleState {
        self.state
    }

    /// Start results collected so far.
    pub fn context(&self) -> &Context {
        &self.context
    }

    pub fn len(&self) -> usize {
        self.definition.len()
    }

    pub fn is_empty(&self) -> bool {
        self.definition.is_empty()
    }

    /// Registered names, in registration order.
    pub fn component_names(&self) -> &[ComponentName] {
        self.definition.names()
    }

    pub fn definition(&self) -> &SystemDefinition {
        &self.definition
    }

    /// Order in which components start. Resolved on demand until `start`
    /// has fixed it.
    pub fn start_order(&self) -> Result<StartOrder, LifecycleError> {
        match &self.start_order {
            Some(order) => Ok(order.clone()),
            None => resolve_start_order(&self.definition),
        }
    }

    /// Order in which components stop: the reverse of [`Self::start_order`].
    pub fn stop_order(&self) -> Result<Vec<ComponentName>, LifecycleError> {
        self.start_order().map(|order| order.stop_order())
    }

    /// Start all components in dependency order.
    ///
    /// On a component failure the error names the component, nothing after
    /// it is started, and nothing already started is stopped.
    pub async fn start(&mut self) -> Result<Context, LifecycleError> {
        self.ensure_state(Phase::Start, LifecycleState::Unstarted)?;
        self.transition(LifecycleState::Starting);

        info!(
            system_id = %self.id,
            components = self.definition.len(),
            "Starting system"
        );

        let order = match resolve_start_order(&self.definition) {
            Ok(order) => order,
            Err(e) => {
                error!(system_id = %self.id, error = %e, "Failed to resolve start order");
                self.transition(LifecycleState::Failed);
                return Err(e);
            }
        };
        self.start_order = Some(order.clone());

        for name in &order {
            if let Err(e) = self.start_component(name).await {
                self.transition(LifecycleState::Failed);
                return Err(e);
            }
        }

        self.transition(LifecycleState::Started);
        info!(
            system_id = %self.id,
            started = self.context.len(),
            "System started"
        );

        Ok(self.context.clone())
    }

    /// Stop all components in reverse start order.
    ///
    /// Aborts at the first failing component: components after it in the
    /// stop order are never stopped.
    pub async fn stop(&mut self) -> Result<(), LifecycleError> {
        self.ensure_state(Phase::Stop, LifecycleState::Started)?;
        let order = self.stop_order()?;
        self.transition(LifecycleState::Stopping);

        info!(system_id = %self.id, components = order.len(), "Stopping system");

        for name in &order {
            if let Err(e) = self.stop_component(name).await {
                self.transition(LifecycleState::Failed);
                return Err(e);
            }
        }

        self.transition(LifecycleState::Stopped);
        info!(system_id = %self.id, "System stopped");
        Ok(())
    }

    async fn start_component(&mut self, name: &ComponentName) -> Result<(), LifecycleError> {
        debug!(system_id = %self.id, component = %name, "Starting component");

        let future = {
            let component = self.lookup(name)?;
            if !component.has_start() {
                debug!(component = %name, "No start operation, skipping");
                return Ok(());
            }
            let dependencies =
                resolve_dependencies(&self.definition, &self.context, name, component)?;
            debug!(
                "Resolving {} dependencies for component {}",
                dependencies.len(),
                name
            );
            match component.invoke_start(dependencies) {
                Some(future) => future,
                None => return Ok(()),
            }
        };

        let started_at = Instant::now();
        match future
            .instrument(debug_span!("start", component = %name))
            .await
        {
            Ok(value) => {
                let elapsed = started_at.elapsed();
                debug!(
                    component = %name,
                    elapsed_ms = elapsed.as_millis() as u64,
                    value_type = value.type_name(),
                    "Component started"
                );
                self.context.insert(name.clone(), value);
                for observer in &self.observers {
                    observer.on_component_started(name, elapsed);
                }
                Ok(())
            }
            Err(source) => {
                error!(component = %name, error = %source, "Component failed to start");
                for observer in &self.observers {
                    observer.on_component_failed(name, Phase::Start, source.as_ref());
                }
                Err(LifecycleError::ComponentStart {
                    component: name.clone(),
                    source,
                })
            }
        }
    }

    async fn stop_component(&mut self, name: &ComponentName) -> Result<(), LifecycleError> {
        let Some(future) = self.lookup(name)?.invoke_stop() else {
            debug!(component = %name, "No stop operation, skipping");
            return Ok(());
        };

        debug!(system_id = %self.id, component = %name, "Stopping component");
        let stopped_at = Instant::now();
        match future
            .instrument(debug_span!("stop", component = %name))
            .await
        {
            Ok(()) => {
                let elapsed = stopped_at.elapsed();
                debug!(
                    component = %name,
                    elapsed_ms = elapsed.as_millis() as u64,
                    "Component stopped"
                );
                for observer in &self.observers {
                    observer.on_component_stopped(name, elapsed);
                }
                Ok(())
            }
            Err(source) => {
                error!(component = %name, error = %source, "Component failed to stop");
                for observer in &self.observers {
                    observer.on_component_failed(name, Phase::Stop, source.as_ref());
                }
                Err(LifecycleError::ComponentStop {
                    component: name.clone(),
                    source,
                })
            }
        }
    }

    /// Names in a resolved order are always registered; checked anyway.
    fn lookup(&self, name: &ComponentName) -> Result<&Component, LifecycleError> {
        self.definition
            .get(name.as_str())
            .ok_or_else(|| LifecycleError::UnknownComponent {
                name: name.clone(),
                referenced_by: None,
            })
    }

    fn ensure_state(&self, operation: Phase, expected: LifecycleState) -> Result<(), LifecycleError> {
        if self.state == expected {
            return Ok(());
        }
        warn!(
            system_id = %self.id,
            operation = %operation,
            state = %self.state,
            "Rejected lifecycle operation"
        );
        Err(LifecycleError::InvalidState {
            operation,
            state: self.state,
        })
    }

    fn transition(&mut self, to: LifecycleState) {
        let from = self.state;
        self.state = to;
        debug!(system_id = %self.id, %from, %to, "Lifecycle transition");
        for observer in &self.observers {
            observer.on_transition(self.id, from, to);
        }
    }
}

/// Collect the start results of `component`'s dependencies, in declared
/// order.
///
/// A dependency without a start operation contributes a unit value. A
/// dependency that has one but is missing from the context means the order
/// was wrong, which is reported as an internal error.
fn resolve_dependencies(
    definition: &SystemDefinition,
    context: &Context,
    name: &ComponentName,
    component: &Component,
) -> Result<Dependencies, LifecycleError> {
    component
        .dependencies()
        .iter()
        .map(|dependency| {
            if let Some(value) = context.value(dependency.as_str()) {
                return Ok((dependency.clone(), value.clone()));
            }
            match definition.get(dependency.as_str()) {
                Some(target) if !target.has_start() => {
                    Ok((dependency.clone(), ComponentValue::unit()))
                }
                Some(_) => Err(LifecycleError::Internal(format!(
                    "dependency {dependency} of {name} has not been started"
                ))),
                None => Err(LifecycleError::UnknownComponent {
                    name: dependency.clone(),
                    referenced_by: Some(name.clone()),
                }),
            }
        })
        .collect::<Result<Vec<_>, _>>()
        .map(Dependencies::new)
}

impl Default for System {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for System {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("System")
            .field("id", &self.id)
            .field("state", &self.state)
            .field("components", &self.definition.names())
            .field("started", &self.context.names())
            .finish()
    }
}

#[async_trait]
impl LifecycleApi for System {
    async fn start(&mut self) -> Result<Context, LifecycleError> {
        System::start(self).await
    }

    async fn stop(&mut self) -> Result<(), LifecycleError> {
        System::stop(self).await
    }

    fn start_order(&self) -> Result<StartOrder, LifecycleError> {
        System::start_order(self)
    }

    fn state(&self) -> LifecycleState {
        System::state(self)
    }
}
