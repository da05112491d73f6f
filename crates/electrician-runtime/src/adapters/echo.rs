//! Echo components
//!
//! Manifest-driven components that log what they receive and return
//! `"Component <name>"` from start.

use crate::manifest::ComponentSpec;
use async_trait::async_trait;
use electrician::{BoxError, Component, ComponentName, ComponentValue, Dependencies, Lifecycle};
use electrician_telemetry::log_component_event;
use std::sync::Arc;
use std::time::Duration;

/// A component described by a [`ComponentSpec`].
#[derive(Debug, Clone)]
pub struct EchoComponent {
    name: ComponentName,
    spec: ComponentSpec,
}

impl EchoComponent {
    pub fn new(spec: ComponentSpec) -> Self {
        Self {
            name: ComponentName::new(spec.name.clone()),
            spec,
        }
    }

    pub fn name(&self) -> &ComponentName {
        &self.name
    }

    /// Start result of this component.
    pub fn greeting(&self) -> String {
        format!("Component {}", self.name)
    }

    /// Adapt into a [`Component`], keeping only the operations the manifest
    /// enables.
    pub fn into_component(self) -> Component {
        let echo = Arc::new(self);
        let mut component = Component::new();

        if echo.spec.start {
            let starter = Arc::clone(&echo);
            component = component
                .depends_on(echo.dependencies())
                .with_start(move |deps| {
                    let starter = Arc::clone(&starter);
                    async move { starter.start(deps).await }
                });
        }

        if echo.spec.stop {
            let stopper = Arc::clone(&echo);
            component = component.with_stop(move || {
                let stopper = Arc::clone(&stopper);
                async move { stopper.stop().await }
            });
        }

        component
    }
}

#[async_trait]
impl Lifecycle for EchoComponent {
    fn dependencies(&self) -> Vec<ComponentName> {
        self.spec.depends_on.iter().map(ComponentName::from).collect()
    }

    async fn start(&self, dependencies: Dependencies) -> Result<ComponentValue, BoxError> {
        log_component_event!(info, self.name, "Starting component");
        for (position, (dependency, value)) in dependencies.iter().enumerate() {
            log_component_event!(
                info,
                self.name,
                "Injected dependency",
                position = position,
                dependency = %dependency,
                value = %describe(value)
            );
        }

        if self.spec.start_delay_ms > 0 {
            tokio::time::sleep(Duration::from_millis(self.spec.start_delay_ms)).await;
        }

        if let Some(message) = &self.spec.fail_on_start {
            return Err(message.clone().into());
        }

        Ok(ComponentValue::new(self.greeting()))
    }

    async fn stop(&self) -> Result<(), BoxError> {
        log_component_event!(info, self.name, "Stopping component");

        match &self.spec.fail_on_stop {
            Some(message) => Err(message.clone().into()),
            None => Ok(()),
        }
    }
}

/// Human-readable rendering of a start result.
pub fn describe(value: &ComponentValue) -> String {
    if value.is_unit() {
        "()".to_string()
    } else if let Some(text) = value.downcast_ref::<String>() {
        text.clone()
    } else if let Some(text) = value.downcast_ref::<&'static str>() {
        (*text).to_string()
    } else {
        format!("<{}>", value.type_name())
    }
}
