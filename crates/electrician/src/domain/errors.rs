//! Error types for lifecycle orchestration

use super::value_objects::{ComponentName, LifecycleState, Phase};
use thiserror::Error;

/// Error returned by a component's own start or stop operation.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// All errors that can occur while resolving or running a system
#[derive(Debug, Error)]
pub enum LifecycleError {
    /// The dependency graph contains a cycle
    #[error("Cyclic dependency found: {}", format_cycle(.cycle))]
    CyclicDependency { cycle: Vec<ComponentName> },

    /// A referenced component is not registered
    #[error("Unknown component: {name}")]
    UnknownComponent {
        name: ComponentName,
        /// The component whose dependency list named it, if any.
        referenced_by: Option<ComponentName>,
    },

    /// A component's start operation failed
    #[error("{component}: {source}")]
    ComponentStart {
        component: ComponentName,
        #[source]
        source: BoxError,
    },

    /// A component's stop operation failed
    #[error("{component}: {source}")]
    ComponentStop {
        component: ComponentName,
        #[source]
        source: BoxError,
    },

    /// Operation not allowed in the current lifecycle state
    #[error("Cannot {operation} a system that is {state}")]
    InvalidState {
        operation: Phase,
        state: LifecycleState,
    },

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl LifecycleError {
    /// Name of the component this error is attributed to, if any.
    pub fn component(&self) -> Option<&ComponentName> {
        match self {
            Self::UnknownComponent { name, .. } => Some(name),
            Self::ComponentStart { component, .. } | Self::ComponentStop { component, .. } => {
                Some(component)
            }
            Self::CyclicDependency { .. } | Self::InvalidState { .. } | Self::Internal(_) => None,
        }
    }

    /// Lifecycle phase the failing operation belonged to, if any.
    pub fn phase(&self) -> Option<Phase> {
        match self {
            Self::ComponentStart { .. } => Some(Phase::Start),
            Self::ComponentStop { .. } => Some(Phase::Stop),
            Self::InvalidState { operation, .. } => Some(*operation),
            _ => None,
        }
    }

    /// True for errors in the system definition itself (cycles, unknown
    /// names). These surface before any component runs.
    pub fn is_fatal_input(&self) -> bool {
        matches!(
            self,
            Self::CyclicDependency { .. } | Self::UnknownComponent { .. }
        )
    }
}

fn format_cycle(cycle: &[ComponentName]) -> String {
    cycle
        .iter()
        .map(ComponentName::as_str)
        .collect::<Vec<_>>()
        .join(" -> ")
}

/// Errors reading a dependency value inside a start operation
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DependencyError {
    #[error("No dependency at position {index}")]
    Missing { index: usize },

    #[error("No dependency named {name}")]
    NotDeclared { name: ComponentName },

    #[error("Dependency {name} is {actual}, expected {expected}")]
    TypeMismatch {
        name: ComponentName,
        expected: &'static str,
        actual: &'static str,
    },
}
