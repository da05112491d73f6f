//! Dependency Graph Builder
//!
//! Builds the dependency graph from a system definition.

use crate::domain::entities::{DependencyGraph, SystemDefinition};
use crate::domain::errors::LifecycleError;

/// Build the dependency graph for `definition`.
///
/// Every referenced name is validated before any edge is registered, so an
/// unknown name is reported even when it sits inside a cycle.
pub fn build_dependency_graph(
    definition: &SystemDefinition,
) -> Result<DependencyGraph, LifecycleError> {
    validate_references(definition)?;

    let mut graph = DependencyGraph::new();
    for (name, component) in definition.iter() {
        let dependencies = component.dependencies();
        if dependencies.is_empty() {
            graph.add_independent(name.clone());
        } else {
            graph.add_edges(name.clone(), dependencies);
        }
    }

    Ok(graph)
}

/// Fail on the first dependency name (in registration, then declaration
/// order) that is not a registered component.
pub fn validate_references(definition: &SystemDefinition) -> Result<(), LifecycleError> {
    for (name, component) in definition.iter() {
        if let Some(missing) = component
            .dependencies()
            .iter()
            .find(|dependency| !definition.contains(dependency.as_str()))
        {
            return Err(LifecycleError::UnknownComponent {
                name: missing.clone(),
                referenced_by: Some(name.clone()),
            });
        }
    }
    Ok(())
}
