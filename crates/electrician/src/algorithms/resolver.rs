//! Start order resolution
//!
//! Combines the dependency graph and the topological sort into the final
//! start order: sorted dependents first, then every component that declared
//! no dependencies, each name kept at its first occurrence.

use super::dependency_builder::build_dependency_graph;
use super::toposort::topological_sort;
use crate::domain::entities::{StartOrder, SystemDefinition};
use crate::domain::errors::LifecycleError;
use crate::domain::value_objects::ComponentName;
use crate::domain::invariants::{
    invariant_completeness, invariant_no_duplicates, invariant_topological_order,
};
use std::collections::HashSet;
use tracing::debug;

/// Resolve the order in which the components of `definition` start.
///
/// Fails with [`LifecycleError::UnknownComponent`] if a dependency is not
/// registered, or [`LifecycleError::CyclicDependency`] if the graph has a
/// cycle. Unknown names are checked first.
pub fn resolve_start_order(definition: &SystemDefinition) -> Result<StartOrder, LifecycleError> {
    let graph = build_dependency_graph(definition)?;
    let sorted = topological_sort(&graph)?;

    let mut seen = HashSet::with_capacity(definition.len());
    let order: Vec<_> = sorted
        .into_iter()
        .chain(graph.independent.iter().cloned())
        .filter(|name| seen.insert(name.clone()))
        .collect();
    let order = StartOrder::new(order);

    debug_assert!(invariant_topological_order(&order, &graph));
    debug_assert!(invariant_completeness(&order, definition));
    debug_assert!(invariant_no_duplicates(&order));

    debug!(
        components = order.len(),
        edges = graph.edge_count(),
        "Resolved start order"
    );

    Ok(order)
}

/// Stop order for `definition`: the reverse of its start order.
pub fn resolve_stop_order(
    definition: &SystemDefinition,
) -> Result<Vec<ComponentName>, LifecycleError> {
    resolve_start_order(definition).map(|order| order.stop_order())
}
