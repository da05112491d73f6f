//! Domain invariants for start orders
//!
//! Checked after every resolution in debug builds and exercised directly by
//! the property tests.

use super::entities::{DependencyGraph, StartOrder, SystemDefinition};
use super::value_objects::ComponentName;
use std::collections::{HashMap, HashSet};

/// Topological Order
/// For every edge A → B (A depends on B), B starts before A.
pub fn invariant_topological_order(order: &StartOrder, graph: &DependencyGraph) -> bool {
    let positions: HashMap<&ComponentName, usize> = order
        .iter()
        .enumerate()
        .map(|(index, name)| (name, index))
        .collect();

    graph.edges.iter().all(|(dependent, dependencies)| {
        let Some(dependent_pos) = positions.get(dependent) else {
            return false;
        };
        dependencies.iter().all(|dependency| {
            positions
                .get(dependency)
                .is_some_and(|pos| pos < dependent_pos)
        })
    })
}

/// Completeness
/// Every registered component appears in the order, and nothing else does.
pub fn invariant_completeness(order: &StartOrder, definition: &SystemDefinition) -> bool {
    let ordered: HashSet<&ComponentName> = order.iter().collect();
    let registered: HashSet<&ComponentName> = definition.names().iter().collect();

    ordered == registered
}

/// No Duplicates
/// Each component name appears exactly once.
pub fn invariant_no_duplicates(order: &StartOrder) -> bool {
    let mut seen = HashSet::with_capacity(order.len());
    order.iter().all(|name| seen.insert(name))
}
