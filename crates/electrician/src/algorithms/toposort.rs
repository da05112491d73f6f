//! Depth-first topological sort
//!
//! O(V + E) over the registered edges, driven by an explicit stack so chain
//! depth is bounded by memory rather than the thread stack. Roots are visited
//! in registration order and dependencies in declared order, so the result
//! only depends on the system definition, never on hashing.

use crate::domain::entities::DependencyGraph;
use crate::domain::errors::LifecycleError;
use crate::domain::value_objects::ComponentName;
use std::collections::HashSet;

/// Sort the edge set of `graph` so that every dependency precedes its
/// dependents.
///
/// Only names that take part in at least one edge are returned; components
/// recorded as independent are appended by the resolver.
pub fn topological_sort(graph: &DependencyGraph) -> Result<Vec<ComponentName>, LifecycleError> {
    let mut order = Vec::with_capacity(graph.dependents.len() + graph.edge_count());
    let mut visited: HashSet<&ComponentName> = HashSet::new();
    let mut on_path: HashSet<&ComponentName> = HashSet::new();
    // Active path: (node, index of its next dependency to visit)
    let mut stack: Vec<(&ComponentName, usize)> = Vec::new();

    for root in &graph.dependents {
        if !visited.insert(root) {
            continue;
        }
        on_path.insert(root);
        stack.push((root, 0));

        while let Some(frame) = stack.last_mut() {
            let (node, next) = *frame;
            match graph.dependencies_of(node).get(next) {
                Some(dependency) => {
                    frame.1 += 1;
                    if on_path.contains(dependency) {
                        return Err(cycle_through(&stack, dependency));
                    }
                    if visited.insert(dependency) {
                        on_path.insert(dependency);
                        stack.push((dependency, 0));
                    }
                }
                None => {
                    stack.pop();
                    on_path.remove(node);
                    order.push(node.clone());
                }
            }
        }
    }

    Ok(order)
}

/// Back edge to `repeated`: report the loop from its position on the path.
fn cycle_through(stack: &[(&ComponentName, usize)], repeated: &ComponentName) -> LifecycleError {
    let start = stack
        .iter()
        .position(|(node, _)| *node == repeated)
        .unwrap_or(0);
    let mut cycle: Vec<ComponentName> = stack[start..]
        .iter()
        .map(|(node, _)| (*node).clone())
        .collect();
    cycle.push(repeated.clone());
    LifecycleError::CyclicDependency { cycle }
}
