//! Algorithms module for lifecycle orchestration
//!
//! Contains:
//! - Dependency graph builder (with reference validation)
//! - Depth-first topological sort with cycle reporting
//! - Start/stop order resolver

pub mod dependency_builder;
pub mod resolver;
pub mod toposort;

pub use dependency_builder::{build_dependency_graph, validate_references};
pub use resolver::{resolve_start_order, resolve_stop_order};
pub use toposort::topological_sort;
