//! Core entities for lifecycle orchestration

use super::errors::{BoxError, DependencyError};
use super::value_objects::{ComponentName, ComponentValue};
use futures::future::{BoxFuture, FutureExt};
use serde::Serialize;
use std::any::Any;
use std::collections::{HashMap, HashSet};
use std::fmt;
use std::future::Future;

/// Future returned by a component's start operation
pub type StartFuture = BoxFuture<'static, Result<ComponentValue, BoxError>>;

/// Future returned by a component's stop operation
pub type StopFuture = BoxFuture<'static, Result<(), BoxError>>;

type StartFn = Box<dyn Fn(Dependencies) -> StartFuture + Send + Sync>;
type StopFn = Box<dyn Fn() -> StopFuture + Send + Sync>;

/// A named unit with optional start and stop operations.
///
/// Dependencies belong to the start operation: a component without a start
/// operation has no dependencies, whatever was passed to
/// [`Component::depends_on`].
///
/// ```rust,ignore
/// let api = Component::new()
///     .depends_on(["db", "cache"])
///     .with_start_value(|deps| async move {
///         let db = deps.get::<DbPool>(0)?;
///         Ok(Api::new(db.clone()))
///     })
///     .with_stop(|| async { Ok(()) });
/// ```
#[derive(Default)]
pub struct Component {
    dependencies: Vec<ComponentName>,
    start: Option<StartFn>,
    stop: Option<StopFn>,
}

impl Component {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare the components whose start results the start operation
    /// receives, in positional order.
    pub fn depends_on<I, N>(mut self, dependencies: I) -> Self
    where
        I: IntoIterator<Item = N>,
        N: Into<ComponentName>,
    {
        self.dependencies = dependencies.into_iter().map(Into::into).collect();
        self
    }

    /// Set the start operation.
    pub fn with_start<F, Fut>(mut self, start: F) -> Self
    where
        F: Fn(Dependencies) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<ComponentValue, BoxError>> + Send + 'static,
    {
        self.start = Some(Box::new(move |deps| start(deps).boxed()));
        self
    }

    /// Set a start operation returning any `T`, wrapped into a
    /// [`ComponentValue`].
    pub fn with_start_value<F, Fut, T>(self, start: F) -> Self
    where
        F: Fn(Dependencies) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<T, BoxError>> + Send + 'static,
        T: Any + Send + Sync,
    {
        self.with_start(move |deps| start(deps).map(|result| result.map(ComponentValue::new)))
    }

    /// Set the stop operation.
    pub fn with_stop<F, Fut>(mut self, stop: F) -> Self
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<(), BoxError>> + Send + 'static,
    {
        self.stop = Some(Box::new(move || stop().boxed()));
        self
    }

    /// Ordered dependency names of the start operation.
    pub fn dependencies(&self) -> &[ComponentName] {
        if self.start.is_some() {
            &self.dependencies
        } else {
            &[]
        }
    }

    pub fn has_start(&self) -> bool {
        self.start.is_some()
    }

    pub fn has_stop(&self) -> bool {
        self.stop.is_some()
    }

    pub(crate) fn invoke_start(&self, dependencies: Dependencies) -> Option<StartFuture> {
        self.start.as_ref().map(|start| start(dependencies))
    }

    pub(crate) fn invoke_stop(&self) -> Option<StopFuture> {
        self.stop.as_ref().map(|stop| stop())
    }
}

impl fmt::Debug for Component {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Component")
            .field("dependencies", &self.dependencies())
            .field("has_start", &self.has_start())
            .field("has_stop", &self.has_stop())
            .finish()
    }
}

/// Resolved dependency values handed to a start operation, in declared order.
#[derive(Clone, Debug, Default)]
pub struct Dependencies {
    entries: Vec<(ComponentName, ComponentValue)>,
}

impl Dependencies {
    pub fn new(entries: Vec<(ComponentName, ComponentValue)>) -> Self {
        Self { entries }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &ComponentName> {
        self.entries.iter().map(|(name, _)| name)
    }

    /// Raw value at `index`.
    pub fn value(&self, index: usize) -> Option<&ComponentValue> {
        self.entries.get(index).map(|(_, value)| value)
    }

    /// Typed value at `index`.
    pub fn get<T: Any>(&self, index: usize) -> Result<&T, DependencyError> {
        let (name, value) = self
            .entries
            .get(index)
            .ok_or(DependencyError::Missing { index })?;
        downcast(name, value)
    }

    /// Typed value of the first dependency called `name`.
    pub fn by_name<T: Any>(&self, name: &str) -> Result<&T, DependencyError> {
        let (name, value) = self
            .entries
            .iter()
            .find(|(candidate, _)| candidate == name)
            .ok_or_else(|| DependencyError::NotDeclared { name: name.into() })?;
        downcast(name, value)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&ComponentName, &ComponentValue)> {
        self.entries.iter().map(|(name, value)| (name, value))
    }
}

impl FromIterator<(ComponentName, ComponentValue)> for Dependencies {
    fn from_iter<I: IntoIterator<Item = (ComponentName, ComponentValue)>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

fn downcast<'a, T: Any>(
    name: &ComponentName,
    value: &'a ComponentValue,
) -> Result<&'a T, DependencyError> {
    value
        .downcast_ref::<T>()
        .ok_or_else(|| DependencyError::TypeMismatch {
            name: name.clone(),
            expected: std::any::type_name::<T>(),
            actual: value.type_name(),
        })
}

/// Start results of every started component, in start order.
#[derive(Clone, Debug, Default)]
pub struct Context {
    order: Vec<ComponentName>,
    values: HashMap<ComponentName, ComponentValue>,
}

impl Context {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn insert(&mut self, name: ComponentName, value: ComponentValue) {
        if self.values.insert(name.clone(), value).is_none() {
            self.order.push(name);
        }
    }

    pub fn value(&self, name: &str) -> Option<&ComponentValue> {
        self.values.get(name)
    }

    /// Typed start result of `name`, if it started and returned a `T`.
    pub fn get<T: Any>(&self, name: &str) -> Option<&T> {
        self.value(name).and_then(ComponentValue::downcast_ref::<T>)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn names(&self) -> &[ComponentName] {
        &self.order
    }

    pub fn iter(&self) -> impl Iterator<Item = (&ComponentName, &ComponentValue)> {
        self.order
            .iter()
            .filter_map(|name| self.values.get(name).map(|value| (name, value)))
    }
}

/// Insertion-ordered table of components, keyed by name
#[derive(Debug, Default)]
pub struct SystemDefinition {
    order: Vec<ComponentName>,
    components: HashMap<ComponentName, Component>,
}

impl SystemDefinition {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a component. A re-registered name keeps its original position;
    /// the replaced component is returned.
    pub fn insert(&mut self, name: ComponentName, component: Component) -> Option<Component> {
        let replaced = self.components.insert(name.clone(), component);
        if replaced.is_none() {
            self.order.push(name);
        }
        replaced
    }

    pub fn get(&self, name: &str) -> Option<&Component> {
        self.components.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.components.contains_key(name)
    }

    pub fn names(&self) -> &[ComponentName] {
        &self.order
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Components in registration order.
    pub fn iter(&self) -> impl Iterator<Item = (&ComponentName, &Component)> {
        self.order
            .iter()
            .filter_map(|name| self.components.get(name).map(|c| (name, c)))
    }
}

/// Dependency graph over component names
///
/// Edges run from a dependent to each of its dependencies. Components with no
/// declared dependencies are kept apart in `independent`.
#[derive(Debug, Clone, Default)]
pub struct DependencyGraph {
    /// Components with at least one dependency, in registration order
    pub dependents: Vec<ComponentName>,
    /// Adjacency list: dependent -> [dependency, ...] in declared order
    pub edges: HashMap<ComponentName, Vec<ComponentName>>,
    /// Components with no dependencies, in registration order
    pub independent: Vec<ComponentName>,
}

impl DependencyGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register that `dependent` must follow each of `dependencies`.
    pub fn add_edges(&mut self, dependent: ComponentName, dependencies: &[ComponentName]) {
        if !self.edges.contains_key(&dependent) {
            self.dependents.push(dependent.clone());
        }
        let targets = self.edges.entry(dependent).or_default();
        for dependency in dependencies {
            if !targets.contains(dependency) {
                targets.push(dependency.clone());
            }
        }
    }

    pub fn add_independent(&mut self, name: ComponentName) {
        self.independent.push(name);
    }

    pub fn dependencies_of(&self, name: &ComponentName) -> &[ComponentName] {
        self.edges.get(name).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Check if `dependent` depends directly on `dependency`
    pub fn has_edge(&self, dependent: &ComponentName, dependency: &ComponentName) -> bool {
        self.dependencies_of(dependent).contains(dependency)
    }

    /// Number of distinct component names in the graph
    pub fn node_count(&self) -> usize {
        let mut nodes: HashSet<&ComponentName> = self.independent.iter().collect();
        for (dependent, dependencies) in &self.edges {
            nodes.insert(dependent);
            nodes.extend(dependencies);
        }
        nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.values().map(Vec::len).sum()
    }
}

/// Order in which components start: every dependency precedes its dependents.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct StartOrder(Vec<ComponentName>);

impl StartOrder {
    pub fn new(order: Vec<ComponentName>) -> Self {
        Self(order)
    }

    pub fn as_slice(&self) -> &[ComponentName] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ComponentName> {
        self.0.iter()
    }

    pub fn position(&self, name: &str) -> Option<usize> {
        self.0.iter().position(|candidate| candidate == name)
    }

    /// Stop order: the exact reverse of the start order.
    pub fn stop_order(&self) -> Vec<ComponentName> {
        self.0.iter().rev().cloned().collect()
    }

    pub fn into_inner(self) -> Vec<ComponentName> {
        self.0
    }
}

impl<'a> IntoIterator for &'a StartOrder {
    type Item = &'a ComponentName;
    type IntoIter = std::slice::Iter<'a, ComponentName>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
