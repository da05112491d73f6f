//! Value objects for lifecycle orchestration
//!
//! Names, type-erased start results, and the lifecycle state machine.

use serde::{Deserialize, Serialize};
use std::any::Any;
use std::borrow::Borrow;
use std::fmt;
use std::sync::Arc;
use uuid::Uuid;

/// Unique name of a component within a system.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ComponentName(String);

impl ComponentName {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ComponentName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ComponentName {
    fn from(name: &str) -> Self {
        Self(name.to_string())
    }
}

impl From<String> for ComponentName {
    fn from(name: String) -> Self {
        Self(name)
    }
}

impl From<&String> for ComponentName {
    fn from(name: &String) -> Self {
        Self(name.clone())
    }
}

impl From<&ComponentName> for ComponentName {
    fn from(name: &ComponentName) -> Self {
        name.clone()
    }
}

impl AsRef<str> for ComponentName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for ComponentName {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl PartialEq<str> for ComponentName {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for ComponentName {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

/// Type-erased result of a component's start operation.
///
/// Cloning is cheap: the value itself is shared. Components that have
/// nothing meaningful to hand out return [`ComponentValue::unit`].
#[derive(Clone)]
pub struct ComponentValue {
    inner: Arc<dyn Any + Send + Sync>,
    type_name: &'static str,
}

impl ComponentValue {
    pub fn new<T: Any + Send + Sync>(value: T) -> Self {
        Self {
            inner: Arc::new(value),
            type_name: std::any::type_name::<T>(),
        }
    }

    /// The "nothing returned" value.
    pub fn unit() -> Self {
        Self::new(())
    }

    pub fn is_unit(&self) -> bool {
        self.inner.is::<()>()
    }

    pub fn is<T: Any>(&self) -> bool {
        self.inner.is::<T>()
    }

    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.inner.downcast_ref::<T>()
    }

    /// Shared handle to the value, if it has type `T`.
    pub fn downcast<T: Any + Send + Sync>(&self) -> Option<Arc<T>> {
        Arc::clone(&self.inner).downcast::<T>().ok()
    }

    /// Name of the concrete type stored, for diagnostics.
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }
}

impl Default for ComponentValue {
    fn default() -> Self {
        Self::unit()
    }
}

impl fmt::Debug for ComponentValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ComponentValue({})", self.type_name)
    }
}

/// Which half of the lifecycle an operation belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    Start,
    Stop,
}

impl Phase {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Start => "start",
            Self::Stop => "stop",
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Lifecycle state of a system instance.
///
/// ```text
/// Unstarted → Starting → Started → Stopping → Stopped
///                │                    │
///                └──→ Failed ←────────┘
/// ```
///
/// `Failed` and `Stopped` are terminal: build a new system to run again.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LifecycleState {
    Unstarted,
    Starting,
    Started,
    Stopping,
    Stopped,
    Failed,
}

impl LifecycleState {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Unstarted => "unstarted",
            Self::Starting => "starting",
            Self::Started => "started",
            Self::Stopping => "stopping",
            Self::Stopped => "stopped",
            Self::Failed => "failed",
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Stopped | Self::Failed)
    }
}

impl fmt::Display for LifecycleState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Identifier of a system instance, for correlating log lines.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SystemId(Uuid);

impl SystemId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for SystemId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for SystemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
