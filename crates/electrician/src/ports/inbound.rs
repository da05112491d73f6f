//! Inbound Ports (Driving Ports / API)

use crate::domain::entities::{Context, StartOrder};
use crate::domain::errors::LifecycleError;
use crate::domain::value_objects::LifecycleState;
use async_trait::async_trait;

/// Primary lifecycle API of a system.
#[async_trait]
pub trait LifecycleApi: Send {
    /// Start every component in dependency order.
    ///
    /// This is the main entry point. It:
    /// 1. Resolves the start order (fails before touching any component on
    ///    an unknown name or a cycle)
    /// 2. Starts each component, injecting its dependencies' start results
    /// 3. Returns the populated context
    async fn start(&mut self) -> Result<Context, LifecycleError>;

    /// Stop every component in reverse start order.
    ///
    /// Aborts at the first failing component; the remaining ones are left
    /// running.
    async fn stop(&mut self) -> Result<(), LifecycleError>;

    /// Start order without running anything.
    fn start_order(&self) -> Result<StartOrder, LifecycleError>;

    /// Current lifecycle state.
    fn state(&self) -> LifecycleState;
}
