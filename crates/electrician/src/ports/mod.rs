//! Ports (hexagonal architecture)

pub mod inbound;
pub mod outbound;

pub use inbound::LifecycleApi;
pub use outbound::{Lifecycle, LifecycleObserver};
