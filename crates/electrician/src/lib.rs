//! # Electrician: Component Lifecycle Orchestration
//!
//! Starts a set of named components in dependency order, hands each one the
//! start results of the components it depends on, and stops them again in
//! exact reverse order.
//!
//! ## Architecture
//!
//! - **Domain**: Core entities (Component, Dependencies, Context, DependencyGraph, StartOrder)
//! - **Algorithms**: Reference validation, depth-first topological sort, order resolution
//! - **Ports**: Inbound (LifecycleApi) and Outbound (Lifecycle, LifecycleObserver)
//! - **Application**: The `System` executor
//!
//! ## Example
//!
//! ```rust,ignore
//! let mut system = System::new()
//!     .with_component("config", Component::new().with_start_value(|_| async {
//!         Ok::<_, BoxError>(Config::load()?)
//!     }))
//!     .with_component("db", Component::new()
//!         .depends_on(["config"])
//!         .with_start_value(|deps| async move {
//!             let config = deps.get::<Config>(0)?;
//!             Ok::<_, BoxError>(Pool::connect(&config.url).await?)
//!         }));
//!
//! let context = system.start().await?;
//! let pool = context.get::<Pool>("db");
//! system.stop().await?;
//! ```

pub mod algorithms;
pub mod application;
pub mod domain;
pub mod ports;

pub use algorithms::{resolve_start_order, resolve_stop_order};
pub use application::service::System;
pub use domain::entities::*;
pub use domain::errors::{BoxError, DependencyError, LifecycleError};
pub use domain::value_objects::*;
pub use ports::inbound::LifecycleApi;
pub use ports::outbound::{Lifecycle, LifecycleObserver};
