//! Domain module for lifecycle orchestration
//!
//! Contains core entities, value objects, errors, and invariants.

pub mod entities;
pub mod errors;
pub mod invariants;
pub mod value_objects;

pub use entities::*;
pub use errors::*;
pub use value_objects::*;
