//! Application layer: the lifecycle service

pub mod service;

pub use service::System;
