//! Domain models for HealthFlow.
//!
//! These are the core types shared across all crates.

pub mod emergency;
pub mod notification;
pub mod resource;
