//! HealthFlow Core — domain models, error types and repository traits
//! shared by every HealthFlow crate.

pub mod error;
pub mod models;
pub mod repository;

pub use error::{HealthflowError, HealthflowResult};
