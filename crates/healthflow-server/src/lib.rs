//! HealthFlow Server — HTTP surface for the resource store and the
//! surge reallocation engine.

pub mod api;
pub mod config;
pub mod error;
pub mod telemetry;

pub use config::ServerArgs;
pub use error::ServerError;
