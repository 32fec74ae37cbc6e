//! HealthFlow Surge — emergency surge reallocation.
//!
//! [`propose_reallocation`] is the pure planning step;
//! [`ReallocationEngine`] wires it to the resource store, owns the
//! process-wide emergency flag and records the accompanying emergency
//! events and notifications.

pub mod config;
pub mod error;
pub mod plan;
pub mod service;

pub use config::SurgeConfig;
pub use error::SurgeError;
pub use plan::{ReallocationOutcome, ReallocationPlan, propose_reallocation};
pub use service::{EmergencyOverview, ReallocationEngine};
