//! Surge engine error types.

use healthflow_core::error::HealthflowError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SurgeError {
    #[error("emergency activation requires a reason")]
    MissingReason,

    #[error("surge percentage {0} is outside 0..=100")]
    InvalidSurgePercent(u32),
}

impl From<SurgeError> for HealthflowError {
    fn from(err: SurgeError) -> Self {
        match err {
            SurgeError::MissingReason | SurgeError::InvalidSurgePercent(_) => {
                HealthflowError::Validation {
                    message: err.to_string(),
                }
            }
        }
    }
}
