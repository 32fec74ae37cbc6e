//! Startup and serve-loop errors.

use healthflow_db::DbError;
use healthflow_surge::SurgeError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServerError {
    #[error("database connection failed: {0}")]
    Connect(#[from] surrealdb::Error),

    #[error("database migration failed: {0}")]
    Migration(#[from] DbError),

    #[error("invalid surge configuration: {0}")]
    Surge(#[from] SurgeError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
