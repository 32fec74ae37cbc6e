//! Database-specific error types and conversions.

use healthflow_core::error::HealthflowError;

/// Database-layer error type.
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error("SurrealDB error: {0}")]
    Surreal(#[from] surrealdb::Error),

    #[error("Migration failed: {0}")]
    Migration(String),

    #[error("Query failed: {0}")]
    Query(String),

    #[error("Malformed row: {0}")]
    Decode(String),

    #[error("Record not found: {entity} with id {id}")]
    NotFound { entity: String, id: String },
}

impl From<DbError> for HealthflowError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::NotFound { entity, id } => HealthflowError::NotFound { entity, id },
            other => HealthflowError::Database(other.to_string()),
        }
    }
}
