use thiserror::Error;

/// Error for operations against an entity store.
#[derive(Debug, Clone, Error)]
pub enum StoreError {
    #[error("Entity not found: {0}")]
    NotFound(String),

    #[error("Database error: {0}")]
    DatabaseError(String),
}
