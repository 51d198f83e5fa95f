//! Store adapter errors

use thiserror::Error;

use crate::model::{EntityId, ResourceKind};

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Store adapter errors
#[derive(Debug, Clone, Error)]
pub enum StoreError {
    /// No entity of the kind with that id
    #[error("{kind} {id} not found")]
    NotFound { kind: ResourceKind, id: EntityId },

    /// Store-internal failure
    #[error("store error: {0}")]
    Internal(String),
}

impl StoreError {
    /// Create a not-found error
    pub fn not_found(kind: ResourceKind, id: EntityId) -> Self {
        Self::NotFound { kind, id }
    }

    /// Create an internal error
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }
}
