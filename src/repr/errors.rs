//! Representation mapper errors

use thiserror::Error;

use crate::model::EntityId;
use crate::store::StoreError;

/// Result type for projection operations
pub type ReprResult<T> = Result<T, ReprError>;

/// Projection failures
///
/// Dangling references mean the stored graph no longer satisfies the
/// tweet/account linkage invariant; they surface as server errors, not
/// client errors.
#[derive(Debug, Clone, Error)]
pub enum ReprError {
    /// Document carries no store-assigned id
    #[error("stored document has no id")]
    MissingId,

    /// Tweet document has no usable account reference
    #[error("tweet {tweet} has no account reference")]
    MissingAccount { tweet: EntityId },

    /// Account lists a tweet id the store no longer holds
    #[error("account {account} references missing tweet {tweet}")]
    DanglingTweet { account: EntityId, tweet: EntityId },

    /// Store failure during projection
    #[error(transparent)]
    Store(#[from] StoreError),

    /// View serialization failure
    #[error("serialize: {0}")]
    Serialize(String),
}

impl From<serde_json::Error> for ReprError {
    fn from(e: serde_json::Error) -> Self {
        Self::Serialize(e.to_string())
    }
}
