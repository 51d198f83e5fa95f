//! Resource kinds and document field conventions
//!
//! Entities are JSON documents held by the store. The relational fields
//! (`account` on a tweet, `tweets` on an account) carry the id-level
//! linkage between the two collections; everything else in a document is
//! opaque to the service.

use std::fmt;

use serde_json::Value;

/// Store-assigned numeric entity identity.
pub type EntityId = u64;

/// Document field holding the store-assigned id.
pub const ID_FIELD: &str = "id";

/// Tweet field naming the owning account by id.
pub const ACCOUNT_FIELD: &str = "account";

/// Account field listing owned tweet ids in insertion order.
pub const TWEETS_FIELD: &str = "tweets";

/// The two linked resource collections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    Tweet,
    Account,
}

impl ResourceKind {
    /// URL path segment for the kind's collection.
    pub fn collection(&self) -> &'static str {
        match self {
            Self::Tweet => "tweets",
            Self::Account => "accounts",
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Tweet => write!(f, "tweet"),
            Self::Account => write!(f, "account"),
        }
    }
}

/// Store-assigned id of a document, if present.
pub fn entity_id(doc: &Value) -> Option<EntityId> {
    doc.get(ID_FIELD).and_then(Value::as_u64)
}

/// Owning account id of a tweet document.
pub fn account_of(doc: &Value) -> Option<EntityId> {
    doc.get(ACCOUNT_FIELD).and_then(Value::as_u64)
}

/// Owned tweet ids of an account document, in stored order.
pub fn owned_tweets(doc: &Value) -> Vec<EntityId> {
    doc.get(TWEETS_FIELD)
        .and_then(Value::as_array)
        .map(|ids| ids.iter().filter_map(Value::as_u64).collect())
        .unwrap_or_default()
}
