//! Kind-dispatched projection of stored documents into wire views

use serde::Serialize;
use serde_json::{Map, Value};

use crate::model::{self, EntityId, ResourceKind, ACCOUNT_FIELD, ID_FIELD, TWEETS_FIELD};
use crate::store::{Store, StoreError};

use super::errors::{ReprError, ReprResult};

/// Canonical URL derivation from the configured base
#[derive(Debug, Clone)]
pub struct Links {
    base: String,
}

impl Links {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base: String = base_url.into();
        Self {
            base: base.trim_end_matches('/').to_string(),
        }
    }

    /// URL of a single resource.
    pub fn resource(&self, kind: ResourceKind, id: EntityId) -> String {
        format!("{}/{}/{}", self.base, kind.collection(), id)
    }

    /// URL of an account's owned-tweets collection.
    pub fn account_tweets(&self, id: EntityId) -> String {
        format!("{}/accounts/{}/tweets", self.base, id)
    }
}

/// Wire view of a tweet: the owning account appears as its id only.
#[derive(Debug, Clone, Serialize)]
pub struct TweetView {
    pub id: EntityId,
    pub account: EntityId,
    pub tweet_url: String,
    pub account_url: String,
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

/// Wire view of an account: owned tweets embedded as full projections,
/// one level deep (tweets have no sub-collections).
#[derive(Debug, Clone, Serialize)]
pub struct AccountView {
    pub id: EntityId,
    pub tweets: Vec<TweetView>,
    pub account_url: String,
    pub tweets_url: String,
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

/// Projects stored documents into wire representations.
///
/// One kind-parameterized entry point; the account arm recurses into
/// the tweet projection for the single nested level. Stored documents
/// are never mutated.
pub struct Mapper<'a> {
    store: &'a dyn Store,
    links: &'a Links,
}

impl<'a> Mapper<'a> {
    pub fn new(store: &'a dyn Store, links: &'a Links) -> Self {
        Self { store, links }
    }

    /// Project a single document of the given kind.
    pub fn represent(&self, kind: ResourceKind, doc: &Value) -> ReprResult<Value> {
        let view = match kind {
            ResourceKind::Tweet => serde_json::to_value(self.tweet_view(doc)?)?,
            ResourceKind::Account => serde_json::to_value(self.account_view(doc)?)?,
        };
        Ok(view)
    }

    /// Project an ordered sequence, preserving order and length.
    pub fn represent_all(&self, kind: ResourceKind, docs: &[Value]) -> ReprResult<Vec<Value>> {
        docs.iter().map(|doc| self.represent(kind, doc)).collect()
    }

    fn tweet_view(&self, doc: &Value) -> ReprResult<TweetView> {
        let id = model::entity_id(doc).ok_or(ReprError::MissingId)?;
        let account =
            model::account_of(doc).ok_or(ReprError::MissingAccount { tweet: id })?;

        Ok(TweetView {
            id,
            account,
            tweet_url: self.links.resource(ResourceKind::Tweet, id),
            account_url: self.links.resource(ResourceKind::Account, account),
            fields: opaque_fields(doc, &[ID_FIELD, ACCOUNT_FIELD]),
        })
    }

    fn account_view(&self, doc: &Value) -> ReprResult<AccountView> {
        let id = model::entity_id(doc).ok_or(ReprError::MissingId)?;

        let mut tweets = Vec::new();
        for tweet_id in model::owned_tweets(doc) {
            let tweet_doc = match self.store.select(ResourceKind::Tweet, tweet_id) {
                Ok(doc) => doc,
                Err(StoreError::NotFound { .. }) => {
                    return Err(ReprError::DanglingTweet {
                        account: id,
                        tweet: tweet_id,
                    })
                }
                Err(e) => return Err(e.into()),
            };
            tweets.push(self.tweet_view(&tweet_doc)?);
        }

        Ok(AccountView {
            id,
            tweets,
            account_url: self.links.resource(ResourceKind::Account, id),
            tweets_url: self.links.account_tweets(id),
            fields: opaque_fields(doc, &[ID_FIELD, TWEETS_FIELD]),
        })
    }
}

/// Shallow copy of a document's opaque fields, skipping the identity
/// and relational fields the view carries explicitly.
fn opaque_fields(doc: &Value, skip: &[&str]) -> Map<String, Value> {
    doc.as_object()
        .map(|obj| {
            obj.iter()
                .filter(|(key, _)| !skip.contains(&key.as_str()))
                .map(|(key, value)| (key.clone(), value.clone()))
                .collect()
        })
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_links_trim_trailing_slash() {
        let links = Links::new("http://api.test/");
        assert_eq!(links.resource(ResourceKind::Tweet, 3), "http://api.test/tweets/3");
        assert_eq!(
            links.account_tweets(9),
            "http://api.test/accounts/9/tweets"
        );
    }

    #[test]
    fn test_opaque_fields_skip_identity_and_relational() {
        let doc = json!({"id": 1, "account": 2, "text": "hi"});
        let fields = opaque_fields(&doc, &[ID_FIELD, ACCOUNT_FIELD]);

        assert_eq!(fields.len(), 1);
        assert_eq!(fields["text"], "hi");
    }
}
