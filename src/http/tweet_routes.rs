//! Tweet Routes
//!
//! Collection endpoints for tweets. Creation resolves the supplied
//! account id to a live account before insert and attaches the new
//! tweet to that account's owned collection; removal detaches it.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use serde_json::{Map, Value};

use crate::model::{self, EntityId, ResourceKind, ACCOUNT_FIELD, ID_FIELD, TWEETS_FIELD};
use crate::repr::Mapper;
use crate::store::{Store, StoreError};

use super::errors::{require_object, route_fallback, ApiError, ApiResult};
use super::server::AppState;

/// Build the tweet router
pub fn tweet_routes(state: Arc<AppState>) -> Router {
    Router::new()
        .route(
            "/tweets",
            get(list_tweets).post(create_tweet).fallback(route_fallback),
        )
        .route(
            "/tweets/:id",
            get(get_tweet)
                .put(replace_tweet)
                .delete(delete_tweet)
                .fallback(route_fallback),
        )
        .with_state(state)
}

/// GET /tweets
async fn list_tweets(State(state): State<Arc<AppState>>) -> ApiResult<Json<Value>> {
    let docs = state.store.select_all(ResourceKind::Tweet)?;
    let mapper = Mapper::new(state.store.as_ref(), &state.links);

    Ok(Json(Value::Array(
        mapper.represent_all(ResourceKind::Tweet, &docs)?,
    )))
}

/// POST /tweets
async fn create_tweet(
    State(state): State<Arc<AppState>>,
    Json(body): Json<Value>,
) -> ApiResult<(StatusCode, Json<Value>)> {
    let fields = require_object(&body)?;
    let account_id = fields
        .get(ACCOUNT_FIELD)
        .and_then(Value::as_u64)
        .ok_or_else(|| ApiError::invalid_body("tweet must name its account by id"))?;

    // Resolve to the live account before insert.
    let account = state.store.select(ResourceKind::Account, account_id)?;

    let mut doc = Map::new();
    for (key, value) in fields {
        if key != ID_FIELD && key != ACCOUNT_FIELD {
            doc.insert(key.clone(), value.clone());
        }
    }
    doc.insert(ACCOUNT_FIELD.to_string(), Value::from(account_id));

    let id = state.store.insert(ResourceKind::Tweet, Value::Object(doc))?;
    attach_tweet(state.store.as_ref(), &account, id)?;

    let stored = state.store.select(ResourceKind::Tweet, id)?;
    let mapper = Mapper::new(state.store.as_ref(), &state.links);

    Ok((
        StatusCode::CREATED,
        Json(mapper.represent(ResourceKind::Tweet, &stored)?),
    ))
}

/// GET /tweets/:id
async fn get_tweet(
    State(state): State<Arc<AppState>>,
    Path(id): Path<EntityId>,
) -> ApiResult<Json<Value>> {
    let doc = state.store.select(ResourceKind::Tweet, id)?;
    let mapper = Mapper::new(state.store.as_ref(), &state.links);

    Ok(Json(mapper.represent(ResourceKind::Tweet, &doc)?))
}

/// PUT /tweets/:id
///
/// Full overwrite of the non-relational fields; `id` and `account`
/// survive the replacement.
async fn replace_tweet(
    State(state): State<Arc<AppState>>,
    Path(id): Path<EntityId>,
    Json(body): Json<Value>,
) -> ApiResult<StatusCode> {
    let fields = require_object(&body)?;
    let current = state.store.select(ResourceKind::Tweet, id)?;
    let account_id = model::account_of(&current)
        .ok_or_else(|| ApiError::internal(format!("stored tweet {} has no account", id)))?;

    let mut doc = Map::new();
    for (key, value) in fields {
        if key != ID_FIELD && key != ACCOUNT_FIELD {
            doc.insert(key.clone(), value.clone());
        }
    }
    doc.insert(ACCOUNT_FIELD.to_string(), Value::from(account_id));

    state
        .store
        .replace(ResourceKind::Tweet, id, Value::Object(doc))?;

    Ok(StatusCode::OK)
}

/// DELETE /tweets/:id
async fn delete_tweet(
    State(state): State<Arc<AppState>>,
    Path(id): Path<EntityId>,
) -> ApiResult<StatusCode> {
    let doc = state.store.select(ResourceKind::Tweet, id)?;
    state.store.remove(ResourceKind::Tweet, id)?;

    if let Some(account_id) = model::account_of(&doc) {
        detach_tweet(state.store.as_ref(), account_id, id)?;
    }

    Ok(StatusCode::OK)
}

/// Append a tweet id to its account's owned collection.
fn attach_tweet(store: &dyn Store, account: &Value, tweet_id: EntityId) -> ApiResult<()> {
    let account_id = model::entity_id(account)
        .ok_or_else(|| ApiError::internal("stored account has no id"))?;

    let mut tweets = model::owned_tweets(account);
    tweets.push(tweet_id);

    let mut doc = account.clone();
    let obj = doc
        .as_object_mut()
        .ok_or_else(|| ApiError::internal("stored account is not an object"))?;
    obj.insert(TWEETS_FIELD.to_string(), Value::from(tweets));

    store.replace(ResourceKind::Account, account_id, doc)?;
    Ok(())
}

/// Drop a tweet id from its account's owned collection. A missing
/// account means the linkage is already gone; nothing to detach.
fn detach_tweet(store: &dyn Store, account_id: EntityId, tweet_id: EntityId) -> ApiResult<()> {
    let account = match store.select(ResourceKind::Account, account_id) {
        Ok(doc) => doc,
        Err(StoreError::NotFound { .. }) => return Ok(()),
        Err(e) => return Err(e.into()),
    };

    let tweets: Vec<EntityId> = model::owned_tweets(&account)
        .into_iter()
        .filter(|owned| *owned != tweet_id)
        .collect();

    let mut doc = account;
    let obj = doc
        .as_object_mut()
        .ok_or_else(|| ApiError::internal("stored account is not an object"))?;
    obj.insert(TWEETS_FIELD.to_string(), Value::from(tweets));

    store.replace(ResourceKind::Account, account_id, doc)?;
    Ok(())
}
