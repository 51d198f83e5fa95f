//! Account Routes
//!
//! Collection endpoints for accounts, including the owned-tweets
//! sub-collection. Account removal cascades to owned tweets so the
//! stored graph never holds a tweet without a live owner.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use serde_json::{Map, Value};

use crate::model::{self, EntityId, ResourceKind, ID_FIELD, TWEETS_FIELD};
use crate::repr::Mapper;
use crate::store::StoreError;

use super::errors::{require_object, route_fallback, ApiError, ApiResult};
use super::server::AppState;

/// Build the account router
pub fn account_routes(state: Arc<AppState>) -> Router {
    Router::new()
        .route(
            "/accounts",
            get(list_accounts)
                .post(create_account)
                .fallback(route_fallback),
        )
        .route(
            "/accounts/:id",
            get(get_account)
                .put(replace_account)
                .delete(delete_account)
                .fallback(route_fallback),
        )
        .route(
            "/accounts/:id/tweets",
            get(list_account_tweets).fallback(route_fallback),
        )
        .with_state(state)
}

/// GET /accounts
async fn list_accounts(State(state): State<Arc<AppState>>) -> ApiResult<Json<Value>> {
    let docs = state.store.select_all(ResourceKind::Account)?;
    let mapper = Mapper::new(state.store.as_ref(), &state.links);

    Ok(Json(Value::Array(
        mapper.represent_all(ResourceKind::Account, &docs)?,
    )))
}

/// POST /accounts
async fn create_account(
    State(state): State<Arc<AppState>>,
    Json(body): Json<Value>,
) -> ApiResult<(StatusCode, Json<Value>)> {
    let fields = require_object(&body)?;

    let mut doc = Map::new();
    for (key, value) in fields {
        if key != ID_FIELD && key != TWEETS_FIELD {
            doc.insert(key.clone(), value.clone());
        }
    }
    // A new account owns nothing yet.
    doc.insert(TWEETS_FIELD.to_string(), Value::Array(Vec::new()));

    let id = state
        .store
        .insert(ResourceKind::Account, Value::Object(doc))?;

    let stored = state.store.select(ResourceKind::Account, id)?;
    let mapper = Mapper::new(state.store.as_ref(), &state.links);

    Ok((
        StatusCode::CREATED,
        Json(mapper.represent(ResourceKind::Account, &stored)?),
    ))
}

/// GET /accounts/:id
async fn get_account(
    State(state): State<Arc<AppState>>,
    Path(id): Path<EntityId>,
) -> ApiResult<Json<Value>> {
    let doc = state.store.select(ResourceKind::Account, id)?;
    let mapper = Mapper::new(state.store.as_ref(), &state.links);

    Ok(Json(mapper.represent(ResourceKind::Account, &doc)?))
}

/// GET /accounts/:id/tweets
async fn list_account_tweets(
    State(state): State<Arc<AppState>>,
    Path(id): Path<EntityId>,
) -> ApiResult<Json<Value>> {
    let doc = state.store.select(ResourceKind::Account, id)?;
    let mapper = Mapper::new(state.store.as_ref(), &state.links);

    // The account view already embeds owned tweets in order.
    let view = mapper.represent(ResourceKind::Account, &doc)?;
    let tweets = view
        .get(TWEETS_FIELD)
        .cloned()
        .unwrap_or_else(|| Value::Array(Vec::new()));

    Ok(Json(tweets))
}

/// PUT /accounts/:id
///
/// Full overwrite of the non-relational fields; `id` and the owned
/// `tweets` collection survive the replacement.
async fn replace_account(
    State(state): State<Arc<AppState>>,
    Path(id): Path<EntityId>,
    Json(body): Json<Value>,
) -> ApiResult<StatusCode> {
    let fields = require_object(&body)?;
    let current = state.store.select(ResourceKind::Account, id)?;
    let tweets = model::owned_tweets(&current);

    let mut doc = Map::new();
    for (key, value) in fields {
        if key != ID_FIELD && key != TWEETS_FIELD {
            doc.insert(key.clone(), value.clone());
        }
    }
    doc.insert(TWEETS_FIELD.to_string(), Value::from(tweets));

    state
        .store
        .replace(ResourceKind::Account, id, Value::Object(doc))?;

    Ok(StatusCode::OK)
}

/// DELETE /accounts/:id
async fn delete_account(
    State(state): State<Arc<AppState>>,
    Path(id): Path<EntityId>,
) -> ApiResult<StatusCode> {
    let doc = state.store.select(ResourceKind::Account, id)?;

    for tweet_id in model::owned_tweets(&doc) {
        match state.store.remove(ResourceKind::Tweet, tweet_id) {
            Ok(()) | Err(StoreError::NotFound { .. }) => {}
            Err(e) => return Err(ApiError::from(e)),
        }
    }

    state.store.remove(ResourceKind::Account, id)?;

    Ok(StatusCode::OK)
}
