//! # API Error Funnel
//!
//! Every handler failure — including the synthesized 404 for unmatched
//! routes — ends here and is shaped into one JSON body:
//! `{"error": {"message": ..., "error": ...}}`. The inner `error` field
//! carries diagnostic detail in verbose mode and `{}` otherwise; the
//! mode is process-wide configuration, never request-dependent.

use std::sync::atomic::{AtomicBool, Ordering};

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use serde_json::{json, Map, Value};
use thiserror::Error;

use crate::model::{EntityId, ResourceKind};
use crate::repr::ReprError;
use crate::store::StoreError;

/// Result type for route handlers
pub type ApiResult<T> = Result<T, ApiError>;

static EXPOSE_DETAIL: AtomicBool = AtomicBool::new(false);

/// Switch the funnel between verbose and quiet error bodies.
pub fn set_expose_detail(on: bool) {
    EXPOSE_DETAIL.store(on, Ordering::Relaxed);
}

fn expose_detail() -> bool {
    EXPOSE_DETAIL.load(Ordering::Relaxed)
}

/// API errors
#[derive(Debug, Error)]
pub enum ApiError {
    // ==================
    // Client Errors (4xx)
    // ==================
    /// Invalid request body
    #[error("invalid request body: {0}")]
    InvalidBody(String),

    /// No route matched the request
    #[error("Not Found")]
    RouteNotFound,

    /// Entity lookup failed
    #[error("{kind} {id} not found")]
    EntityNotFound { kind: ResourceKind, id: EntityId },

    // ==================
    // Server Errors (5xx)
    // ==================
    /// Projection failure (broken graph, serialization)
    #[error(transparent)]
    Repr(#[from] ReprError),

    /// Internal failure
    #[error("internal error: {0}")]
    Internal(String),
}

impl ApiError {
    /// Create an invalid-body error
    pub fn invalid_body(msg: impl Into<String>) -> Self {
        Self::InvalidBody(msg.into())
    }

    /// Create an internal error
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    /// Get HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::InvalidBody(_) => StatusCode::BAD_REQUEST,
            ApiError::RouteNotFound => StatusCode::NOT_FOUND,
            ApiError::EntityNotFound { .. } => StatusCode::NOT_FOUND,
            ApiError::Repr(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<StoreError> for ApiError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::NotFound { kind, id } => Self::EntityNotFound { kind, id },
            StoreError::Internal(msg) => Self::Internal(msg),
        }
    }
}

/// Error response body: `{"error": {"message", "error"}}`
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: ErrorDetail,
}

#[derive(Debug, Serialize)]
pub struct ErrorDetail {
    pub message: String,
    pub error: Value,
}

impl From<&ApiError> for ErrorBody {
    fn from(err: &ApiError) -> Self {
        let detail = if expose_detail() {
            json!({ "cause": format!("{:?}", err) })
        } else {
            Value::Object(Map::new())
        };

        Self {
            error: ErrorDetail {
                message: err.to_string(),
                error: detail,
            },
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = Json(ErrorBody::from(&self));
        (status, body).into_response()
    }
}

/// Fallback handler: unmatched route/method pairs synthesize a 404
/// through the same responder as every other failure.
pub async fn route_fallback() -> ApiError {
    ApiError::RouteNotFound
}

/// Borrow a request body as an object map, or fail with 400.
pub fn require_object(body: &Value) -> ApiResult<&Map<String, Value>> {
    body.as_object()
        .ok_or_else(|| ApiError::invalid_body("body must be a JSON object"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(
            ApiError::invalid_body("x").status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(ApiError::RouteNotFound.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(
            ApiError::EntityNotFound {
                kind: ResourceKind::Tweet,
                id: 101
            }
            .status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ApiError::internal("x").status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_store_not_found_maps_to_404() {
        let err = ApiError::from(StoreError::NotFound {
            kind: ResourceKind::Account,
            id: 9,
        });
        assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(err.to_string(), "account 9 not found");
    }

    #[test]
    fn test_body_detail_follows_mode() {
        let err = ApiError::RouteNotFound;

        set_expose_detail(false);
        let quiet = serde_json::to_value(ErrorBody::from(&err)).unwrap();
        assert_eq!(quiet["error"]["message"], "Not Found");
        assert_eq!(quiet["error"]["error"], json!({}));

        set_expose_detail(true);
        let verbose = serde_json::to_value(ErrorBody::from(&err)).unwrap();
        assert!(verbose["error"]["error"]["cause"]
            .as_str()
            .unwrap()
            .contains("RouteNotFound"));
        set_expose_detail(false);
    }

    #[test]
    fn test_require_object_rejects_scalars() {
        assert!(require_object(&json!({"a": 1})).is_ok());
        assert!(require_object(&json!([1, 2])).is_err());
        assert!(require_object(&json!("x")).is_err());
    }
}
