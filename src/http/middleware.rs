//! Request Interceptors
//!
//! The ordered, short-circuiting chain in front of every route handler:
//!
//! 1. `request_log` — records method + path; always calls next.
//! 2. `version_gate` — optional `Accept-Version` header must match the
//!    supported version; mismatch terminates with 406.
//! 3. `content_gate` — mutating verbs must declare a JSON body (415),
//!    and a present `Accept` header must admit JSON responses (406).
//!
//! `ApiServer::build_router` applies them so this order holds.

use std::time::Instant;

use axum::extract::Request;
use axum::http::{header, Method, StatusCode};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use uuid::Uuid;

use crate::observability::Logger;

/// The single supported `Accept-Version` value.
pub const SUPPORTED_VERSION: &str = "1.0";

/// Log method + path before dispatch and the status after.
pub async fn request_log(req: Request, next: Next) -> Response {
    let method = req.method().to_string();
    let path = req.uri().path().to_string();
    let request_id = Uuid::new_v4().to_string();

    Logger::info(
        "HTTP_REQUEST",
        &[
            ("method", method.as_str()),
            ("path", path.as_str()),
            ("request_id", request_id.as_str()),
        ],
    );

    let started = Instant::now();
    let response = next.run(req).await;

    let status = response.status().as_u16().to_string();
    let elapsed_ms = started.elapsed().as_millis().to_string();
    Logger::info(
        "HTTP_RESPONSE",
        &[
            ("elapsed_ms", elapsed_ms.as_str()),
            ("request_id", request_id.as_str()),
            ("status", status.as_str()),
        ],
    );

    response
}

/// Terminate with 406 when a declared version is not the supported one.
/// Absence of the header is an implicit match.
pub async fn version_gate(req: Request, next: Next) -> Response {
    if let Some(declared) = header_str(&req, "accept-version") {
        let declared = declared.trim();
        if declared != SUPPORTED_VERSION {
            return (
                StatusCode::NOT_ACCEPTABLE,
                format!(
                    "unsupported version {}, supported version is {}",
                    declared, SUPPORTED_VERSION
                ),
            )
                .into_response();
        }
    }
    next.run(req).await
}

/// Terminate with 415 when a mutating request does not declare a JSON
/// body, or 406 when the client's `Accept` ranges exclude JSON.
pub async fn content_gate(req: Request, next: Next) -> Response {
    if is_mutating(req.method()) {
        let declares_json = header_str(&req, header::CONTENT_TYPE.as_str())
            .map(is_json_media_type)
            .unwrap_or(false);
        if !declares_json {
            return (
                StatusCode::UNSUPPORTED_MEDIA_TYPE,
                "request body must be application/json",
            )
                .into_response();
        }
    }

    if let Some(accept) = header_str(&req, header::ACCEPT.as_str()) {
        if !accepts_json(accept) {
            return (
                StatusCode::NOT_ACCEPTABLE,
                "responses are application/json",
            )
                .into_response();
        }
    }

    next.run(req).await
}

fn is_mutating(method: &Method) -> bool {
    matches!(*method, Method::POST | Method::PUT)
}

fn header_str<'a>(req: &'a Request, name: &str) -> Option<&'a str> {
    req.headers().get(name).and_then(|v| v.to_str().ok())
}

/// Media type of a header value, parameters stripped.
fn media_type(value: &str) -> &str {
    value.split(';').next().unwrap_or("").trim()
}

fn is_json_media_type(value: &str) -> bool {
    media_type(value).eq_ignore_ascii_case("application/json")
}

/// Whether any media range in an `Accept` value admits JSON.
fn accepts_json(accept: &str) -> bool {
    accept.split(',').map(media_type).any(|range| {
        range == "*/*"
            || range.eq_ignore_ascii_case("application/*")
            || range.eq_ignore_ascii_case("application/json")
    })
}
