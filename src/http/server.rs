//! # HTTP Server
//!
//! Assembles the route table, the interceptor chain, and the error
//! funnel into one axum router, and binds it to the configured port.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::routing::get;
use axum::{middleware, Json, Router};
use serde_json::{json, Value};
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};

use crate::observability::Logger;
use crate::repr::Links;
use crate::store::{MemoryStore, Store};

use super::account_routes::account_routes;
use super::config::HttpConfig;
use super::errors::{route_fallback, set_expose_detail};
use super::middleware::{content_gate, request_log, version_gate};
use super::tweet_routes::tweet_routes;

/// State shared by every route handler: the injected store and the
/// link derivation for the representation mapper.
pub struct AppState {
    pub store: Arc<dyn Store>,
    pub links: Links,
}

/// HTTP server for the tweet/account collections
pub struct ApiServer {
    config: HttpConfig,
    router: Router,
}

impl ApiServer {
    /// Create a server with default configuration and a fresh store
    pub fn new() -> Self {
        Self::with_config(HttpConfig::default())
    }

    /// Create a server with custom configuration and a fresh store
    pub fn with_config(config: HttpConfig) -> Self {
        Self::with_store(config, Arc::new(MemoryStore::new()))
    }

    /// Create a server on an injected store (tests pass fakes here)
    pub fn with_store(config: HttpConfig, store: Arc<dyn Store>) -> Self {
        set_expose_detail(config.expose_error_detail);
        let router = Self::build_router(&config, store);
        Self { config, router }
    }

    /// Build the combined router with all endpoints and interceptors
    fn build_router(config: &HttpConfig, store: Arc<dyn Store>) -> Router {
        let state = Arc::new(AppState {
            store,
            links: Links::new(config.base_url()),
        });

        let cors = if config.cors_origins.is_empty() {
            // No origins configured: permissive, for development
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any)
        } else {
            let origins: Vec<_> = config
                .cors_origins
                .iter()
                .filter_map(|s| s.parse().ok())
                .collect();

            CorsLayer::new()
                .allow_origin(AllowOrigin::list(origins))
                .allow_methods(Any)
                .allow_headers(Any)
        };

        // ServiceBuilder applies top-down: logging first, then the
        // version gate, then content negotiation, then the routes.
        Router::new()
            .route("/health", get(health))
            .merge(tweet_routes(state.clone()))
            .merge(account_routes(state))
            .fallback(route_fallback)
            .layer(
                ServiceBuilder::new()
                    .layer(cors)
                    .layer(middleware::from_fn(request_log))
                    .layer(middleware::from_fn(version_gate))
                    .layer(middleware::from_fn(content_gate)),
            )
    }

    /// Get the socket address
    pub fn socket_addr(&self) -> String {
        self.config.socket_addr()
    }

    /// Get the router (for testing)
    pub fn router(self) -> Router {
        self.router
    }

    /// Bind the configured port and serve until shutdown
    pub async fn start(self) -> Result<(), std::io::Error> {
        let addr: SocketAddr = self
            .config
            .socket_addr()
            .parse()
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidInput, e))?;

        let listener = TcpListener::bind(addr).await?;
        Logger::info("LISTENING", &[("addr", addr.to_string().as_str())]);

        axum::serve(listener, self.router).await?;

        Ok(())
    }
}

impl Default for ApiServer {
    fn default() -> Self {
        Self::new()
    }
}

/// GET /health
async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}
