//! # HTTP Module
//!
//! Axum server for the tweet/account collections:
//!
//! - interceptor chain: request logging, version gate, content
//!   negotiation
//! - route table per resource, plus `/health`
//! - JSON error funnel with a configurable detail switch

pub mod account_routes;
pub mod config;
pub mod errors;
pub mod middleware;
pub mod server;
pub mod tweet_routes;

pub use config::{ConfigError, HttpConfig};
pub use errors::{ApiError, ApiResult};
pub use middleware::SUPPORTED_VERSION;
pub use server::{ApiServer, AppState};
