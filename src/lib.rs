//! chirpd - a minimal tweets/accounts REST service
//!
//! Two linked collections over an in-memory store, fronted by a
//! content-negotiating interceptor chain and projected onto the wire
//! as acyclic JSON views.

pub mod cli;
pub mod http;
pub mod model;
pub mod observability;
pub mod repr;
pub mod store;
