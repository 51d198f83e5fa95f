//! Observability subsystem
//!
//! Structured JSON logging for the request pipeline and process
//! lifecycle:
//! - one line per event
//! - deterministic field ordering
//! - no side effects on request execution

mod logger;

pub use logger::{Level, Logger};
