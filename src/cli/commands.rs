//! CLI command implementations
//!
//! `serve` boots the in-memory store and the HTTP server. Boot failure
//! is logged and returned; there is no retry.

use std::path::Path;

use crate::http::{ApiServer, HttpConfig};
use crate::observability::Logger;

use super::args::{Cli, Command};
use super::errors::{CliError, CliResult};

/// Parse arguments and dispatch
pub fn run() -> CliResult<()> {
    let cli = Cli::parse_args();
    run_command(cli.command)
}

/// Dispatch a parsed command
pub fn run_command(command: Command) -> CliResult<()> {
    match command {
        Command::Serve {
            config,
            host,
            port,
            base_url,
            expose_error_detail,
        } => serve(config.as_deref(), host, port, base_url, expose_error_detail),
    }
}

/// Boot the server:
/// 1. Load configuration (file, then flag overrides)
/// 2. Build the router over a fresh in-memory store
/// 3. Bind and serve
pub fn serve(
    config_path: Option<&Path>,
    host: Option<String>,
    port: Option<u16>,
    base_url: Option<String>,
    expose_error_detail: bool,
) -> CliResult<()> {
    let mut config = match config_path {
        Some(path) => {
            HttpConfig::load(path).map_err(|e| CliError::config_error(e.to_string()))?
        }
        None => HttpConfig::default(),
    };

    if let Some(host) = host {
        config.host = host;
    }
    if let Some(port) = port {
        config.port = port;
    }
    if let Some(base_url) = base_url {
        config.base_url = Some(base_url);
    }
    if expose_error_detail {
        config.expose_error_detail = true;
    }

    let addr = config.socket_addr();
    let base = config.base_url();
    Logger::info("BOOT", &[("addr", addr.as_str()), ("base_url", base.as_str())]);

    let server = ApiServer::with_config(config);

    let rt = tokio::runtime::Runtime::new()
        .map_err(|e| CliError::boot_failed(format!("failed to create tokio runtime: {}", e)))?;

    rt.block_on(async { server.start().await }).map_err(|e| {
        let detail = e.to_string();
        Logger::fatal("BOOT_FAILED", &[("error", detail.as_str())]);
        CliError::boot_failed(detail)
    })
}
