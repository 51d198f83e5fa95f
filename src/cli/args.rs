//! CLI argument definitions using clap
//!
//! Commands:
//! - chirpd serve [--config <path>] [--host H] [--port P]
//!   [--base-url U] [--expose-error-detail]

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// chirpd - a minimal tweets/accounts REST service
#[derive(Parser, Debug)]
#[command(name = "chirpd")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Start the HTTP server
    Serve {
        /// Path to a JSON configuration file
        #[arg(long)]
        config: Option<PathBuf>,

        /// Host to bind (overrides the config file)
        #[arg(long)]
        host: Option<String>,

        /// Port to bind (overrides the config file)
        #[arg(long)]
        port: Option<u16>,

        /// Absolute base URL embedded in link fields (overrides the
        /// config file)
        #[arg(long)]
        base_url: Option<String>,

        /// Include diagnostic detail in error bodies
        #[arg(long)]
        expose_error_detail: bool,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
