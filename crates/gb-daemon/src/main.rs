//! # gb-daemon
//!
//! goalboard HTTP server.
//!
//! ## Usage
//!
//! ```text
//! gb-daemon                      # reads ./goalboard.toml if present, port 3000
//! PORT=8080 gb-daemon            # port from the environment
//! gb-daemon --port 9000 --static-dir ./public
//! ```

use anyhow::{Context, Result};
use clap::Parser;

use gb_daemon::ServeArgs;

/// goalboard HTTP server.
#[derive(Parser)]
#[command(name = "gb-daemon", version, about = "goalboard HTTP server")]
struct Cli {
    #[command(flatten)]
    serve: ServeArgs,
}

#[tokio::main]
async fn main() -> Result<()> {
    gb_daemon::init_tracing(&gb_daemon::SERVER_LOG_DIRECTIVES)?;

    let config = Cli::parse()
        .serve
        .into_config()
        .context("failed to load config")?;

    tracing::info!("Starting goalboard daemon");
    gb_daemon::serve(config).await
}
