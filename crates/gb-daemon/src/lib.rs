//! # gb-daemon
//!
//! HTTP API for goalboard.
//!
//! Serves the goal CRUD routes under both `/goals` and `/api/goals`, a
//! greeting at `/api/greet`, and the browser front-end from a static
//! directory. One [`GoalStore`](gb_goal::GoalStore) is built at startup and
//! handed to every handler through [`AppState`].
//!
//! ## Routes
//!
//! | Method | Path | Response |
//! |---|---|---|
//! | GET | `{base}` | 200, all goals |
//! | POST | `{base}` | 201, created goal |
//! | PUT | `{base}/{id}` | 200 updated goal, or 404 `{"error"}` |
//! | DELETE | `{base}/{id}` | 200 `{"message"}` |
//! | GET | `/api/greet` | 200 `{"message"}` |
//!
//! `{base}/` with a trailing slash routes the same as `{base}`.

pub mod api;
pub mod config;
pub mod error;

use std::future::Future;

use anyhow::Context;
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

pub use api::{router, AppState, MessageResponse, GOAL_BASES};
pub use config::{ServeArgs, ServerConfig};
pub use error::{ApiError, ConfigError};

/// Log directives a running server adds on top of `RUST_LOG`.
pub const SERVER_LOG_DIRECTIVES: [&str; 3] = ["gb_daemon=info", "gb_goal=info", "tower_http=info"];

/// Install the stderr `tracing` subscriber, filtered by `RUST_LOG` plus
/// `directives`.
pub fn init_tracing(directives: &[&str]) -> anyhow::Result<()> {
    let mut filter = EnvFilter::from_default_env();
    for directive in directives {
        filter = filter.add_directive(directive.parse()?);
    }
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(anyhow::Error::msg)
}

/// Bind to the configured address and serve until Ctrl-C.
pub async fn serve(config: ServerConfig) -> anyhow::Result<()> {
    let listener = TcpListener::bind((config.host.as_str(), config.port))
        .await
        .with_context(|| format!("failed to bind {}:{}", config.host, config.port))?;
    serve_on(listener, config, shutdown_signal()).await
}

/// Serve on an already-bound listener until `shutdown` resolves.
pub async fn serve_on(
    listener: TcpListener,
    config: ServerConfig,
    shutdown: impl Future<Output = ()> + Send + 'static,
) -> anyhow::Result<()> {
    config.check_seed()?;
    let state = AppState::from_config(&config).context("failed to open events log")?;
    let app = router(state, &config.static_dir);

    tracing::info!("Server running on http://{}", listener.local_addr()?);
    tracing::info!("Serving front-end from {}", config.static_dir.display());

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await
        .context("server error")?;

    tracing::info!("Server shut down");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
}
