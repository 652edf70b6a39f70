//! Standalone game server.
//!
//! `PORT` overrides the listen port; `RUST_LOG` controls log verbosity.

use std::sync::Arc;

use arena_ccg::net::{run, ServerConfig, SessionManager};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let port = std::env::var("PORT")
        .ok()
        .and_then(|raw| raw.parse().ok())
        .unwrap_or(8080);

    let manager = Arc::new(SessionManager::new());
    run(ServerConfig::new([0, 0, 0, 0], port), manager).await;
}
