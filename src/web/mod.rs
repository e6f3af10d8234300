//! HTTP front-end: routes, shared state and the serve loop.

mod handlers;
mod page;

use crate::config::RuntimeConfig;
use crate::news::NewsClient;
use anyhow::{Context, Result};
use axum::Router;
use axum::routing::get;
use std::path::Path;
use tokio::net::TcpListener;
use tower_http::services::ServeDir;

pub use handlers::SearchParams;

/// Read-only state shared by every request.
#[derive(Debug, Clone)]
pub struct AppState {
    pub news: NewsClient,
}

impl AppState {
    pub fn new(cfg: &RuntimeConfig) -> Result<Self> {
        let news = NewsClient::new(cfg).context("failed to build upstream client")?;
        Ok(Self { news })
    }
}

pub fn router(state: AppState, assets_dir: &Path) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/search", get(handlers::search))
        .nest_service("/assets", ServeDir::new(assets_dir))
        .with_state(state)
}

pub async fn serve(cfg: RuntimeConfig) -> Result<()> {
    let state = AppState::new(&cfg)?;
    let app = router(state, &cfg.assets_dir);

    let addr = format!("{}:{}", cfg.host, cfg.port);
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;
    let local_addr = listener.local_addr()?;

    tracing::info!(assets = %cfg.assets_dir.display(), "news search listening on http://{local_addr}");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    tracing::info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::warn!("failed to listen for ctrl-c: {e}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::warn!("failed to listen for SIGTERM: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }
    tracing::info!("shutdown signal received");
}
