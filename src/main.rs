use anyhow::Result;
use clap::Parser;
use news_search::{config, web};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = config::Args::parse();
    let cfg = match config::load(args) {
        Ok(cfg) => cfg,
        Err(e) => {
            tracing::error!("{e:#}");
            return Err(e);
        }
    };
    tracing::debug!(?cfg, "configuration loaded");

    web::serve(cfg).await
}
