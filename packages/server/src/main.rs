use std::sync::Arc;

use anyhow::Context;
use common::storage::filesystem::FilesystemImageStore;
use tracing_subscriber::EnvFilter;

use blog_server::config::AppConfig;
use blog_server::database::init_db;
use blog_server::state::AppState;
use blog_server::{build_router, cors_layer};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = AppConfig::load().context("Failed to load configuration")?;

    let db = init_db(&config.database)
        .await
        .context("Failed to initialize database")?;

    let image_store = FilesystemImageStore::new(&config.storage.image_dir)
        .await
        .with_context(|| format!("Failed to prepare image directory {}", config.storage.image_dir))?;
    tracing::info!(dir = %config.storage.image_dir, "Image storage ready");

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let cors = cors_layer(&config.server.cors);

    let state = AppState {
        db,
        config,
        image_store: Arc::new(image_store),
    };

    let app = build_router(state).layer(cors);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    tracing::info!("Server running at http://{}", addr);

    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}
