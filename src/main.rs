//! Service bootstrap: tracing, configuration, state wiring, port binding

use anyhow::Result;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

use menu_service::config::Config;
use menu_service::server::{AppState, build_router};
use menu_service::storage::{MongoConnection, MongoMenuStore};
use menu_service::upload::CloudinaryUploader;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = Config::from_env();

    let connection = Arc::new(MongoConnection::new(
        config.mongo_uri.clone(),
        config.mongo_database.clone(),
    ));

    let state = AppState {
        store: Arc::new(MongoMenuStore::new(connection)),
        uploader: Arc::new(CloudinaryUploader::new(config.cloudinary.clone())?),
    };

    let app = build_router(state);

    let listener = TcpListener::bind(("0.0.0.0", config.port)).await?;
    tracing::info!(port = config.port, "menu service listening");

    axum::serve(listener, app).await?;

    Ok(())
}
