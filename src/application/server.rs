use std::net::SocketAddr;

use anyhow::Context;
use tokio::net::TcpListener;
use tokio::signal;
use tracing::info;

use crate::application::routes::app_router;
use crate::application::state::{AppState, AppStateConfig, ThumbnailStorage};
use crate::infrastructure::database::Database;

pub struct ServerConfig {
    pub bind_address: SocketAddr,
    pub database_url: String,
    pub public_url: String,
    pub jwt_secret: String,
    pub thumbnail_storage: ThumbnailStorage,
}

pub async fn serve(config: ServerConfig) -> anyhow::Result<()> {
    anyhow::ensure!(!config.jwt_secret.is_empty(), "JWT secret must not be empty");

    let database = Database::connect(&config.database_url)
        .await
        .context("failed to connect to database")?;

    if let ThumbnailStorage::Disk { assets_root } = &config.thumbnail_storage {
        tokio::fs::create_dir_all(assets_root)
            .await
            .with_context(|| format!("failed to create assets root {}", assets_root.display()))?;
        info!(assets_root = %assets_root.display(), "storing thumbnails on disk");
    } else {
        info!("storing thumbnails in memory");
    }

    let state = AppState::from_database(
        &database,
        AppStateConfig {
            jwt_secret: config.jwt_secret,
            public_url: config.public_url.clone(),
            thumbnail_storage: config.thumbnail_storage,
        },
    );

    let listener = TcpListener::bind(config.bind_address)
        .await
        .with_context(|| format!("failed to bind to {}", config.bind_address))?;

    let app = app_router(state);

    info!(
        address = %config.bind_address,
        public_url = %config.public_url,
        database = %config.database_url,
        "starting HTTP server"
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server terminated unexpectedly")?;

    info!("server shutdown complete");

    Ok(())
}

#[allow(clippy::expect_used)] // Startup: panicking is appropriate if signal handlers fail
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }
}
