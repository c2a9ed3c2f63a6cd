use std::path::PathBuf;
use std::sync::Arc;

use crate::domain::repositories::{ThumbnailStore, VideoRepository};
use crate::infrastructure::database::Database;
use crate::infrastructure::repositories::videos::SqlVideoRepository;
use crate::infrastructure::thumbnails::{DiskThumbnailStore, MemoryThumbnailStore};

/// Where uploaded thumbnails are kept.
#[derive(Debug, Clone)]
pub enum ThumbnailStorage {
    /// Files under `assets_root`, served statically at `/assets`.
    Disk { assets_root: PathBuf },
    /// Process memory, served at `/api/thumbnails/{id}`.
    Memory,
}

/// Everything that varies between production and test environments.
pub struct AppStateConfig {
    pub jwt_secret: String,
    pub public_url: String,
    pub thumbnail_storage: ThumbnailStorage,
}

#[derive(Clone)]
pub struct AppState {
    pub video_repo: Arc<dyn VideoRepository>,
    pub thumbnail_store: Arc<dyn ThumbnailStore>,
    pub jwt_secret: String,
    /// Base URL (no trailing slash) this server advertises in thumbnail URLs.
    pub public_url: String,
    /// Set when thumbnails are written to disk and must be served from there.
    pub assets_root: Option<PathBuf>,
}

impl AppState {
    /// Build the application state from a database connection and config.
    pub fn from_database(database: &Database, config: AppStateConfig) -> Self {
        let video_repo: Arc<dyn VideoRepository> =
            Arc::new(SqlVideoRepository::new(database.clone_pool()));

        let (thumbnail_store, assets_root) = match config.thumbnail_storage {
            ThumbnailStorage::Disk { assets_root } => {
                let store: Arc<dyn ThumbnailStore> =
                    Arc::new(DiskThumbnailStore::new(assets_root.clone()));
                (store, Some(assets_root))
            }
            ThumbnailStorage::Memory => {
                let store: Arc<dyn ThumbnailStore> = Arc::new(MemoryThumbnailStore::new());
                (store, None)
            }
        };

        Self {
            video_repo,
            thumbnail_store,
            jwt_secret: config.jwt_secret,
            public_url: config.public_url.trim_end_matches('/').to_string(),
            assets_root,
        }
    }
}
