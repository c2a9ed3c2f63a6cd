use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::RwLock;

use async_trait::async_trait;
use tokio::io::AsyncWriteExt;
use tracing::debug;

use crate::domain::ids::VideoId;
use crate::domain::repositories::ThumbnailStore;
use crate::domain::thumbnails::{
    DEFAULT_MEDIA_TYPE, StoredThumbnail, ThumbnailData, ThumbnailStoreError, ThumbnailUpload,
};

/// URL prefix the assets root is served under.
pub const ASSETS_PATH: &str = "/assets";

/// URL prefix for thumbnails served from memory.
pub const THUMBNAILS_PATH: &str = "/api/thumbnails";

/// Writes thumbnails to `<assets_root>/<video id><extension>`.
#[derive(Debug, Clone)]
pub struct DiskThumbnailStore {
    assets_root: PathBuf,
}

impl DiskThumbnailStore {
    pub fn new(assets_root: impl Into<PathBuf>) -> Self {
        Self {
            assets_root: assets_root.into(),
        }
    }
}

#[async_trait]
impl ThumbnailStore for DiskThumbnailStore {
    async fn save(
        &self,
        video_id: VideoId,
        upload: ThumbnailUpload,
    ) -> Result<String, ThumbnailStoreError> {
        let extension = upload
            .file_extension()
            .ok_or(ThumbnailStoreError::UnsupportedType)?;
        let file_name = format!("{video_id}{extension}");
        let path = self.assets_root.join(&file_name);

        let size = upload.data.size();
        match upload.data {
            ThumbnailData::Memory(bytes) => {
                let mut file = tokio::fs::File::create(&path).await?;
                file.write_all(&bytes).await?;
                file.flush().await?;
            }
            ThumbnailData::Spooled { path: spooled, .. } => {
                tokio::fs::copy(&spooled, &path).await?;
            }
        }

        debug!(path = %path.display(), bytes = size, "thumbnail written");
        Ok(format!("{ASSETS_PATH}/{file_name}"))
    }

    async fn load(
        &self,
        _video_id: VideoId,
    ) -> Result<Option<StoredThumbnail>, ThumbnailStoreError> {
        Ok(None)
    }
}

/// Keeps thumbnails in process memory, one entry per video.
///
/// Entries are replaced on re-upload and live as long as the store.
#[derive(Debug, Default)]
pub struct MemoryThumbnailStore {
    thumbnails: RwLock<HashMap<VideoId, StoredThumbnail>>,
}

impl MemoryThumbnailStore {
    pub fn new() -> Self {
        Self::default()
    }

    #[cfg(test)]
    fn len(&self) -> usize {
        self.thumbnails
            .read()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .len()
    }
}

#[async_trait]
impl ThumbnailStore for MemoryThumbnailStore {
    async fn save(
        &self,
        video_id: VideoId,
        upload: ThumbnailUpload,
    ) -> Result<String, ThumbnailStoreError> {
        let media_type = upload.media_type().unwrap_or(DEFAULT_MEDIA_TYPE).to_string();
        let thumbnail = StoredThumbnail {
            data: upload.data.into_bytes().await?,
            media_type,
        };

        self.thumbnails
            .write()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .insert(video_id, thumbnail);

        Ok(format!("{THUMBNAILS_PATH}/{video_id}"))
    }

    async fn load(
        &self,
        video_id: VideoId,
    ) -> Result<Option<StoredThumbnail>, ThumbnailStoreError> {
        let thumbnails = self
            .thumbnails
            .read()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        Ok(thumbnails.get(&video_id).cloned())
    }
}
