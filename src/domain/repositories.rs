use async_trait::async_trait;

use super::RepositoryError;
use crate::domain::ids::{UserId, VideoId};
use crate::domain::thumbnails::{StoredThumbnail, ThumbnailStoreError, ThumbnailUpload};
use crate::domain::videos::{NewVideo, Video};

#[async_trait]
pub trait VideoRepository: Send + Sync {
    async fn insert(&self, user_id: UserId, video: NewVideo) -> Result<Video, RepositoryError>;
    async fn get(&self, id: VideoId) -> Result<Video, RepositoryError>;
    /// List the videos owned by `user_id`, newest first.
    async fn list_for_user(&self, user_id: UserId) -> Result<Vec<Video>, RepositoryError>;
    /// Persist the mutable fields of `video` and return the stored record.
    async fn update(&self, video: &Video) -> Result<Video, RepositoryError>;
}

/// Where uploaded thumbnails end up.
///
/// `save` returns the public path (relative to the server's own URL) the
/// thumbnail can be fetched from afterwards.
#[async_trait]
pub trait ThumbnailStore: Send + Sync {
    async fn save(
        &self,
        video_id: VideoId,
        upload: ThumbnailUpload,
    ) -> Result<String, ThumbnailStoreError>;

    /// Thumbnails this store serves itself. Stores whose files are served
    /// statically always return `None`.
    async fn load(&self, video_id: VideoId) -> Result<Option<StoredThumbnail>, ThumbnailStoreError>;
}
