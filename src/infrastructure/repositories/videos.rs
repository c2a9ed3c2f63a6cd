use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{query, query_as};
use uuid::Uuid;

use crate::domain::RepositoryError;
use crate::domain::ids::{UserId, VideoId};
use crate::domain::repositories::VideoRepository;
use crate::domain::videos::{NewVideo, Video};
use crate::infrastructure::database::DatabasePool;

const SELECT_VIDEO: &str = r"SELECT id, user_id, title, description, thumbnail_url, created_at, updated_at
                              FROM videos";

#[derive(Clone)]
pub struct SqlVideoRepository {
    pool: DatabasePool,
}

impl SqlVideoRepository {
    pub fn new(pool: DatabasePool) -> Self {
        Self { pool }
    }

    fn into_domain(record: VideoRecord) -> Video {
        Video {
            id: VideoId::from(record.id),
            user_id: UserId::from(record.user_id),
            title: record.title,
            description: record.description,
            thumbnail_url: record.thumbnail_url,
            created_at: record.created_at,
            updated_at: record.updated_at,
        }
    }
}

#[async_trait]
impl VideoRepository for SqlVideoRepository {
    async fn insert(&self, user_id: UserId, video: NewVideo) -> Result<Video, RepositoryError> {
        let video = video.normalize();
        let now = Utc::now();

        let record = query_as::<_, VideoRecord>(
            r"INSERT INTO videos (id, user_id, title, description, thumbnail_url, created_at, updated_at)
               VALUES (?, ?, ?, ?, NULL, ?, ?)
               RETURNING id, user_id, title, description, thumbnail_url, created_at, updated_at",
        )
        .bind(Uuid::from(VideoId::generate()))
        .bind(Uuid::from(user_id))
        .bind(&video.title)
        .bind(&video.description)
        .bind(now)
        .bind(now)
        .fetch_one(&self.pool)
        .await
        .map_err(|err| {
            if let sqlx::Error::Database(db_err) = &err
                && db_err.is_unique_violation()
            {
                return RepositoryError::conflict("a video with this id already exists");
            }
            RepositoryError::unexpected(err.to_string())
        })?;

        Ok(Self::into_domain(record))
    }

    async fn get(&self, id: VideoId) -> Result<Video, RepositoryError> {
        let record = query_as::<_, VideoRecord>(&format!("{SELECT_VIDEO} WHERE id = ?"))
            .bind(Uuid::from(id))
            .fetch_optional(&self.pool)
            .await
            .map_err(|err| RepositoryError::unexpected(err.to_string()))?;

        match record {
            Some(record) => Ok(Self::into_domain(record)),
            None => Err(RepositoryError::NotFound),
        }
    }

    async fn list_for_user(&self, user_id: UserId) -> Result<Vec<Video>, RepositoryError> {
        let records = query_as::<_, VideoRecord>(&format!(
            "{SELECT_VIDEO} WHERE user_id = ? ORDER BY created_at DESC"
        ))
        .bind(Uuid::from(user_id))
        .fetch_all(&self.pool)
        .await
        .map_err(|err| RepositoryError::unexpected(err.to_string()))?;

        Ok(records.into_iter().map(Self::into_domain).collect())
    }

    async fn update(&self, video: &Video) -> Result<Video, RepositoryError> {
        let result = query(
            r"UPDATE videos
               SET title = ?, description = ?, thumbnail_url = ?, updated_at = ?
               WHERE id = ?",
        )
        .bind(&video.title)
        .bind(&video.description)
        .bind(video.thumbnail_url.as_deref())
        .bind(Utc::now())
        .bind(Uuid::from(video.id))
        .execute(&self.pool)
        .await
        .map_err(|err| RepositoryError::unexpected(err.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        self.get(video.id).await
    }
}

#[derive(Debug, sqlx::FromRow)]
struct VideoRecord {
    id: Uuid,
    user_id: Uuid,
    title: String,
    description: String,
    thumbnail_url: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}
