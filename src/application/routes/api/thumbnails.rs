use axum::Json;
use axum::extract::multipart::MultipartRejection;
use axum::extract::{Multipart, State};
use axum::http::header;
use axum::response::{IntoResponse, Response};
use tracing::{error, info, warn};

use crate::application::auth::AuthenticatedUser;
use crate::application::errors::{ApiError, AppError};
use crate::application::routes::support::{PathVideoId, absolute_url};
use crate::application::state::AppState;
use crate::domain::RepositoryError;
use crate::domain::thumbnails::{ThumbnailStoreError, ThumbnailUpload};
use crate::domain::videos::Video;
use crate::infrastructure::uploads::SpooledUpload;

/// Bytes of the thumbnail part held in memory before it spills to a temp file.
pub(crate) const THUMBNAIL_MEMORY_LIMIT_BYTES: usize = 10 << 20;

/// Form field carrying the image.
const THUMBNAIL_FIELD: &str = "thumbnail";

#[tracing::instrument(skip(state, auth_user, multipart))]
pub(crate) async fn upload_thumbnail(
    State(state): State<AppState>,
    PathVideoId(video_id): PathVideoId,
    auth_user: AuthenticatedUser,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<Video>, ApiError> {
    let multipart = multipart.map_err(|err| {
        warn!(error = %err, "request is not a multipart form");
        AppError::validation("unable to parse form")
    })?;
    let upload = read_thumbnail_field(multipart).await?;

    let mut video = state
        .video_repo
        .get(video_id)
        .await
        .map_err(|err| match err {
            RepositoryError::NotFound => AppError::not_found("video not found"),
            other => AppError::from(other),
        })?;

    if !video.is_owned_by(auth_user.user_id) {
        warn!(owner = %video.user_id, user_id = %auth_user.user_id, "thumbnail upload by non-owner");
        return Err(
            AppError::forbidden("you can only upload thumbnails for your own videos").into(),
        );
    }

    let size = upload.data.size();
    let path = state
        .thumbnail_store
        .save(video_id, upload)
        .await
        .map_err(|err| match err {
            ThumbnailStoreError::UnsupportedType => AppError::validation("unsupported file type"),
            ThumbnailStoreError::Io(err) => {
                error!(error = %err, "failed to store thumbnail");
                AppError::unexpected("unable to save file")
            }
        })?;

    // The stored asset is not rolled back if this update fails.
    video.thumbnail_url = Some(absolute_url(&state.public_url, &path));
    let video = state.video_repo.update(&video).await.map_err(|err| {
        error!(error = %err, "failed to update video thumbnail url");
        AppError::unexpected("unable to update video")
    })?;

    info!(bytes = size, thumbnail_url = ?video.thumbnail_url, "thumbnail uploaded");
    Ok(Json(video))
}

/// Pull the `thumbnail` part out of the form, ignoring any other fields.
async fn read_thumbnail_field(mut multipart: Multipart) -> Result<ThumbnailUpload, AppError> {
    while let Some(mut field) = multipart.next_field().await.map_err(|err| {
        warn!(error = %err, "failed to read multipart form");
        AppError::validation("unable to parse form")
    })? {
        if field.name() != Some(THUMBNAIL_FIELD) {
            continue;
        }

        let content_type = field.content_type().map(str::to_string);
        let file_name = field.file_name().map(str::to_string);

        let mut spool = SpooledUpload::new(THUMBNAIL_MEMORY_LIMIT_BYTES);
        while let Some(chunk) = field.chunk().await.map_err(|err| {
            warn!(error = %err, "failed to read thumbnail field");
            AppError::validation("unable to parse form")
        })? {
            spool.push(&chunk).await.map_err(spool_failed)?;
        }
        let data = spool.finish().await.map_err(spool_failed)?;

        return Ok(ThumbnailUpload {
            data,
            content_type,
            file_name,
        });
    }

    Err(AppError::validation("unable to get file from form"))
}

fn spool_failed(err: std::io::Error) -> AppError {
    error!(error = %err, "failed to spool thumbnail to a temporary file");
    AppError::unexpected("unable to parse form")
}

/// Serve a thumbnail kept in memory.
#[tracing::instrument(skip(state))]
pub(crate) async fn get_thumbnail(
    State(state): State<AppState>,
    PathVideoId(video_id): PathVideoId,
) -> Result<Response, ApiError> {
    let thumbnail = state
        .thumbnail_store
        .load(video_id)
        .await
        .map_err(|err| {
            error!(error = %err, "failed to load thumbnail");
            AppError::unexpected("unable to load thumbnail")
        })?
        .ok_or_else(|| AppError::not_found("thumbnail not found"))?;

    Ok((
        [(header::CONTENT_TYPE, thumbnail.media_type)],
        thumbnail.data,
    )
        .into_response())
}
