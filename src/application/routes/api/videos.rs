use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use tracing::info;

use crate::application::auth::AuthenticatedUser;
use crate::application::errors::{ApiError, AppError};
use crate::application::routes::support::PathVideoId;
use crate::application::state::AppState;
use crate::domain::RepositoryError;
use crate::domain::videos::{NewVideo, Video};

#[tracing::instrument(skip(state, auth_user, payload))]
pub(crate) async fn create_video(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
    Json(payload): Json<NewVideo>,
) -> Result<(StatusCode, Json<Video>), ApiError> {
    let payload = payload.normalize();
    if payload.title.is_empty() {
        return Err(AppError::validation("title is required").into());
    }

    let video = state.video_repo.insert(auth_user.user_id, payload).await?;
    info!(video_id = %video.id, user_id = %video.user_id, "video created");

    Ok((StatusCode::CREATED, Json(video)))
}

#[tracing::instrument(skip(state, auth_user))]
pub(crate) async fn get_video(
    State(state): State<AppState>,
    PathVideoId(video_id): PathVideoId,
    auth_user: AuthenticatedUser,
) -> Result<Json<Video>, ApiError> {
    let video = state
        .video_repo
        .get(video_id)
        .await
        .map_err(|err| match err {
            RepositoryError::NotFound => AppError::not_found("video not found"),
            other => AppError::from(other),
        })?;

    if !video.is_owned_by(auth_user.user_id) {
        return Err(AppError::forbidden("you can only view your own videos").into());
    }

    Ok(Json(video))
}

#[tracing::instrument(skip(state, auth_user))]
pub(crate) async fn list_videos(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
) -> Result<Json<Vec<Video>>, ApiError> {
    let videos = state.video_repo.list_for_user(auth_user.user_id).await?;
    Ok(Json(videos))
}
