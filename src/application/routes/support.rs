use axum::extract::{FromRequestParts, Path};
use axum::http::request::Parts;
use tracing::warn;

use crate::application::errors::{ApiError, AppError};
use crate::domain::ids::VideoId;

/// A video id taken from the route's single path parameter.
///
/// Malformed ids are rejected with `400 Bad Request` before any other
/// extractor (authentication included) runs, as long as this one comes first.
#[derive(Debug, Clone, Copy)]
pub struct PathVideoId(pub VideoId);

impl<S> FromRequestParts<S> for PathVideoId
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|err| {
                warn!(error = %err, "missing video id path parameter");
                AppError::invalid_identifier("invalid ID")
            })?;

        raw.parse::<VideoId>().map(Self).map_err(|err| {
            warn!(error = %err, video_id = %raw, "malformed video id");
            AppError::invalid_identifier("invalid ID").into()
        })
    }
}

/// Join the advertised base URL with a server-relative path.
pub fn absolute_url(public_url: &str, path: &str) -> String {
    format!(
        "{}/{}",
        public_url.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}
