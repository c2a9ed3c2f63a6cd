pub(crate) mod thumbnails;
pub(crate) mod videos;

use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};

use crate::application::state::AppState;

pub(super) fn router() -> axum::Router<AppState> {
    video_routes().merge(thumbnail_routes())
}

fn video_routes() -> axum::Router<AppState> {
    axum::Router::new()
        .route(
            "/videos",
            get(videos::list_videos).post(videos::create_video),
        )
        .route("/videos/{video_id}", get(videos::get_video))
}

fn thumbnail_routes() -> axum::Router<AppState> {
    axum::Router::new()
        .route(
            "/videos/{video_id}/thumbnail",
            post(thumbnails::upload_thumbnail)
                .layer(DefaultBodyLimit::disable()),
        )
        .route("/thumbnails/{video_id}", get(thumbnails::get_thumbnail))
}
