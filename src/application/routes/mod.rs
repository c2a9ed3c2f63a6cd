pub mod api;
pub mod support;

use axum::http::{HeaderValue, Request};
use tower::ServiceBuilder;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::services::ServeDir;
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::trace::{DefaultOnResponse, MakeSpan, TraceLayer};
use tracing::{Level, Span};

use crate::application::state::AppState;
use crate::infrastructure::thumbnails::ASSETS_PATH;

/// Hard ceiling on any request body. Thumbnail parts above the in-memory
/// threshold are spooled to disk, so this only guards against abuse.
const MAX_REQUEST_BODY_BYTES: usize = 1 << 30;

pub fn app_router(state: AppState) -> axum::Router {
    let mut router = axum::Router::new().nest("/api", api::router());

    if let Some(assets_root) = &state.assets_root {
        router = router.nest_service(ASSETS_PATH, ServeDir::new(assets_root));
    }

    router
        .layer(
            ServiceBuilder::new()
                .layer(
                    TraceLayer::new_for_http()
                        .make_span_with(TubelyMakeSpan)
                        .on_response(DefaultOnResponse::new().level(Level::INFO)),
                )
                .layer(RequestBodyLimitLayer::new(MAX_REQUEST_BODY_BYTES))
                .layer(SetResponseHeaderLayer::overriding(
                    axum::http::header::X_CONTENT_TYPE_OPTIONS,
                    HeaderValue::from_static("nosniff"),
                )),
        )
        .with_state(state)
}

#[derive(Clone)]
struct TubelyMakeSpan;

impl<B> MakeSpan<B> for TubelyMakeSpan {
    fn make_span(&mut self, request: &Request<B>) -> Span {
        tracing::info_span!(
            "request",
            method = %request.method(),
            uri = %request.uri(),
            version = ?request.version(),
            user.id = tracing::field::Empty,
        )
    }
}
