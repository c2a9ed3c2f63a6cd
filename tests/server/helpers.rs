use std::path::PathBuf;
use std::sync::Arc;

use chrono::Duration;
use reqwest::Client;
use reqwest::multipart::{Form, Part};
use tempfile::TempDir;
use tokio::net::TcpListener;
use tokio::task::AbortHandle;
use tubely::application::routes::app_router;
use tubely::application::state::{AppState, AppStateConfig, ThumbnailStorage};
use tubely::domain::ids::{UserId, VideoId};
use tubely::domain::repositories::VideoRepository;
use tubely::domain::videos::{NewVideo, Video};
use tubely::infrastructure::auth::issue_access_token;
use tubely::infrastructure::database::Database;

pub const TEST_SECRET: &str = "test-secret-that-is-long-enough-for-hmac";

/// A few bytes that start like a PNG; the server never decodes images.
pub const PNG_BYTES: &[u8] = b"\x89PNG\r\n\x1a\n\x00\x00\x00\rIHDR-test-image";

/// Patterned payload of `len` bytes, so truncation or reordering shows up.
pub fn large_thumbnail(len: usize) -> Vec<u8> {
    (0..len).map(|i| (i % 251) as u8).collect()
}

pub struct TestApp {
    pub address: String,
    pub video_repo: Arc<dyn VideoRepository>,
    assets_dir: Option<TempDir>,
    server_handle: AbortHandle,
}

impl TestApp {
    pub fn api_url(&self, path: &str) -> String {
        format!("{}/api{}", self.address, path)
    }

    pub fn assets_root(&self) -> PathBuf {
        self.assets_dir
            .as_ref()
            .expect("app was not started with disk storage")
            .path()
            .to_path_buf()
    }

    pub fn asset_count(&self) -> usize {
        std::fs::read_dir(self.assets_root())
            .expect("failed to read assets root")
            .count()
    }
}

impl Drop for TestApp {
    fn drop(&mut self) {
        self.server_handle.abort();
    }
}

/// Server storing thumbnails on disk under a temporary assets root.
pub async fn spawn_app() -> TestApp {
    let assets_dir = tempfile::tempdir().expect("failed to create assets dir");
    let storage = ThumbnailStorage::Disk {
        assets_root: assets_dir.path().to_path_buf(),
    };
    spawn_app_inner(storage, Some(assets_dir)).await
}

/// Server keeping thumbnails in memory.
pub async fn spawn_app_with_memory_storage() -> TestApp {
    spawn_app_inner(ThumbnailStorage::Memory, None).await
}

async fn spawn_app_inner(storage: ThumbnailStorage, assets_dir: Option<TempDir>) -> TestApp {
    let database = Database::connect("sqlite::memory:")
        .await
        .expect("Failed to connect to in-memory database");

    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind to random port");
    let local_addr = listener.local_addr().expect("Failed to get local address");
    let address = format!("http://{local_addr}");

    let state = AppState::from_database(
        &database,
        AppStateConfig {
            jwt_secret: TEST_SECRET.to_string(),
            public_url: address.clone(),
            thumbnail_storage: storage,
        },
    );
    let video_repo = state.video_repo.clone();
    let app = app_router(state);

    let server_handle = tokio::spawn(async move {
        axum::serve(listener, app)
            .await
            .expect("Server failed to start");
    })
    .abort_handle();

    TestApp {
        address,
        video_repo,
        assets_dir,
        server_handle,
    }
}

pub fn token_for(user_id: UserId) -> String {
    issue_access_token(user_id, TEST_SECRET, Duration::hours(1)).expect("failed to sign token")
}

/// Insert a video owned by `owner` directly through the repository.
pub async fn create_video(app: &TestApp, owner: UserId) -> Video {
    app.video_repo
        .insert(
            owner,
            NewVideo {
                title: "Boot.dev beats".to_string(),
                description: "lofi".to_string(),
            },
        )
        .await
        .expect("failed to insert video")
}

pub async fn fetch_video(app: &TestApp, id: VideoId) -> Video {
    app.video_repo.get(id).await.expect("failed to fetch video")
}

pub fn thumbnail_form(data: &[u8], content_type: &str, file_name: &str) -> Form {
    let part = Part::bytes(data.to_vec())
        .file_name(file_name.to_string())
        .mime_str(content_type)
        .expect("valid mime type");
    Form::new().part("thumbnail", part)
}

pub async fn upload_thumbnail(
    app: &TestApp,
    token: Option<&str>,
    video_id: impl std::fmt::Display,
    form: Form,
) -> reqwest::Response {
    let mut request = Client::new()
        .post(app.api_url(&format!("/videos/{video_id}/thumbnail")))
        .multipart(form);

    if let Some(token) = token {
        request = request.bearer_auth(token);
    }

    request.send().await.expect("failed to upload thumbnail")
}
