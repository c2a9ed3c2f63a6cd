use std::path::PathBuf;
use std::process::{Command, Output};

use chrono::Duration;
use tempfile::TempDir;
use tokio::net::TcpListener;
use tokio::task::AbortHandle;
use tubely::application::routes::app_router;
use tubely::application::state::{AppState, AppStateConfig, ThumbnailStorage};
use tubely::domain::ids::UserId;
use tubely::infrastructure::auth::issue_access_token;
use tubely::infrastructure::database::Database;

const TEST_SECRET: &str = "cli-test-secret-that-is-long-enough";

/// A server on an ephemeral port writing thumbnails to a temporary assets root.
pub struct TestServer {
    pub address: String,
    assets_dir: TempDir,
    server_handle: AbortHandle,
}

impl TestServer {
    pub fn assets_root(&self) -> PathBuf {
        self.assets_dir.path().to_path_buf()
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.server_handle.abort();
    }
}

pub async fn spawn_server() -> TestServer {
    let assets_dir = tempfile::tempdir().expect("failed to create assets dir");
    let database = Database::connect("sqlite::memory:")
        .await
        .expect("Failed to connect to in-memory database");

    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind to random port");
    let address = format!(
        "http://{}",
        listener.local_addr().expect("Failed to get local address")
    );

    let state = AppState::from_database(
        &database,
        AppStateConfig {
            jwt_secret: TEST_SECRET.to_string(),
            public_url: address.clone(),
            thumbnail_storage: ThumbnailStorage::Disk {
                assets_root: assets_dir.path().to_path_buf(),
            },
        },
    );
    let app = app_router(state);

    let server_handle = tokio::spawn(async move {
        axum::serve(listener, app)
            .await
            .expect("Server failed to start");
    })
    .abort_handle();

    TestServer {
        address,
        assets_dir,
        server_handle,
    }
}

pub fn create_token(user_id: UserId) -> String {
    issue_access_token(user_id, TEST_SECRET, Duration::hours(1)).expect("failed to sign token")
}

/// Run the `tubely` binary against `server`, off the async runtime so the
/// server keeps serving while the command blocks.
pub async fn run_tubely(server: &TestServer, args: &[&str], token: Option<&str>) -> Output {
    let mut command = Command::new(env!("CARGO_BIN_EXE_tubely"));
    command
        .args(args)
        .env("TUBELY_URL", &server.address)
        .env("RUST_LOG", "off")
        .env_remove("TUBELY_TOKEN");
    if let Some(token) = token {
        command.env("TUBELY_TOKEN", token);
    }

    tokio::task::spawn_blocking(move || command.output())
        .await
        .expect("command task panicked")
        .expect("failed to run tubely")
}

pub fn parse_stdout(output: &Output) -> serde_json::Value {
    assert!(
        output.status.success(),
        "command failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    let stdout = String::from_utf8_lossy(&output.stdout);
    serde_json::from_str(&stdout)
        .unwrap_or_else(|_| panic!("Should output valid JSON, got: {stdout}"))
}

/// Create a video through the CLI and return its ID.
pub async fn create_video(server: &TestServer, token: &str) -> String {
    let output = run_tubely(
        server,
        &["video", "create", "--title", "CLI upload"],
        Some(token),
    )
    .await;
    parse_stdout(&output)["id"]
        .as_str()
        .expect("video id")
        .to_string()
}
