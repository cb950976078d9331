//! Shared fixtures for the planner-api integration tests.
#![allow(dead_code)]

use planner_api::adapters::{AdminCredential, FileScheduleStore, InMemorySessionStore};
use planner_api::config::Config;
use planner_api::web::{build_router, state::AppState};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::task::JoinHandle;
use uuid::Uuid;

pub const ADMIN_USERNAME: &str = "admin";
pub const ADMIN_PASSWORD: &str = "plan123";

/// A fresh, empty directory under the system temp dir.
pub fn temp_dir(prefix: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("{}-{}", prefix, Uuid::new_v4().simple()));
    std::fs::create_dir_all(&dir).expect("create temp dir");
    dir
}

pub fn test_config(public_dir: &Path, schedule_file: &Path) -> Config {
    let public_dir = public_dir.to_string_lossy().into_owned();
    let schedule_file = schedule_file.to_string_lossy().into_owned();
    Config::from_vars(|name| match name {
        "PUBLIC_DIR" => Some(public_dir.clone()),
        "SCHEDULE_FILE" => Some(schedule_file.clone()),
        "BIND_ADDRESS" => Some("127.0.0.1:0".to_string()),
        _ => None,
    })
    .expect("test config")
}

pub struct TestApp {
    pub state: Arc<AppState>,
    pub public_dir: PathBuf,
    pub schedule_file: PathBuf,
}

impl TestApp {
    /// An app whose schedule lives at `<public_dir>/schedule.json`.
    pub fn new() -> Self {
        let public_dir = temp_dir("planner-api");
        let schedule_file = public_dir.join("schedule.json");
        Self::with_paths(public_dir, schedule_file)
    }

    pub fn with_paths(public_dir: PathBuf, schedule_file: PathBuf) -> Self {
        let config = Arc::new(test_config(&public_dir, &schedule_file));
        let admin = AdminCredential::new(ADMIN_USERNAME, ADMIN_PASSWORD).expect("hash admin");
        let state = Arc::new(AppState {
            sessions: Arc::new(InMemorySessionStore::new(admin)),
            schedule: Arc::new(FileScheduleStore::new(schedule_file.clone())),
            config,
        });
        Self {
            state,
            public_dir,
            schedule_file,
        }
    }

    pub fn router(&self) -> axum::Router {
        build_router(self.state.clone())
    }

    /// Serves the app on an ephemeral local port. Returns the base URL.
    pub async fn spawn(&self) -> (String, JoinHandle<()>) {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind");
        let addr = listener.local_addr().expect("local addr");
        let app = self.router();
        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.expect("serve");
        });
        (format!("http://{}", addr), handle)
    }
}

/// A base URL on which nothing is listening.
pub async fn dead_url() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind");
    let addr = listener.local_addr().expect("local addr");
    drop(listener);
    format!("http://{}", addr)
}

/// A client that never reuses connections, so a stopped server is noticed at once.
pub fn fresh_connection_client() -> reqwest::Client {
    reqwest::Client::builder()
        .pool_max_idle_per_host(0)
        .build()
        .expect("client")
}
