//! services/api/src/bin/api.rs

use planner_api::{
    adapters::{AdminCredential, FileScheduleStore, InMemorySessionStore},
    config::Config,
    error::ApiError,
    web::{build_router, state::AppState},
};
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use weekly_planner_core::ports::ScheduleStore;

#[tokio::main]
async fn main() -> Result<(), ApiError> {
    // --- 1. Load Configuration & Set Up Logging ---
    let config = Arc::new(Config::from_env()?);
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(config.log_level.to_string()))
        .with(tracing_subscriber::fmt::layer())
        .init();
    info!("Configuration loaded. Starting server...");

    // --- 2. Open the Schedule Store ---
    let schedule_store = Arc::new(FileScheduleStore::new(config.schedule_file.clone()));
    match schedule_store.read().await {
        Ok(document) => info!(
            "Schedule file {} holds {} slots",
            schedule_store.path().display(),
            document.len()
        ),
        // The next successful save replaces the file, so this is not fatal.
        Err(e) => warn!("Existing schedule could not be read: {}", e),
    }

    // --- 3. Set Up the Admin Session Store ---
    let admin = AdminCredential::new(config.admin_username.clone(), &config.admin_password)?;
    info!("Admin login enabled for user '{}'", admin.username());
    let session_store = Arc::new(InMemorySessionStore::new(admin));

    // --- 4. Build the Shared AppState & Router ---
    let app_state = Arc::new(AppState {
        sessions: session_store,
        schedule: schedule_store,
        config: config.clone(),
    });
    let app = build_router(app_state);

    // --- 5. Start the Server ---
    info!("Weekly planner running on http://{}", config.bind_address);
    info!(
        "Swagger UI available at http://{}/swagger-ui",
        config.bind_address
    );
    let listener = tokio::net::TcpListener::bind(&config.bind_address).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
}
