pub mod auth;
pub mod middleware;
pub mod rest;
pub mod state;

pub use auth::{login_handler, logout_handler};
pub use middleware::require_auth;
pub use rest::{get_schedule_handler, health_handler, save_schedule_handler};

use axum::{
    extract::DefaultBodyLimit,
    http::{
        header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE},
        Method,
    },
    middleware as axum_middleware,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::{
    compression::CompressionLayer,
    cors::CorsLayer,
    services::{ServeDir, ServeFile},
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::web::{rest::ApiDoc, state::AppState};

/// Largest accepted request body.
pub const BODY_LIMIT_BYTES: usize = 1024 * 1024;

/// Builds the complete application: API routes, Swagger UI and the static site.
pub fn build_router(app_state: Arc<AppState>) -> Router {
    let public_dir = app_state.config.public_dir.clone();
    let cors_origin = app_state.config.cors_origin.clone();

    // Public routes (no auth required)
    let public_routes = Router::new()
        .route("/api/health", get(health_handler))
        .route("/schedule.json", get(get_schedule_handler))
        .route("/api/login", post(login_handler))
        .route("/api/logout", post(logout_handler));

    // Protected routes (auth required)
    let protected_routes = Router::new()
        .route("/api/schedule", post(save_schedule_handler))
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            require_auth,
        ));

    let api_router = Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .layer(DefaultBodyLimit::max(BODY_LIMIT_BYTES))
        .with_state(app_state);

    // Anything else is a static asset, with the index page as the catch-all. The
    // schedule itself is never served from here, wherever SCHEDULE_FILE points.
    let static_files =
        ServeDir::new(&public_dir).fallback(ServeFile::new(public_dir.join("index.html")));

    let mut app = Router::new()
        .merge(api_router)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .fallback_service(static_files)
        .layer(CompressionLayer::new());

    if let Some(origin) = cors_origin {
        app = app.layer(
            CorsLayer::new()
                .allow_origin(origin)
                .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
                .allow_headers([AUTHORIZATION, CONTENT_TYPE, ACCEPT]),
        );
    }

    app
}
