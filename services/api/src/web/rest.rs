//! services/api/src/web/rest.rs
//!
//! Contains the Axum handlers for the health probe and the schedule document, the
//! shared JSON reply types, and the master definition for the OpenAPI specification.

use crate::web::state::AppState;
use axum::{
    extract::{rejection::JsonRejection, State},
    http::{header, StatusCode},
    response::{IntoResponse, Json},
};
use serde::Serialize;
use std::sync::Arc;
use tracing::{error, warn};
use utoipa::{OpenApi, ToSchema};
use weekly_planner_core::domain::ScheduleDocument;
use weekly_planner_core::messages;

//=========================================================================================
// OpenAPI Master Definition
//=========================================================================================

#[derive(OpenApi)]
#[openapi(
    paths(
        health_handler,
        get_schedule_handler,
        save_schedule_handler,
        crate::web::auth::login_handler,
        crate::web::auth::logout_handler,
    ),
    components(
        schemas(
            OkResponse,
            ErrorBody,
            crate::web::auth::LoginRequest,
            crate::web::auth::LoginResponse,
        )
    ),
    tags(
        (name = "Weekly Planner API", description = "Admin session and schedule persistence for the weekly planner.")
    )
)]
pub struct ApiDoc;

//=========================================================================================
// API Response Structs
//=========================================================================================

/// `{"ok": true}`
#[derive(Serialize, ToSchema)]
pub struct OkResponse {
    ok: bool,
}

impl OkResponse {
    pub fn ok() -> Self {
        Self { ok: true }
    }
}

/// `{"error": "<message>"}`
#[derive(Serialize, ToSchema)]
pub struct ErrorBody {
    pub error: String,
}

/// The error half of every handler's result.
pub type ErrorReply = (StatusCode, Json<ErrorBody>);

pub fn error_response(status: StatusCode, message: &str) -> ErrorReply {
    (
        status,
        Json(ErrorBody {
            error: message.to_string(),
        }),
    )
}

//=========================================================================================
// REST API Handlers
//=========================================================================================

/// Liveness probe. Clients use it to tell "no backend" apart from "not logged in".
#[utoipa::path(
    get,
    path = "/api/health",
    responses(
        (status = 200, description = "The server is running", body = OkResponse)
    )
)]
pub async fn health_handler() -> Json<OkResponse> {
    Json(OkResponse::ok())
}

/// The current schedule document, read from the same store that saves write to.
#[utoipa::path(
    get,
    path = "/schedule.json",
    responses(
        (status = 200, description = "The sparse schedule document keyed by \"<day>_<HH:MM>\""),
        (status = 500, description = "The stored schedule could not be read", body = ErrorBody)
    )
)]
pub async fn get_schedule_handler(
    State(app_state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, ErrorReply> {
    let document = app_state.schedule.read().await.map_err(|e| {
        error!("Failed to read schedule: {:?}", e);
        error_response(StatusCode::INTERNAL_SERVER_ERROR, messages::API_LOAD_FAILED)
    })?;

    Ok(([(header::CACHE_CONTROL, "no-store")], Json(document)))
}

/// Replace the whole schedule document.
///
/// The body is the full sparse document keyed by `"<day>_<HH:MM>"`; empty records
/// are dropped before the document is written. This is a replacement, not a merge.
#[utoipa::path(
    post,
    path = "/api/schedule",
    request_body(content_type = "application/json", description = "The full schedule document, e.g. {\"Mon_09:00\": {\"text\": \"Math\", \"activity\": \"study\"}}."),
    responses(
        (status = 200, description = "Schedule saved", body = OkResponse),
        (status = 400, description = "Malformed schedule document", body = ErrorBody),
        (status = 401, description = "Missing or invalid bearer token", body = ErrorBody),
        (status = 413, description = "Body larger than 1 MiB", body = ErrorBody),
        (status = 500, description = "The schedule could not be stored", body = ErrorBody)
    ),
    params(
        ("Authorization" = String, Header, description = "Bearer token from /api/login.")
    )
)]
pub async fn save_schedule_handler(
    State(app_state): State<Arc<AppState>>,
    payload: Result<Json<ScheduleDocument>, JsonRejection>,
) -> Result<Json<OkResponse>, ErrorReply> {
    let Json(document) = payload.map_err(|e| {
        warn!("Rejected schedule payload: {}", e);
        if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
            error_response(StatusCode::PAYLOAD_TOO_LARGE, messages::API_PAYLOAD_TOO_LARGE)
        } else {
            error_response(StatusCode::BAD_REQUEST, messages::API_INVALID_PAYLOAD)
        }
    })?;

    app_state.schedule.write(&document).await.map_err(|e| {
        error!("Failed to save schedule: {:?}", e);
        error_response(StatusCode::INTERNAL_SERVER_ERROR, messages::API_SAVE_FAILED)
    })?;

    Ok(Json(OkResponse::ok()))
}
