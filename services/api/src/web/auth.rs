//! services/api/src/web/auth.rs
//!
//! Authentication endpoints for the single admin login and logout.

use axum::{
    extract::{rejection::JsonRejection, State},
    http::{HeaderMap, StatusCode},
    Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{error, info, warn};
use utoipa::ToSchema;
use weekly_planner_core::domain::SessionToken;
use weekly_planner_core::messages;
use weekly_planner_core::ports::PortError;

use crate::web::middleware::bearer_token;
use crate::web::rest::{error_response, ErrorBody, ErrorReply, OkResponse};
use crate::web::state::AppState;

//=========================================================================================
// Request/Response Types
//=========================================================================================

#[derive(Deserialize, ToSchema)]
pub struct LoginRequest {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Serialize, ToSchema)]
pub struct LoginResponse {
    #[schema(value_type = String)]
    pub token: SessionToken,
}

//=========================================================================================
// Handlers
//=========================================================================================

/// POST /api/login - Exchange the admin credential for a bearer token
#[utoipa::path(
    post,
    path = "/api/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = LoginResponse),
        (status = 401, description = "Invalid credentials", body = ErrorBody)
    )
)]
pub async fn login_handler(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<Json<LoginResponse>, ErrorReply> {
    let invalid = || error_response(StatusCode::UNAUTHORIZED, messages::API_INVALID_CREDENTIALS);

    // A body that cannot be read is treated like wrong credentials.
    let Json(req) = payload.map_err(|e| {
        warn!("Malformed login request: {}", e);
        invalid()
    })?;

    let token = state
        .sessions
        .login(&req.username, &req.password)
        .await
        .map_err(|e| match e {
            PortError::Unauthorized => invalid(),
            other => {
                error!("Failed to open admin session: {:?}", other);
                error_response(StatusCode::INTERNAL_SERVER_ERROR, &other.to_string())
            }
        })?;

    info!("Admin logged in");
    Ok(Json(LoginResponse { token }))
}

/// POST /api/logout - Invalidate the bearer token, if any
#[utoipa::path(
    post,
    path = "/api/logout",
    responses(
        (status = 200, description = "Logout always succeeds", body = OkResponse)
    ),
    params(
        ("Authorization" = Option<String>, Header, description = "Bearer token to invalidate.")
    )
)]
pub async fn logout_handler(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Json<OkResponse> {
    if let Some(token) = bearer_token(&headers) {
        state.sessions.logout(&token).await;
    }
    Json(OkResponse::ok())
}
