//! services/api/src/web/middleware.rs
//!
//! Authentication middleware for protecting routes.

use axum::{
    extract::{Request, State},
    http::{header, HeaderMap, StatusCode},
    middleware::Next,
    response::Response,
};
use std::sync::Arc;
use tracing::warn;
use weekly_planner_core::domain::SessionToken;
use weekly_planner_core::messages;

use crate::web::rest::{error_response, ErrorReply};
use crate::web::state::AppState;

/// Extracts the token from an `Authorization: Bearer <token>` header.
pub fn bearer_token(headers: &HeaderMap) -> Option<SessionToken> {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .filter(|token| !token.is_empty())
        .map(SessionToken::new)
}

/// Middleware that validates the bearer token against the session store.
///
/// If valid, inserts the token into request extensions for handlers to use.
/// If invalid or missing, returns 401 with an `{error}` body.
pub async fn require_auth(
    State(state): State<Arc<AppState>>,
    mut req: Request,
    next: Next,
) -> Result<Response, ErrorReply> {
    let unauthorized = || error_response(StatusCode::UNAUTHORIZED, messages::API_LOGIN_REQUIRED);

    let token = bearer_token(req.headers()).ok_or_else(|| {
        warn!("Missing bearer token on {} {}", req.method(), req.uri());
        unauthorized()
    })?;

    if !state.sessions.validate(&token).await {
        warn!("Unknown session token on {} {}", req.method(), req.uri());
        return Err(unauthorized());
    }

    req.extensions_mut().insert(token);
    Ok(next.run(req).await)
}
