//! services/api/src/adapters/http_backend.rs
//!
//! This module contains the `reqwest` implementation of the `PlannerBackend` port,
//! i.e. the editor's view of the planner's HTTP API.
//!
//! Connection failures map to `PortError::Unavailable`; status codes the server uses
//! deliberately (401, 400, 500) map to the matching port errors.

use async_trait::async_trait;
use chrono::Utc;
use reqwest::{Client, Response, StatusCode};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use weekly_planner_core::domain::{ScheduleDocument, SessionToken};
use weekly_planner_core::ports::{PlannerBackend, PortError, PortResult};

//=========================================================================================
// Wire Types
//=========================================================================================

#[derive(Serialize)]
struct LoginBody<'a> {
    username: &'a str,
    password: &'a str,
}

#[derive(Deserialize)]
struct TokenBody {
    token: SessionToken,
}

#[derive(Deserialize)]
struct ErrorBody {
    error: String,
}

//=========================================================================================
// The Main Adapter Struct
//=========================================================================================

#[derive(Clone)]
pub struct HttpPlannerBackend {
    client: Client,
    base_url: String,
}

impl HttpPlannerBackend {
    /// Creates a backend for a server such as `http://localhost:4173`.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(Client::new(), base_url)
    }

    pub fn with_client(client: Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { client, base_url }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

fn transport_error(e: reqwest::Error) -> PortError {
    if e.is_decode() {
        PortError::Validation(e.to_string())
    } else {
        PortError::Unavailable(e.to_string())
    }
}

/// Reads the `{error}` body of a failed response, falling back to the status line.
async fn error_message(response: Response) -> String {
    let status = response.status();
    match response.json::<ErrorBody>().await {
        Ok(body) => body.error,
        Err(_) => status.to_string(),
    }
}

//=========================================================================================
// `PlannerBackend` Trait Implementation
//=========================================================================================

#[async_trait]
impl PlannerBackend for HttpPlannerBackend {
    async fn health(&self) -> PortResult<()> {
        let response = self
            .client
            .get(self.url("/api/health"))
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await
            .map_err(transport_error)?;

        if response.status().is_success() {
            Ok(())
        } else {
            Err(PortError::Unavailable(format!(
                "health check returned {}",
                response.status()
            )))
        }
    }

    async fn login(&self, username: &str, password: &str) -> PortResult<SessionToken> {
        let response = self
            .client
            .post(self.url("/api/login"))
            .json(&LoginBody { username, password })
            .send()
            .await
            .map_err(transport_error)?;

        match response.status() {
            status if status.is_success() => {
                let body: TokenBody = response.json().await.map_err(transport_error)?;
                Ok(body.token)
            }
            StatusCode::UNAUTHORIZED => Err(PortError::Unauthorized),
            _ => Err(PortError::Unexpected(error_message(response).await)),
        }
    }

    async fn logout(&self, token: Option<&SessionToken>) -> PortResult<()> {
        let mut request = self.client.post(self.url("/api/logout"));
        if let Some(token) = token {
            request = request.bearer_auth(token.as_str());
        }
        let response = request.send().await.map_err(transport_error)?;

        if response.status().is_success() {
            Ok(())
        } else {
            Err(PortError::Unexpected(error_message(response).await))
        }
    }

    async fn fetch_schedule(&self) -> PortResult<ScheduleDocument> {
        // The query parameter defeats intermediary caches.
        let response = self
            .client
            .get(self.url("/schedule.json"))
            .query(&[("cache", Utc::now().timestamp_millis())])
            .send()
            .await
            .map_err(transport_error)?;

        if !response.status().is_success() {
            warn!("Schedule fetch returned {}", response.status());
            return Err(PortError::Unexpected(error_message(response).await));
        }

        let document: ScheduleDocument = response.json().await.map_err(transport_error)?;
        debug!("Fetched schedule with {} slots", document.len());
        Ok(document)
    }

    async fn save_schedule(
        &self,
        token: &SessionToken,
        document: &ScheduleDocument,
    ) -> PortResult<()> {
        let response = self
            .client
            .post(self.url("/api/schedule"))
            .bearer_auth(token.as_str())
            .json(document)
            .send()
            .await
            .map_err(transport_error)?;

        match response.status() {
            status if status.is_success() => Ok(()),
            StatusCode::UNAUTHORIZED => Err(PortError::Unauthorized),
            StatusCode::BAD_REQUEST => Err(PortError::Validation(error_message(response).await)),
            status if status.is_server_error() => {
                Err(PortError::Storage(error_message(response).await))
            }
            _ => Err(PortError::Unexpected(error_message(response).await)),
        }
    }
}
