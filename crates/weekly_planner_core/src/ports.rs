//! crates/weekly_planner_core/src/ports.rs
//!
//! Defines the service contracts (traits) for the planner's core logic.
//! The server side depends on `SessionStore` and `ScheduleStore`; the editor runtime
//! depends on `PlannerBackend`. Concrete implementations live in the `api` service.

use async_trait::async_trait;

use crate::domain::{ScheduleDocument, SessionToken};

//=========================================================================================
// Generic Port Error and Result Types
//=========================================================================================

/// A generic error type for all port operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PortError {
    /// Bad credentials, or a missing or unknown session token.
    #[error("Unauthorized")]
    Unauthorized,
    /// The backend could not be reached at all.
    #[error("Service unavailable: {0}")]
    Unavailable(String),
    /// A payload did not have the expected shape.
    #[error("Invalid data: {0}")]
    Validation(String),
    /// The persisted document could not be read or written.
    #[error("Storage failure: {0}")]
    Storage(String),
    #[error("An unexpected error occurred: {0}")]
    Unexpected(String),
}

/// A convenience type alias for `Result<T, PortError>`.
pub type PortResult<T> = Result<T, PortError>;

//=========================================================================================
// Server-side Ports
//=========================================================================================

/// Issues and validates bearer tokens for the single admin credential.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Returns a fresh token on an exact credential match, `Unauthorized` otherwise.
    async fn login(&self, username: &str, password: &str) -> PortResult<SessionToken>;

    /// Forgets the token. Unknown tokens are ignored.
    async fn logout(&self, token: &SessionToken);

    async fn validate(&self, token: &SessionToken) -> bool;
}

/// Reads and replaces the whole schedule document.
#[async_trait]
pub trait ScheduleStore: Send + Sync {
    /// Returns an empty document when nothing has been stored yet.
    async fn read(&self) -> PortResult<ScheduleDocument>;

    /// Fully replaces the stored document. Either the new document is stored or the
    /// previous one is left intact.
    async fn write(&self, document: &ScheduleDocument) -> PortResult<()>;
}

//=========================================================================================
// Client-side Port
//=========================================================================================

/// The HTTP API as seen from the editor.
#[async_trait]
pub trait PlannerBackend: Send + Sync {
    /// Liveness probe; any error means the backend is treated as unavailable.
    async fn health(&self) -> PortResult<()>;

    async fn login(&self, username: &str, password: &str) -> PortResult<SessionToken>;

    async fn logout(&self, token: Option<&SessionToken>) -> PortResult<()>;

    async fn fetch_schedule(&self) -> PortResult<ScheduleDocument>;

    async fn save_schedule(
        &self,
        token: &SessionToken,
        document: &ScheduleDocument,
    ) -> PortResult<()>;
}
