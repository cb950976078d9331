//! services/api/src/web/state.rs
//!
//! Defines the application state shared by all HTTP handlers.

use crate::config::Config;
use std::sync::Arc;
use weekly_planner_core::ports::{ScheduleStore, SessionStore};

/// The shared application state, created once at startup and passed to all handlers.
///
/// Both stores sit behind their port traits, so a persistent or shared session store
/// can replace the in-memory one without touching the handlers.
#[derive(Clone)]
pub struct AppState {
    pub sessions: Arc<dyn SessionStore>,
    pub schedule: Arc<dyn ScheduleStore>,
    pub config: Arc<Config>,
}
