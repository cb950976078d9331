//! services/api/src/client/driver.rs
//!
//! The async runtime around the pure editor state machine. It owns the current
//! `EditorState`, feeds events through `transition`, and turns the resulting effects
//! into backend requests and timers whose outcomes come back in as events.
//!
//! Requests are fire-and-forget: nothing is cancelled, and responses may arrive in any
//! order. Ordering is handled by the state machine's save versions, not here.

use std::sync::Arc;
use tokio::task::JoinSet;
use tracing::{error, warn};
use weekly_planner_core::editor::{project, transition, EditorEvent, EditorState, EditorView, Effect};
use weekly_planner_core::ports::PlannerBackend;

//=========================================================================================
// The Driver
//=========================================================================================

/// Drives one editor session against a `PlannerBackend`.
///
/// Must be used from within a Tokio runtime, since dispatching spawns tasks.
pub struct EditorDriver {
    state: EditorState,
    backend: Arc<dyn PlannerBackend>,
    requests: JoinSet<Option<EditorEvent>>,
    timers: JoinSet<EditorEvent>,
}

impl EditorDriver {
    pub fn new(backend: Arc<dyn PlannerBackend>) -> Self {
        Self {
            state: EditorState::new(),
            backend,
            requests: JoinSet::new(),
            timers: JoinSet::new(),
        }
    }

    pub fn state(&self) -> &EditorState {
        &self.state
    }

    pub fn view(&self) -> EditorView {
        project(&self.state)
    }

    /// Number of backend requests that have not reported back yet.
    pub fn pending_requests(&self) -> usize {
        self.requests.len()
    }

    /// Probes the backend, loads the schedule and waits until the grid is hydrated.
    pub async fn start(&mut self) {
        self.dispatch(EditorEvent::Started);
        self.settle().await;
    }

    /// Re-runs the health probe, e.g. when the page regains focus.
    pub fn probe_health(&mut self) {
        self.execute(Effect::ProbeHealth);
    }

    /// Applies one event and starts whatever I/O it asks for. Effects that belong to the
    /// UI (such as moving keyboard focus) are handed back to the caller.
    pub fn dispatch(&mut self, event: EditorEvent) -> Vec<Effect> {
        let state = std::mem::take(&mut self.state);
        let (next, effects) = transition(state, event);
        self.state = next;

        effects
            .into_iter()
            .filter_map(|effect| self.execute(effect))
            .collect()
    }

    /// Waits for every in-flight request, feeding each outcome back in.
    pub async fn settle(&mut self) {
        while let Some(joined) = self.requests.join_next().await {
            match joined {
                Ok(Some(event)) => {
                    self.dispatch(event);
                }
                Ok(None) => {}
                Err(e) => error!("Backend request task failed: {}", e),
            }
        }
    }

    /// Waits for whichever request or timer finishes first and applies its outcome.
    /// Returns `false` once nothing is pending.
    ///
    /// This is the call a UI loop should poll: a request that never answers only holds
    /// back its own outcome, while timers keep firing.
    pub async fn next_event(&mut self) -> bool {
        if self.requests.is_empty() && self.timers.is_empty() {
            return false;
        }

        let event = tokio::select! {
            Some(joined) = self.requests.join_next(), if !self.requests.is_empty() => {
                joined.unwrap_or_else(|e| {
                    error!("Backend request task failed: {}", e);
                    None
                })
            }
            Some(joined) = self.timers.join_next(), if !self.timers.is_empty() => {
                match joined {
                    Ok(event) => Some(event),
                    Err(e) => {
                        error!("Timer task failed: {}", e);
                        None
                    }
                }
            }
            else => None,
        };

        if let Some(event) = event {
            self.dispatch(event);
        }
        true
    }

    /// Waits for the next timer to fire and applies it. Returns `false` if none is pending.
    pub async fn next_timer(&mut self) -> bool {
        match self.timers.join_next().await {
            Some(Ok(event)) => {
                self.dispatch(event);
                true
            }
            Some(Err(e)) => {
                error!("Timer task failed: {}", e);
                true
            }
            None => false,
        }
    }

    fn execute(&mut self, effect: Effect) -> Option<Effect> {
        let backend = self.backend.clone();
        match effect {
            Effect::ProbeHealth => {
                self.requests.spawn(async move {
                    let available = match backend.health().await {
                        Ok(()) => true,
                        Err(e) => {
                            warn!("Backend unavailable, editing disabled: {}", e);
                            false
                        }
                    };
                    Some(EditorEvent::HealthChecked { available })
                });
            }
            Effect::FetchSchedule => {
                self.requests.spawn(async move {
                    let result = backend.fetch_schedule().await;
                    if let Err(e) = &result {
                        warn!("Could not fetch the schedule, using an empty one: {}", e);
                    }
                    Some(EditorEvent::ScheduleLoaded(result))
                });
            }
            Effect::Persist {
                version,
                token,
                document,
                message,
            } => {
                self.requests.spawn(async move {
                    let outcome = backend.save_schedule(&token, &document).await;
                    if let Err(e) = &outcome {
                        error!("Could not save the schedule (version {}): {}", version, e);
                    }
                    Some(EditorEvent::SaveSettled {
                        version,
                        message,
                        outcome,
                    })
                });
            }
            Effect::Login { username, password } => {
                self.requests.spawn(async move {
                    Some(match backend.login(&username, &password).await {
                        Ok(token) => EditorEvent::LoginSucceeded(token),
                        Err(e) => EditorEvent::LoginFailed(e),
                    })
                });
            }
            Effect::Logout { token } => {
                self.requests.spawn(async move {
                    if let Err(e) = backend.logout(token.as_ref()).await {
                        warn!("Logout notification failed: {}", e);
                    }
                    None
                });
            }
            Effect::StartStatusTimer { generation, delay } => {
                self.timers.spawn(async move {
                    tokio::time::sleep(delay).await;
                    EditorEvent::StatusTimerElapsed { generation }
                });
            }
            Effect::StartNudgeTimer { generation, delay } => {
                self.timers.spawn(async move {
                    tokio::time::sleep(delay).await;
                    EditorEvent::NudgeTimerElapsed { generation }
                });
            }
            ui @ Effect::FocusSlot(_) => return Some(ui),
        }
        None
    }
}
