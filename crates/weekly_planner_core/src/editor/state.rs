//! crates/weekly_planner_core/src/editor/state.rs
//!
//! The explicit state object owned by the editor. It replaces ambient UI globals:
//! everything the editor knows lives here and is moved through `transition`.

use crate::domain::{Activity, ScheduleDocument, SessionToken, SlotId};
use crate::messages;

/// Authentication and backend reachability as seen by the client.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuthState {
    pub server_available: bool,
    pub authenticated: bool,
    pub token: Option<SessionToken>,
}

impl AuthState {
    /// The gate: editing requires both a reachable backend and a login.
    pub fn can_edit(&self) -> bool {
        self.authenticated && self.server_available
    }
}

/// The login modal.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoginPanel {
    pub open: bool,
    pub error: Option<&'static str>,
}

/// The status pill. `generation` identifies the latest flash so that only its own
/// timer may revert the text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusLine {
    pub text: &'static str,
    pub active: bool,
    pub generation: u64,
}

impl Default for StatusLine {
    fn default() -> Self {
        Self {
            text: messages::STATUS_VIEW_ONLY,
            active: false,
            generation: 0,
        }
    }
}

/// The login callout that is nudged when a gated action is refused.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Callout {
    pub active: bool,
    pub generation: u64,
}

/// Save attempt bookkeeping. Versions are monotonic per editor.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SaveTracker {
    /// Version of the most recently issued save.
    pub issued: u64,
    /// Highest version whose response has been applied.
    pub settled: u64,
}

impl SaveTracker {
    pub fn in_flight(&self) -> bool {
        self.issued > self.settled
    }
}

/// Text exactly as typed into a slot. The schedule only keeps the trimmed form, so
/// the editor shows this until the user moves on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Draft {
    pub slot: SlotId,
    pub text: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EditorState {
    pub auth: AuthState,
    /// The working copy of the schedule; the source of truth for this edit session.
    pub schedule: ScheduleDocument,
    /// Set once the initial fetch has completed, successfully or not.
    pub loaded: bool,
    /// The working copy is a blank stand-in for a schedule that could not be fetched.
    pub fetch_failed: bool,
    pub selection: Option<SlotId>,
    pub draft: Option<Draft>,
    /// Activity painted onto clicked slots.
    pub brush: Option<Activity>,
    pub login: LoginPanel,
    pub status: StatusLine,
    pub callout: Callout,
    pub saves: SaveTracker,
}

impl EditorState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn can_edit(&self) -> bool {
        self.auth.can_edit()
    }

    /// Status text shown when no flash message is active.
    pub fn baseline_status(&self) -> &'static str {
        if !self.auth.server_available {
            messages::STATUS_VIEW_ONLY
        } else if self.auth.authenticated {
            messages::STATUS_AUTOSAVE
        } else {
            messages::STATUS_NEEDS_LOGIN
        }
    }

    /// Replaces the whole working copy.
    pub fn hydrate(&mut self, document: ScheduleDocument) {
        self.schedule = document;
        self.draft = None;
        self.loaded = true;
    }

    /// The text to display for `slot`: the raw draft if one is open, else the stored text.
    pub fn display_text(&self, slot: SlotId) -> String {
        match &self.draft {
            Some(draft) if draft.slot == slot => draft.text.clone(),
            _ => self
                .schedule
                .get(&slot)
                .map(|record| record.text.clone())
                .unwrap_or_default(),
        }
    }
}
