//! crates/weekly_planner_core/src/editor/event.rs
//!
//! The editor's input alphabet (user intents and I/O outcomes) and the effects a
//! transition asks its runtime to perform.

use std::time::Duration;

use crate::domain::{Activity, ScheduleDocument, SessionToken, SlotId};
use crate::ports::{PortError, PortResult};

//=========================================================================================
// Events (into the state machine)
//=========================================================================================

#[derive(Debug, Clone, PartialEq)]
pub enum EditorEvent {
    // --- Lifecycle ---
    /// The page has loaded; kicks off the health probe.
    Started,
    HealthChecked { available: bool },
    ScheduleLoaded(PortResult<ScheduleDocument>),

    // --- Grid interaction ---
    /// The activity selector changed.
    BrushSelected(Option<Activity>),
    /// A slot was clicked. `clear_modifier` is set for alt/meta clicks.
    SlotClicked { slot: SlotId, clear_modifier: bool },
    SlotFocused(SlotId),
    /// The slot's inline text was edited.
    SlotTextInput { slot: SlotId, text: String },
    SlotContextMenu(SlotId),

    // --- Side editor panel ---
    EditorTextInput(String),
    EditorActivityChanged(Option<Activity>),
    EditorClearClicked,

    /// Clear the whole schedule. Confirmation is the UI's concern.
    ClearAll,

    // --- Authentication ---
    LoginButtonPressed,
    LoginSubmitted { username: String, password: String },
    LoginSucceeded(SessionToken),
    LoginFailed(PortError),
    LoginModalClosed,
    LogoutRequested,

    // --- Outcomes and timers ---
    SaveSettled {
        version: u64,
        message: &'static str,
        outcome: PortResult<()>,
    },
    StatusTimerElapsed { generation: u64 },
    NudgeTimerElapsed { generation: u64 },
}

//=========================================================================================
// Effects (out of the state machine)
//=========================================================================================

#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    ProbeHealth,
    FetchSchedule,
    /// Push the full document. `message` is flashed if this save is the newest to settle.
    Persist {
        version: u64,
        token: SessionToken,
        document: ScheduleDocument,
        message: &'static str,
    },
    Login { username: String, password: String },
    /// Best-effort server notification; the local logout has already happened.
    Logout { token: Option<SessionToken> },
    StartStatusTimer { generation: u64, delay: Duration },
    StartNudgeTimer { generation: u64, delay: Duration },
    /// Move keyboard focus into the slot for inline typing.
    FocusSlot(SlotId),
}
