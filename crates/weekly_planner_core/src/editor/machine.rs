//! crates/weekly_planner_core/src/editor/machine.rs
//!
//! The editor state machine. `transition` is a pure function: it consumes the current
//! state and one event and returns the next state together with the effects the
//! runtime must carry out. No I/O and no clocks live here.
//!
//! Every edit goes through the same gate (`authenticated && server_available`). A
//! refused edit nudges the login callout and changes nothing else. An accepted edit
//! mutates the working copy first and then asks for the whole document to be saved;
//! a failed save never rolls the local mutation back.

use std::time::Duration;

use crate::domain::{SlotId, SlotRecord};
use crate::editor::event::{EditorEvent, Effect};
use crate::editor::state::{Draft, EditorState};
use crate::messages;
use crate::ports::PortError;

/// How long a flash message stays before the status reverts to its baseline.
pub const STATUS_FLASH_DELAY: Duration = Duration::from_millis(1800);
/// How long the login callout stays highlighted after a nudge.
pub const NUDGE_DELAY: Duration = Duration::from_millis(900);

/// Applies one event to the editor state.
pub fn transition(state: EditorState, event: EditorEvent) -> (EditorState, Vec<Effect>) {
    let mut step = Step {
        state,
        effects: Vec::new(),
    };
    step.apply(event);
    (step.state, step.effects)
}

struct Step {
    state: EditorState,
    effects: Vec<Effect>,
}

impl Step {
    fn apply(&mut self, event: EditorEvent) {
        if is_edit(&event) && !self.state.loaded {
            // Nothing can be edited before the working copy has been hydrated.
            return;
        }

        match event {
            EditorEvent::Started => self.effects.push(Effect::ProbeHealth),
            EditorEvent::HealthChecked { available } => {
                let came_back = available && !self.state.auth.server_available;
                self.state.auth.server_available = available;
                self.sync_auth();
                if came_back && self.state.fetch_failed {
                    // The blank stand-in must never be saved over the real schedule.
                    self.state.loaded = false;
                    self.state.fetch_failed = false;
                }
                if !self.state.loaded {
                    self.effects.push(Effect::FetchSchedule);
                }
            }
            EditorEvent::ScheduleLoaded(result) => {
                // A failed fetch still yields a usable, blank grid.
                let failed = result.is_err();
                self.state.hydrate(result.unwrap_or_default());
                self.state.fetch_failed = failed;
            }

            EditorEvent::BrushSelected(activity) => self.state.brush = activity,
            EditorEvent::SlotClicked {
                slot,
                clear_modifier,
            } => self.slot_clicked(slot, clear_modifier),
            EditorEvent::SlotFocused(slot) => {
                if self.state.can_edit() {
                    self.select(slot);
                }
            }
            EditorEvent::SlotTextInput { slot, text } => {
                if self.gate() {
                    self.type_text(slot, text);
                    self.persist(messages::CHANGES_SAVED);
                }
            }
            EditorEvent::SlotContextMenu(slot) => {
                if self.gate() {
                    self.select(slot);
                    self.clear_slot(slot);
                    self.persist(messages::SLOT_CLEARED);
                }
            }

            EditorEvent::EditorTextInput(text) => {
                if let Some(slot) = self.gated_selection() {
                    self.type_text(slot, text);
                    self.persist(messages::CHANGES_SAVED);
                }
            }
            EditorEvent::EditorActivityChanged(activity) => {
                if let Some(slot) = self.gated_selection() {
                    self.edit_slot(slot, |record| record.activity = activity);
                    self.persist(messages::CHANGES_SAVED);
                }
            }
            EditorEvent::EditorClearClicked => {
                if let Some(slot) = self.gated_selection() {
                    self.clear_slot(slot);
                    self.persist(messages::SLOT_CLEARED);
                }
            }
            EditorEvent::ClearAll => {
                if self.gate() {
                    self.state.schedule.clear_all();
                    self.state.draft = None;
                    self.persist(messages::SCHEDULE_CLEARED);
                }
            }

            EditorEvent::LoginButtonPressed => {
                if !self.state.auth.server_available {
                    self.nudge();
                } else if self.state.auth.authenticated {
                    self.logout();
                } else {
                    self.state.login.open = true;
                    self.state.login.error = None;
                }
            }
            EditorEvent::LoginSubmitted { username, password } => {
                if self.state.auth.authenticated {
                    // Already holding a token; a second one would never be revoked.
                } else if !self.state.auth.server_available {
                    // The backend cannot answer, so no request is made.
                    self.nudge();
                } else {
                    self.effects.push(Effect::Login {
                        username: username.trim().to_string(),
                        password,
                    });
                }
            }
            EditorEvent::LoginSucceeded(token) if self.state.auth.authenticated => {
                // A duplicate submit raced the first one; drop the extra session.
                self.effects.push(Effect::Logout { token: Some(token) });
            }
            EditorEvent::LoginSucceeded(token) => {
                self.state.auth.authenticated = true;
                self.state.auth.token = Some(token);
                self.state.login.open = false;
                self.state.login.error = None;
                self.sync_auth();
                self.flash(messages::LOGIN_ACTIVATED);
            }
            EditorEvent::LoginFailed(error) => {
                self.state.login.error = Some(match error {
                    PortError::Unavailable(_) => messages::LOGIN_SERVER_DOWN,
                    _ => messages::LOGIN_WRONG_CREDENTIALS,
                });
            }
            EditorEvent::LoginModalClosed => {
                self.state.login.open = false;
                self.state.login.error = None;
            }
            EditorEvent::LogoutRequested => {
                if self.state.auth.authenticated {
                    self.logout();
                }
            }

            EditorEvent::SaveSettled {
                version,
                message,
                outcome,
            } => self.save_settled(version, message, outcome),
            EditorEvent::StatusTimerElapsed { generation } => {
                if generation == self.state.status.generation {
                    self.state.status.text = self.state.baseline_status();
                    self.state.status.active = false;
                }
            }
            EditorEvent::NudgeTimerElapsed { generation } => {
                if generation == self.state.callout.generation {
                    self.state.callout.active = false;
                }
            }
        }
    }

    fn slot_clicked(&mut self, slot: SlotId, clear_modifier: bool) {
        if !self.gate() {
            return;
        }
        self.select(slot);

        if clear_modifier {
            self.clear_slot(slot);
            self.persist(messages::SLOT_CLEARED);
        } else if let Some(activity) = self.state.brush {
            self.edit_slot(slot, |record| record.activity = Some(activity));
            self.persist(messages::CHANGES_SAVED);
        } else {
            self.effects.push(Effect::FocusSlot(slot));
        }
    }

    fn save_settled(&mut self, version: u64, message: &'static str, outcome: Result<(), PortError>) {
        if version <= self.state.saves.settled {
            // A newer save already reported back; this response is stale.
            return;
        }
        self.state.saves.settled = version;

        match outcome {
            Ok(()) => self.flash(message),
            Err(error) => {
                match error {
                    PortError::Unavailable(_) => {
                        self.state.auth.server_available = false;
                        self.sync_auth();
                    }
                    PortError::Unauthorized => {
                        // The server no longer knows the token, e.g. after a restart.
                        self.state.auth.authenticated = false;
                        self.state.auth.token = None;
                        self.sync_auth();
                    }
                    _ => {}
                }
                self.flash(messages::SAVE_FAILED);
            }
        }
    }

    /// Returns whether edits are allowed, nudging the callout when they are not.
    fn gate(&mut self) -> bool {
        if self.state.can_edit() {
            true
        } else {
            self.nudge();
            false
        }
    }

    fn gated_selection(&mut self) -> Option<SlotId> {
        if self.gate() {
            self.state.selection
        } else {
            None
        }
    }

    fn select(&mut self, slot: SlotId) {
        if self.state.draft.as_ref().is_some_and(|draft| draft.slot != slot) {
            self.state.draft = None;
        }
        self.state.selection = Some(slot);
    }

    /// Stores the trimmed text and keeps the raw input as the slot's draft.
    fn type_text(&mut self, slot: SlotId, text: String) {
        self.edit_slot(slot, |record| record.text = text.trim().to_string());
        self.state.draft = Some(Draft { slot, text });
    }

    fn clear_slot(&mut self, slot: SlotId) {
        self.state.schedule.clear_slot(slot);
        if self.state.draft.as_ref().is_some_and(|draft| draft.slot == slot) {
            self.state.draft = None;
        }
    }

    /// Rewrites one slot; a record left empty by `change` is removed.
    fn edit_slot(&mut self, slot: SlotId, change: impl FnOnce(&mut SlotRecord)) {
        let mut record = self.state.schedule.get(&slot).cloned().unwrap_or_default();
        change(&mut record);
        self.state.schedule.set_slot(slot, record);
    }

    fn persist(&mut self, message: &'static str) {
        let Some(token) = self.state.auth.token.clone() else {
            return;
        };
        self.state.saves.issued += 1;
        self.effects.push(Effect::Persist {
            version: self.state.saves.issued,
            token,
            document: self.state.schedule.clone(),
            message,
        });
    }

    fn logout(&mut self) {
        let token = self.state.auth.token.take();
        self.state.auth.authenticated = false;
        self.effects.push(Effect::Logout { token });
        self.sync_auth();
        self.flash(messages::LOGGED_OUT);
    }

    /// Re-derives everything that depends on the auth flags.
    fn sync_auth(&mut self) {
        self.state.status.text = self.state.baseline_status();
        self.state.status.active = false;
        if !self.state.can_edit() {
            self.state.selection = None;
            self.state.draft = None;
        }
    }

    fn flash(&mut self, message: &'static str) {
        let status = &mut self.state.status;
        status.generation += 1;
        status.text = message;
        status.active = true;
        self.effects.push(Effect::StartStatusTimer {
            generation: status.generation,
            delay: STATUS_FLASH_DELAY,
        });
    }

    fn nudge(&mut self) {
        let callout = &mut self.state.callout;
        callout.generation += 1;
        callout.active = true;
        self.effects.push(Effect::StartNudgeTimer {
            generation: callout.generation,
            delay: NUDGE_DELAY,
        });
    }
}

fn is_edit(event: &EditorEvent) -> bool {
    matches!(
        event,
        EditorEvent::SlotClicked { .. }
            | EditorEvent::SlotFocused(_)
            | EditorEvent::SlotTextInput { .. }
            | EditorEvent::SlotContextMenu(_)
            | EditorEvent::EditorTextInput(_)
            | EditorEvent::EditorActivityChanged(_)
            | EditorEvent::EditorClearClicked
            | EditorEvent::ClearAll
    )
}
