//! crates/weekly_planner_core/src/editor/view.rs
//!
//! A pure projection of `EditorState` into what the UI binder renders.

use crate::domain::{Activity, SlotId};
use crate::editor::state::EditorState;
use crate::messages;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditorView {
    pub editable: bool,
    pub login_button: LoginButtonView,
    pub callout: CalloutView,
    pub status: StatusView,
    pub panel: PanelView,
    pub login_modal_open: bool,
    pub login_error: Option<&'static str>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginButtonView {
    pub label: &'static str,
    pub enabled: bool,
    pub expanded: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalloutView {
    pub text: &'static str,
    pub active: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusView {
    pub text: &'static str,
    pub active: bool,
}

/// The side editor panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PanelView {
    /// Editing is not possible; the message explains why.
    Locked(&'static str),
    /// Editing is possible but nothing is selected.
    Empty(&'static str),
    Slot {
        slot: SlotId,
        label: String,
        text: String,
        activity: Option<Activity>,
    },
}

/// One table cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CellView {
    pub slot: SlotId,
    pub text: String,
    pub activity: Option<Activity>,
    pub selected: bool,
    pub locked: bool,
}

pub fn project(state: &EditorState) -> EditorView {
    let auth = &state.auth;
    let editable = state.can_edit();

    let login_button = if !auth.server_available {
        LoginButtonView {
            label: messages::LOGIN_BUTTON_VIEW_ONLY,
            enabled: false,
            expanded: false,
        }
    } else if auth.authenticated {
        LoginButtonView {
            label: messages::LOGIN_BUTTON_LOGOUT,
            enabled: true,
            expanded: true,
        }
    } else {
        LoginButtonView {
            label: messages::LOGIN_BUTTON_LOGIN,
            enabled: true,
            expanded: false,
        }
    };

    let callout = CalloutView {
        text: if auth.server_available {
            messages::CALLOUT_LOGIN
        } else {
            messages::SERVER_REQUIRED
        },
        active: state.callout.active,
    };

    let panel = if !auth.server_available {
        PanelView::Locked(messages::SERVER_REQUIRED)
    } else if !auth.authenticated {
        PanelView::Locked(messages::EDITOR_LOCKED)
    } else {
        match state.selection {
            None => PanelView::Empty(messages::EDITOR_EMPTY),
            Some(slot) => {
                PanelView::Slot {
                    slot,
                    label: slot.label(),
                    text: state.display_text(slot),
                    activity: state.schedule.get(&slot).and_then(|record| record.activity),
                }
            }
        }
    };

    EditorView {
        editable,
        login_button,
        callout,
        status: StatusView {
            text: state.status.text,
            active: state.status.active,
        },
        panel,
        login_modal_open: state.login.open,
        login_error: state.login.error,
    }
}

pub fn cell(state: &EditorState, slot: SlotId) -> CellView {
    CellView {
        slot,
        text: state.display_text(slot),
        activity: state.schedule.get(&slot).and_then(|record| record.activity),
        selected: state.selection == Some(slot),
        locked: !state.can_edit(),
    }
}

/// All 126 cells in day-major order.
pub fn cells(state: &EditorState) -> impl Iterator<Item = CellView> + '_ {
    SlotId::all().map(move |slot| cell(state, slot))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Day, SessionToken, SlotRecord, TimeSlot};
    use crate::editor::{transition, EditorEvent};

    fn state(server_available: bool, authenticated: bool) -> EditorState {
        let mut state = EditorState::new();
        state.loaded = true;
        state.auth.server_available = server_available;
        state.auth.authenticated = authenticated;
        state.auth.token = authenticated.then(|| SessionToken::new("t"));
        state
    }

    #[test]
    fn three_ui_states() {
        let offline = project(&state(false, false));
        assert!(!offline.editable);
        assert!(!offline.login_button.enabled);
        assert_eq!(offline.panel, PanelView::Locked(messages::SERVER_REQUIRED));
        assert_eq!(offline.callout.text, messages::SERVER_REQUIRED);

        // Authenticated but offline is still locked.
        assert!(!project(&state(false, true)).editable);

        let locked = project(&state(true, false));
        assert!(!locked.editable);
        assert_eq!(locked.login_button.label, messages::LOGIN_BUTTON_LOGIN);
        assert_eq!(locked.panel, PanelView::Locked(messages::EDITOR_LOCKED));

        let unlocked = project(&state(true, true));
        assert!(unlocked.editable);
        assert_eq!(unlocked.login_button.label, messages::LOGIN_BUTTON_LOGOUT);
        assert_eq!(unlocked.panel, PanelView::Empty(messages::EDITOR_EMPTY));
    }

    #[test]
    fn panel_and_cells_show_the_selected_slot() {
        let slot = SlotId::new(Day::Mon, TimeSlot::new(9).unwrap());
        let mut state = state(true, true);
        state
            .schedule
            .set_slot(slot, SlotRecord::new("Math", Some(Activity::Study)));
        state.selection = Some(slot);

        match project(&state).panel {
            PanelView::Slot {
                label,
                text,
                activity,
                ..
            } => {
                assert_eq!(label, "Mandag kl. 09:00");
                assert_eq!(text, "Math");
                assert_eq!(activity, Some(Activity::Study));
            }
            other => panic!("unexpected panel: {other:?}"),
        }

        let all: Vec<CellView> = cells(&state).collect();
        assert_eq!(all.len(), 126);
        assert_eq!(all.iter().filter(|cell| cell.selected).count(), 1);
        assert!(all.iter().all(|cell| !cell.locked));
    }

    #[test]
    fn typed_text_is_shown_untrimmed_while_the_stored_text_is_trimmed() {
        let slot = SlotId::new(Day::Wed, TimeSlot::new(10).unwrap());
        let (state, _) = [
            EditorEvent::SlotFocused(slot),
            EditorEvent::EditorTextInput("Math ".into()),
        ]
        .into_iter()
        .fold((state(true, true), Vec::new()), |(state, _), event| transition(state, event));

        assert_eq!(state.schedule.get(&slot).map(|r| r.text.as_str()), Some("Math"));
        match project(&state).panel {
            PanelView::Slot { text, .. } => assert_eq!(text, "Math "),
            other => panic!("unexpected panel: {other:?}"),
        }
        assert_eq!(cell(&state, slot).text, "Math ");

        // Typing on continues from the raw text.
        let (state, _) = transition(state, EditorEvent::EditorTextInput("Math c ".into()));
        assert_eq!(cell(&state, slot).text, "Math c ");

        // Moving to another slot drops the draft; the stored form remains.
        let other = SlotId::new(Day::Wed, TimeSlot::new(11).unwrap());
        let (state, _) = transition(state, EditorEvent::SlotFocused(other));
        assert_eq!(cell(&state, slot).text, "Math c");
        assert!(state.draft.is_none());
    }
}
