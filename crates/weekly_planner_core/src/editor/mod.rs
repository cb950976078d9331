//! crates/weekly_planner_core/src/editor/mod.rs
//!
//! The client-side editor: explicit state, a pure transition function and a pure
//! view projection. A runtime drives it by feeding events in and executing effects.

pub mod event;
pub mod machine;
pub mod state;
pub mod view;

pub use event::{EditorEvent, Effect};
pub use machine::{transition, NUDGE_DELAY, STATUS_FLASH_DELAY};
pub use state::{AuthState, EditorState};
pub use view::{project, EditorView, PanelView};
