pub mod domain;
pub mod editor;
pub mod messages;
pub mod ports;

pub use domain::{Activity, Day, ScheduleDocument, SessionToken, SlotId, SlotRecord, TimeSlot};
pub use ports::{PlannerBackend, PortError, PortResult, ScheduleStore, SessionStore};
