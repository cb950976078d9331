pub mod http_backend;
pub mod schedule_file;
pub mod session_memory;

pub use http_backend::HttpPlannerBackend;
pub use schedule_file::FileScheduleStore;
pub use session_memory::{AdminCredential, InMemorySessionStore};
