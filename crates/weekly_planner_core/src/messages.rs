//! crates/weekly_planner_core/src/messages.rs
//!
//! User-facing strings. The planner UI is Danish.

// --- Status pill baselines ---
pub const STATUS_VIEW_ONLY: &str = "Kun visning";
pub const STATUS_NEEDS_LOGIN: &str = "Login for at redigere";
pub const STATUS_AUTOSAVE: &str = "Gemmes automatisk";

// --- Flash messages ---
pub const CHANGES_SAVED: &str = "Ændringer gemt";
pub const SLOT_CLEARED: &str = "Felt ryddet";
pub const SCHEDULE_CLEARED: &str = "Skema ryddet";
pub const LOGIN_ACTIVATED: &str = "Admin login aktiveret";
pub const LOGGED_OUT: &str = "Visning uden redigering";
pub const SAVE_FAILED: &str = "Kunne ikke gemme (server)";

// --- Login button ---
pub const LOGIN_BUTTON_VIEW_ONLY: &str = "Kun visning";
pub const LOGIN_BUTTON_LOGIN: &str = "Log ind";
pub const LOGIN_BUTTON_LOGOUT: &str = "Log ud";

// --- Callout and editor panel ---
pub const CALLOUT_LOGIN: &str = "Log ind for at redigere skemaet.";
pub const SERVER_REQUIRED: &str = "Start serveren lokalt for at redigere skemaet.";
pub const EDITOR_LOCKED: &str = "Log ind i admin-tilstand for at redigere skemaet.";
pub const EDITOR_EMPTY: &str = "Vælg et felt i skemaet for at redigere det.";

// --- Login form ---
pub const LOGIN_WRONG_CREDENTIALS: &str = "Forkert brugernavn eller adgangskode.";
pub const LOGIN_SERVER_DOWN: &str = "Serveren svarer ikke.";

// --- HTTP API error bodies ---
pub const API_INVALID_CREDENTIALS: &str = "Ugyldige login-oplysninger";
pub const API_LOGIN_REQUIRED: &str = "Login kræves";
pub const API_INVALID_PAYLOAD: &str = "Ugyldigt dataformat";
pub const API_SAVE_FAILED: &str = "Kunne ikke gemme skemaet";
pub const API_LOAD_FAILED: &str = "Kunne ikke indlæse skemaet";
pub const API_PAYLOAD_TOO_LARGE: &str = "Data er for stor";
