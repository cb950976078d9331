//! crates/weekly_planner_core/src/domain.rs
//!
//! Defines the pure, core data structures of the planner: the fixed weekly grid,
//! the record stored in a slot, and the sparse schedule document that is persisted
//! as a single JSON blob.
//!
//! The slot key format (`"<day>_<HH:MM>"`) is the only durable wire contract, so the
//! serde implementations here are written by hand rather than derived.

use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

//=========================================================================================
// Parse Errors
//=========================================================================================

/// Raised when a wire value does not name a slot, day, time or activity of the grid.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseSlotError {
    #[error("unknown day: {0}")]
    Day(String),
    #[error("invalid time: {0}")]
    Time(String),
    #[error("invalid slot key: {0}")]
    Key(String),
    #[error("unknown activity: {0}")]
    Activity(String),
}

//=========================================================================================
// Grid Axes
//=========================================================================================

/// A day column of the weekly grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Day {
    Mon,
    Tue,
    Wed,
    Thu,
    Fri,
    Sat,
    Sun,
}

impl Day {
    pub const ALL: [Day; 7] = [
        Day::Mon,
        Day::Tue,
        Day::Wed,
        Day::Thu,
        Day::Fri,
        Day::Sat,
        Day::Sun,
    ];

    /// The code used inside slot keys.
    pub fn code(self) -> &'static str {
        match self {
            Day::Mon => "Mon",
            Day::Tue => "Tue",
            Day::Wed => "Wed",
            Day::Thu => "Thu",
            Day::Fri => "Fri",
            Day::Sat => "Sat",
            Day::Sun => "Sun",
        }
    }

    /// The localized name shown in the UI.
    pub fn label(self) -> &'static str {
        match self {
            Day::Mon => "Mandag",
            Day::Tue => "Tirsdag",
            Day::Wed => "Onsdag",
            Day::Thu => "Torsdag",
            Day::Fri => "Fredag",
            Day::Sat => "Lørdag",
            Day::Sun => "Søndag",
        }
    }
}

impl fmt::Display for Day {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Day {
    type Err = ParseSlotError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Day::ALL
            .into_iter()
            .find(|day| day.code() == s)
            .ok_or_else(|| ParseSlotError::Day(s.to_string()))
    }
}

/// An hourly row of the grid, 06:00 through 23:00.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimeSlot(u8);

impl TimeSlot {
    pub const FIRST_HOUR: u8 = 6;
    pub const LAST_HOUR: u8 = 23;

    /// Returns `None` for hours outside the grid.
    pub fn new(hour: u8) -> Option<Self> {
        (Self::FIRST_HOUR..=Self::LAST_HOUR)
            .contains(&hour)
            .then_some(Self(hour))
    }

    pub fn hour(self) -> u8 {
        self.0
    }

    pub fn all() -> impl Iterator<Item = TimeSlot> {
        (Self::FIRST_HOUR..=Self::LAST_HOUR).map(TimeSlot)
    }
}

impl fmt::Display for TimeSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:00", self.0)
    }
}

impl FromStr for TimeSlot {
    type Err = ParseSlotError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ParseSlotError::Time(s.to_string());
        let (hour, minutes) = s.split_once(':').ok_or_else(invalid)?;
        if hour.len() != 2 || minutes != "00" {
            return Err(invalid());
        }
        let hour = hour.parse::<u8>().map_err(|_| invalid())?;
        TimeSlot::new(hour).ok_or_else(invalid)
    }
}

//=========================================================================================
// Slot Identifier
//=========================================================================================

/// One (day, hour) cell of the grid. Ordered by day, then time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SlotId {
    pub day: Day,
    pub time: TimeSlot,
}

impl SlotId {
    pub fn new(day: Day, time: TimeSlot) -> Self {
        Self { day, time }
    }

    /// Every slot of the week, 126 in total.
    pub fn all() -> impl Iterator<Item = SlotId> {
        Day::ALL
            .into_iter()
            .flat_map(|day| TimeSlot::all().map(move |time| SlotId::new(day, time)))
    }

    /// Human readable label, e.g. `Mandag kl. 09:00`.
    pub fn label(&self) -> String {
        format!("{} kl. {}", self.day.label(), self.time)
    }
}

impl fmt::Display for SlotId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}_{}", self.day, self.time)
    }
}

impl FromStr for SlotId {
    type Err = ParseSlotError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (day, time) = s
            .split_once('_')
            .ok_or_else(|| ParseSlotError::Key(s.to_string()))?;
        Ok(SlotId::new(day.parse()?, time.parse()?))
    }
}

impl Serialize for SlotId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for SlotId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let key = String::deserialize(deserializer)?;
        key.parse().map_err(de::Error::custom)
    }
}

//=========================================================================================
// Slot Record
//=========================================================================================

/// The activity category a slot can be tagged with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Activity {
    Study,
    Exercise,
    Gaming,
    Social,
    Other,
}

impl Activity {
    pub const ALL: [Activity; 5] = [
        Activity::Study,
        Activity::Exercise,
        Activity::Gaming,
        Activity::Social,
        Activity::Other,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Activity::Study => "study",
            Activity::Exercise => "exercise",
            Activity::Gaming => "gaming",
            Activity::Social => "social",
            Activity::Other => "other",
        }
    }
}

impl FromStr for Activity {
    type Err = ParseSlotError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Activity::ALL
            .into_iter()
            .find(|activity| activity.as_str() == s)
            .ok_or_else(|| ParseSlotError::Activity(s.to_string()))
    }
}

/// The content of a single slot. An empty activity travels as `""` on the wire.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotRecord {
    #[serde(default)]
    pub text: String,
    #[serde(default, with = "activity_field")]
    pub activity: Option<Activity>,
}

impl SlotRecord {
    /// Builds a record, trimming surrounding whitespace from the text.
    pub fn new(text: impl AsRef<str>, activity: Option<Activity>) -> Self {
        Self {
            text: text.as_ref().trim().to_string(),
            activity,
        }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    /// A record with no text and no activity is never stored.
    pub fn is_empty(&self) -> bool {
        self.text.is_empty() && self.activity.is_none()
    }
}

mod activity_field {
    use super::Activity;
    use serde::{de, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(
        activity: &Option<Activity>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(activity.map(Activity::as_str).unwrap_or(""))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<Activity>, D::Error> {
        match Option::<String>::deserialize(deserializer)? {
            None => Ok(None),
            Some(value) if value.is_empty() => Ok(None),
            Some(value) => value.parse().map(Some).map_err(de::Error::custom),
        }
    }
}

//=========================================================================================
// Schedule Document
//=========================================================================================

/// The sparse mapping of slots to records; only non-empty slots are present.
///
/// Every way of building a document (insertion, iteration, deserialization) drops
/// empty records, so a document never carries placeholder entries.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ScheduleDocument {
    slots: BTreeMap<SlotId, SlotRecord>,
}

impl ScheduleDocument {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, id: &SlotId) -> Option<&SlotRecord> {
        self.slots.get(id)
    }

    /// Inserts or overwrites a slot; an empty record removes the slot instead.
    pub fn set_slot(&mut self, id: SlotId, record: SlotRecord) {
        if record.is_empty() {
            self.slots.remove(&id);
        } else {
            self.slots.insert(id, record);
        }
    }

    pub fn clear_slot(&mut self, id: SlotId) {
        self.set_slot(id, SlotRecord::empty());
    }

    pub fn clear_all(&mut self) {
        self.slots.clear();
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&SlotId, &SlotRecord)> {
        self.slots.iter()
    }
}

impl FromIterator<(SlotId, SlotRecord)> for ScheduleDocument {
    fn from_iter<I: IntoIterator<Item = (SlotId, SlotRecord)>>(iter: I) -> Self {
        let mut document = ScheduleDocument::new();
        for (id, record) in iter {
            document.set_slot(id, record);
        }
        document
    }
}

impl<'de> Deserialize<'de> for ScheduleDocument {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let slots = BTreeMap::<SlotId, SlotRecord>::deserialize(deserializer)?;
        Ok(slots.into_iter().collect())
    }
}

//=========================================================================================
// Session Token
//=========================================================================================

/// An opaque bearer token issued on a successful admin login.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionToken(String);

impl SessionToken {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SessionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
