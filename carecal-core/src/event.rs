//! Event types for the care calendar.
//!
//! An [`Event`] is one concrete entry on the calendar: a single appointment,
//! or one occurrence generated from a medication schedule. What callers submit
//! to the store is an [`EventInput`]: either a single-event draft or a
//! recurring [`MedicationTemplate`] that gets expanded into occurrences.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::profile::ProfileId;

/// Unique id of a stored event.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EventId(pub String);

impl EventId {
    pub fn generate() -> Self {
        EventId(uuid::Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EventId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for EventId {
    fn from(s: &str) -> Self {
        EventId(s.to_string())
    }
}

/// Id shared by every occurrence generated from one template submission.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LineageId(pub String);

impl LineageId {
    pub fn generate() -> Self {
        LineageId(uuid::Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for LineageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for LineageId {
    fn from(s: &str) -> Self {
        LineageId(s.to_string())
    }
}

/// Naive local time of day, ordered by minutes since midnight.
///
/// Parses and prints as zero-padded 24-hour "HH:MM".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TimeOfDay {
    minutes: u16,
}

impl TimeOfDay {
    pub fn from_hm(hour: u8, minute: u8) -> Option<Self> {
        if hour > 23 || minute > 59 {
            return None;
        }
        Some(TimeOfDay {
            minutes: hour as u16 * 60 + minute as u16,
        })
    }

    pub fn hour(&self) -> u8 {
        (self.minutes / 60) as u8
    }

    pub fn minute(&self) -> u8 {
        (self.minutes % 60) as u8
    }

    pub fn minutes_since_midnight(&self) -> u16 {
        self.minutes
    }
}

impl FromStr for TimeOfDay {
    type Err = ValidationError;

    /// Accepts "HH:MM" and "H:MM".
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ValidationError::InvalidTime(s.to_string());
        let trimmed = s.trim();

        let (h, m) = trimmed.split_once(':').ok_or_else(invalid)?;
        if h.is_empty() || h.len() > 2 || m.len() != 2 {
            return Err(invalid());
        }
        if !h.bytes().chain(m.bytes()).all(|b| b.is_ascii_digit()) {
            return Err(invalid());
        }

        let hour: u8 = h.parse().map_err(|_| invalid())?;
        let minute: u8 = m.parse().map_err(|_| invalid())?;
        TimeOfDay::from_hm(hour, minute).ok_or_else(invalid)
    }
}

impl TryFrom<String> for TimeOfDay {
    type Error = ValidationError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<TimeOfDay> for String {
    fn from(t: TimeOfDay) -> Self {
        t.to_string()
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour(), self.minute())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventKind {
    #[default]
    Appointment,
    Medical,
    Medication,
}

impl EventKind {
    pub const ALL: [EventKind; 3] = [
        EventKind::Appointment,
        EventKind::Medical,
        EventKind::Medication,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            EventKind::Appointment => "appointment",
            EventKind::Medical => "medical",
            EventKind::Medication => "medication",
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EventKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        EventKind::ALL
            .into_iter()
            .find(|k| k.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| {
                format!("Unknown event type '{s}'. Expected appointment, medical or medication")
            })
    }
}

/// How often a medication is taken.
///
/// Informational only: schedules are always expanded one calendar day at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Frequency {
    #[default]
    Daily,
    Weekly,
    Monthly,
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Frequency::Daily => write!(f, "daily"),
            Frequency::Weekly => write!(f, "weekly"),
            Frequency::Monthly => write!(f, "monthly"),
        }
    }
}

impl FromStr for Frequency {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "daily" => Ok(Frequency::Daily),
            "weekly" => Ok(Frequency::Weekly),
            "monthly" => Ok(Frequency::Monthly),
            _ => Err(format!(
                "Unknown frequency '{s}'. Expected daily, weekly or monthly"
            )),
        }
    }
}

/// Where a stored event came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "origin", rename_all = "snake_case")]
pub enum Origin {
    /// Created directly as a one-off event
    Single,
    /// Generated from a medication schedule
    Occurrence {
        parent_id: LineageId,
        /// Days after the schedule's start date
        day_index: u32,
        /// Position of this occurrence's time in the schedule's time list
        time_index: usize,
        #[serde(default)]
        frequency: Frequency,
    },
}

/// A concrete, stored calendar event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    pub id: EventId,
    pub title: String,
    pub date: NaiveDate,
    pub time: TimeOfDay,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub kind: EventKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile_id: Option<ProfileId>,
    #[serde(flatten)]
    pub origin: Origin,
}

impl Event {
    pub fn is_recurring(&self) -> bool {
        matches!(self.origin, Origin::Occurrence { .. })
    }

    pub fn parent_id(&self) -> Option<&LineageId> {
        match &self.origin {
            Origin::Single => None,
            Origin::Occurrence { parent_id, .. } => Some(parent_id),
        }
    }

    /// Sort key used when ranking events chronologically.
    pub fn starts_at(&self) -> (NaiveDate, TimeOfDay) {
        (self.date, self.time)
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.title)
    }
}

/// User-supplied fields for a one-off event.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventDraft {
    pub title: String,
    pub date: Option<NaiveDate>,
    pub time: Option<TimeOfDay>,
    pub location: Option<String>,
    pub description: Option<String>,
    pub kind: EventKind,
    pub profile_id: Option<ProfileId>,
}

impl EventDraft {
    /// Pre-fill a draft from an existing event (used when editing).
    pub fn from_event(event: &Event) -> Self {
        EventDraft {
            title: event.title.clone(),
            date: Some(event.date),
            time: Some(event.time),
            location: event.location.clone(),
            description: event.description.clone(),
            kind: event.kind,
            profile_id: event.profile_id.clone(),
        }
    }
}

/// A recurring medication reminder before expansion into occurrences.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MedicationTemplate {
    pub title: String,
    pub start_date: Option<NaiveDate>,
    pub frequency: Frequency,
    pub duration_days: u32,
    /// Reminder times in the order they were entered. Blank entries are ignored.
    pub times: Vec<String>,
    pub location: Option<String>,
    pub description: Option<String>,
    pub profile_id: Option<ProfileId>,
}

impl Default for MedicationTemplate {
    fn default() -> Self {
        MedicationTemplate {
            title: String::new(),
            start_date: None,
            frequency: Frequency::Daily,
            duration_days: 1,
            times: vec!["08:00".to_string()],
            location: None,
            description: None,
            profile_id: None,
        }
    }
}

/// What a caller submits to [`EventStore::save`](crate::store::EventStore::save).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventInput {
    Single(EventDraft),
    Recurring(MedicationTemplate),
}

impl EventInput {
    pub fn title(&self) -> &str {
        match self {
            EventInput::Single(draft) => &draft.title,
            EventInput::Recurring(template) => &template.title,
        }
    }

    pub fn profile_id(&self) -> Option<&ProfileId> {
        match self {
            EventInput::Single(draft) => draft.profile_id.as_ref(),
            EventInput::Recurring(template) => template.profile_id.as_ref(),
        }
    }
}

impl From<EventDraft> for EventInput {
    fn from(draft: EventDraft) -> Self {
        EventInput::Single(draft)
    }
}

impl From<MedicationTemplate> for EventInput {
    fn from(template: MedicationTemplate) -> Self {
        EventInput::Recurring(template)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn time_of_day_parses_padded_and_unpadded() {
        assert_eq!("08:00".parse::<TimeOfDay>().unwrap(), TimeOfDay::from_hm(8, 0).unwrap());
        assert_eq!("8:05".parse::<TimeOfDay>().unwrap(), TimeOfDay::from_hm(8, 5).unwrap());
        assert_eq!(" 23:59 ".parse::<TimeOfDay>().unwrap().minutes_since_midnight(), 1439);
    }

    #[test]
    fn time_of_day_rejects_garbage() {
        for bad in ["", "24:00", "12:60", "1200", "12:5", "ab:cd", "-1:00", "123:00"] {
            assert_eq!(
                bad.parse::<TimeOfDay>(),
                Err(ValidationError::InvalidTime(bad.to_string())),
                "{bad:?} should be rejected"
            );
        }
    }

    #[test]
    fn time_of_day_displays_zero_padded() {
        assert_eq!(TimeOfDay::from_hm(7, 5).unwrap().to_string(), "07:05");
        assert_eq!("9:30".parse::<TimeOfDay>().unwrap().to_string(), "09:30");
    }

    #[test]
    fn time_of_day_orders_by_minutes() {
        let early: TimeOfDay = "08:00".parse().unwrap();
        let late: TimeOfDay = "10:00".parse().unwrap();
        assert!(early < late);
    }

    #[test]
    fn event_kind_parses_case_insensitively() {
        assert_eq!("Medical".parse::<EventKind>().unwrap(), EventKind::Medical);
        assert_eq!("medication".parse::<EventKind>().unwrap(), EventKind::Medication);
        assert!("surgery".parse::<EventKind>().is_err());
    }

    #[test]
    fn event_serializes_origin_inline() {
        let event = Event {
            id: EventId::from("abc-0-1"),
            title: "Metformin".to_string(),
            date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            time: "20:00".parse().unwrap(),
            location: None,
            description: None,
            kind: EventKind::Medication,
            profile_id: None,
            origin: Origin::Occurrence {
                parent_id: LineageId::from("abc"),
                day_index: 0,
                time_index: 1,
                frequency: Frequency::Weekly,
            },
        };

        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["time"], "20:00");
        assert_eq!(json["kind"], "medication");
        assert_eq!(json["origin"], "occurrence");
        assert_eq!(json["parent_id"], "abc");

        let back: Event = serde_json::from_value(json).unwrap();
        assert_eq!(back, event);
        assert!(back.is_recurring());
    }
}
