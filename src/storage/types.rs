//! Core data types for the Punchclock attendance store
//!
//! This module defines the records persisted by the storage layer:
//! - `Card`: A registered reader card and the person it belongs to
//! - `Punch`: A single attendance event for a card
//! - `PunchStatus`: What a punch records (arrival, departure or a leave)
//! - `PunchLogEntry`: A punch joined with its card for display

use chrono::Utc;
use serde::{Deserialize, Serialize};

/// Status recorded when a card is leave-scanned without a leave kind
pub const UNKNOWN_LEAVE: &str = "leave_type.unknown";

/// Current time as Unix milliseconds
pub fn now_millis() -> i64 {
    Utc::now().timestamp_millis()
}

/// Render a reader UID as lowercase colon-separated hex (`ab:ba:de:da`)
pub fn card_number_from_uid(uid: &[u8]) -> String {
    uid.iter()
        .map(|b| format!("{:02x}", b))
        .collect::<Vec<_>>()
        .join(":")
}

/// A registered card
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Card {
    pub id: i64,
    /// Reader UID rendered with [`card_number_from_uid`]
    pub card_number: String,
    /// Free-form label for the card itself
    pub card_name: Option<String>,
    /// Name of the card holder
    pub user_fullname: Option<String>,
    /// External identifier of the card holder
    pub user_id: Option<String>,
    /// Whether the holder is currently clocked in
    pub is_present: bool,
    /// Unix timestamp in milliseconds
    pub created_at: i64,
    /// Unix timestamp in milliseconds
    pub updated_at: i64,
}

/// Editable holder information of a card
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct CardUpdate {
    #[serde(default)]
    pub card_name: Option<String>,
    #[serde(default)]
    pub user_fullname: Option<String>,
    #[serde(default)]
    pub user_id: Option<String>,
}

/// What a punch records
///
/// Stored as text: `In`, `Out`, or the leave kind itself (a message key such
/// as `leave_type.sick` the frontend translates).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(into = "String", from = "String")]
pub enum PunchStatus {
    In,
    Out,
    Leave(String),
}

impl PunchStatus {
    /// Leave punch, using [`UNKNOWN_LEAVE`] when no kind was given
    pub fn leave(kind: Option<&str>) -> Self {
        match kind.map(str::trim) {
            Some(kind) if !kind.is_empty() => PunchStatus::Leave(kind.to_string()),
            _ => PunchStatus::Leave(UNKNOWN_LEAVE.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            PunchStatus::In => "In",
            PunchStatus::Out => "Out",
            PunchStatus::Leave(kind) => kind,
        }
    }

    pub fn is_leave(&self) -> bool {
        matches!(self, PunchStatus::Leave(_))
    }
}

impl From<String> for PunchStatus {
    fn from(s: String) -> Self {
        match s.as_str() {
            "In" => PunchStatus::In,
            "Out" => PunchStatus::Out,
            _ => PunchStatus::Leave(s),
        }
    }
}

impl From<PunchStatus> for String {
    fn from(status: PunchStatus) -> Self {
        match status {
            PunchStatus::Leave(kind) => kind,
            other => other.as_str().to_string(),
        }
    }
}

impl std::fmt::Display for PunchStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single attendance event
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Punch {
    pub id: i64,
    pub card_id: i64,
    pub status: PunchStatus,
    /// Unix timestamp in milliseconds
    pub timestamp: i64,
}

impl Punch {
    /// Milliseconds elapsed between this punch and `now`
    pub fn age_ms(&self, now: i64) -> i64 {
        now - self.timestamp
    }
}

/// A punch joined with the card it belongs to
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PunchLogEntry {
    pub id: i64,
    pub card_number: String,
    pub card_name: Option<String>,
    pub user_fullname: Option<String>,
    pub status: PunchStatus,
    /// Unix timestamp in milliseconds
    pub timestamp: i64,
}
