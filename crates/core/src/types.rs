//! Core types for sift
//!
//! This module defines the record data model:
//! - RecordId: Unique, never-reused record identifier
//! - Priority / Status: Categorical record attributes
//! - Record: Immutable-by-replacement text record
//! - NewRecord: Validated creation payload
//! - IdSet: Set of record ids produced by the query engine

use chrono::{DateTime, Utc};
use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};

/// Set of record ids produced by a query
pub type IdSet = FxHashSet<RecordId>;

/// Unique identifier for a record
///
/// Assigned by the record store at creation time and never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(u64);

impl RecordId {
    /// Wrap a raw id
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// Raw numeric value
    pub const fn as_u64(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for RecordId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        s.trim()
            .parse::<u64>()
            .map(RecordId)
            .map_err(|_| Error::invalid_input(format!("'{}' is not a record id", s)))
    }
}

// ============================================================================
// Priority
// ============================================================================

/// Record priority
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Priority {
    /// Low priority (default for new records)
    #[default]
    Low,
    /// Medium priority
    Medium,
    /// High priority
    High,
}

impl Priority {
    /// All priorities in display order
    pub const ALL: [Priority; 3] = [Priority::Low, Priority::Medium, Priority::High];

    /// Capitalised label ("Low", "Medium", "High")
    pub const fn as_str(&self) -> &'static str {
        match self {
            Priority::Low => "Low",
            Priority::Medium => "Medium",
            Priority::High => "High",
        }
    }

    /// Lowercase label, indexed as a whole key for every record
    pub const fn label(&self) -> &'static str {
        match self {
            Priority::Low => "low",
            Priority::Medium => "medium",
            Priority::High => "high",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Priority {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let wanted = s.trim();
        Priority::ALL
            .into_iter()
            .find(|p| p.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| {
                Error::invalid_input(format!(
                    "unknown priority '{}', expected Low, Medium or High",
                    s
                ))
            })
    }
}

// ============================================================================
// Status
// ============================================================================

/// Record status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Status {
    /// Open (default for new records)
    #[default]
    Open,
    /// Closed
    Closed,
}

impl Status {
    /// All statuses in display order
    pub const ALL: [Status; 2] = [Status::Open, Status::Closed];

    /// Capitalised label ("Open", "Closed")
    pub const fn as_str(&self) -> &'static str {
        match self {
            Status::Open => "Open",
            Status::Closed => "Closed",
        }
    }

    /// Lowercase label, indexed as a whole key for every record
    pub const fn label(&self) -> &'static str {
        match self {
            Status::Open => "open",
            Status::Closed => "closed",
        }
    }

    /// The opposite status
    pub const fn toggled(&self) -> Status {
        match self {
            Status::Open => Status::Closed,
            Status::Closed => Status::Open,
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Status {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let wanted = s.trim();
        Status::ALL
            .into_iter()
            .find(|st| st.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| {
                Error::invalid_input(format!("unknown status '{}', expected Open or Closed", s))
            })
    }
}

// ============================================================================
// Record
// ============================================================================

/// A searchable text record
///
/// Records are owned by the record store. Updates replace the whole record;
/// the search core only ever reads snapshots.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    /// Store-assigned identifier
    pub id: RecordId,
    /// Short summary
    pub title: String,
    /// Free-text body
    pub description: String,
    /// Priority category
    pub priority: Priority,
    /// Status category
    pub status: Status,
    /// Creation time
    pub created_at: DateTime<Utc>,
}

impl Record {
    /// Copy of this record with the status flipped
    pub fn with_status_toggled(&self) -> Record {
        Record {
            status: self.status.toggled(),
            ..self.clone()
        }
    }
}

/// Creation payload for a record
///
/// Title and description are trimmed and must be non-empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewRecord {
    title: String,
    description: String,
    priority: Priority,
    status: Status,
}

impl NewRecord {
    /// Validate and build a payload with default priority and status
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` if the title or description is blank.
    pub fn new(title: impl AsRef<str>, description: impl AsRef<str>) -> Result<Self> {
        let title = title.as_ref().trim();
        let description = description.as_ref().trim();
        if title.is_empty() {
            return Err(Error::invalid_input("title is required"));
        }
        if description.is_empty() {
            return Err(Error::invalid_input("description is required"));
        }
        Ok(NewRecord {
            title: title.to_string(),
            description: description.to_string(),
            priority: Priority::default(),
            status: Status::default(),
        })
    }

    /// Builder: set priority
    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    /// Builder: set status
    pub fn with_status(mut self, status: Status) -> Self {
        self.status = status;
        self
    }

    /// Materialise into a record with the given id and timestamp
    pub fn into_record(self, id: RecordId, created_at: DateTime<Utc>) -> Record {
        Record {
            id,
            title: self.title,
            description: self.description,
            priority: self.priority,
            status: self.status,
            created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_id_display_and_parse() {
        let id = RecordId::new(1042);
        assert_eq!(id.to_string(), "1042");
        assert_eq!("1042".parse::<RecordId>().unwrap(), id);
        assert!("abc".parse::<RecordId>().is_err());
    }

    #[test]
    fn test_priority_labels() {
        assert_eq!(Priority::High.as_str(), "High");
        assert_eq!(Priority::High.label(), "high");
        assert_eq!(Priority::Medium.to_string(), "Medium");
    }

    #[test]
    fn test_priority_parse_case_insensitive() {
        assert_eq!("low".parse::<Priority>().unwrap(), Priority::Low);
        assert_eq!("MEDIUM".parse::<Priority>().unwrap(), Priority::Medium);
        assert_eq!(" High ".parse::<Priority>().unwrap(), Priority::High);
        assert!("urgent".parse::<Priority>().is_err());
    }

    #[test]
    fn test_status_toggle() {
        assert_eq!(Status::Open.toggled(), Status::Closed);
        assert_eq!(Status::Closed.toggled(), Status::Open);
        assert_eq!("closed".parse::<Status>().unwrap(), Status::Closed);
    }

    #[test]
    fn test_new_record_trims_and_validates() {
        let rec = NewRecord::new("  Login error ", "\tcannot sign in\n").unwrap();
        let record = rec.into_record(RecordId::new(1), Utc::now());
        assert_eq!(record.title, "Login error");
        assert_eq!(record.description, "cannot sign in");
        assert_eq!(record.priority, Priority::Low);
        assert_eq!(record.status, Status::Open);

        assert!(matches!(
            NewRecord::new("   ", "body"),
            Err(Error::InvalidInput(_))
        ));
        assert!(matches!(
            NewRecord::new("title", ""),
            Err(Error::InvalidInput(_))
        ));
    }

    #[test]
    fn test_record_toggle_is_a_copy() {
        let original = NewRecord::new("t", "d")
            .unwrap()
            .with_priority(Priority::High)
            .into_record(RecordId::new(7), Utc::now());
        let toggled = original.with_status_toggled();
        assert_eq!(original.status, Status::Open);
        assert_eq!(toggled.status, Status::Closed);
        assert_eq!(toggled.id, original.id);
        assert_eq!(toggled.priority, Priority::High);
    }

    #[test]
    fn test_record_serde_uses_capitalised_labels() {
        let record = NewRecord::new("t", "d")
            .unwrap()
            .with_priority(Priority::Medium)
            .with_status(Status::Closed)
            .into_record(RecordId::new(3), Utc::now());
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["id"], 3);
        assert_eq!(json["priority"], "Medium");
        assert_eq!(json["status"], "Closed");
    }
}
