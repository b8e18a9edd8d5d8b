//! Categorical filter selections
//!
//! A filter control is either "All" or one concrete category value.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::Error;
use crate::types::{Priority, Record, Status};

/// A filter selection: everything, or exactly one value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Selection<T> {
    /// No restriction
    #[default]
    All,
    /// Keep only records with this value
    Only(T),
}

impl<T: PartialEq> Selection<T> {
    /// Whether a value passes this selection
    pub fn matches(&self, value: &T) -> bool {
        match self {
            Selection::All => true,
            Selection::Only(wanted) => wanted == value,
        }
    }

    /// Whether this selection restricts anything
    pub fn is_all(&self) -> bool {
        matches!(self, Selection::All)
    }
}

impl<T: fmt::Display> fmt::Display for Selection<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Selection::All => f.write_str("All"),
            Selection::Only(value) => value.fmt(f),
        }
    }
}

impl<T> FromStr for Selection<T>
where
    T: FromStr<Err = Error>,
{
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("all") {
            Ok(Selection::All)
        } else {
            s.parse::<T>().map(Selection::Only)
        }
    }
}

impl<T> From<T> for Selection<T> {
    fn from(value: T) -> Self {
        Selection::Only(value)
    }
}

/// The active priority and status selections
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct FilterSet {
    /// Priority selection
    pub priority: Selection<Priority>,
    /// Status selection
    pub status: Selection<Status>,
}

impl FilterSet {
    /// Build a filter set from both selections
    pub fn new(priority: Selection<Priority>, status: Selection<Status>) -> Self {
        FilterSet { priority, status }
    }

    /// Whether a record passes both selections
    pub fn matches(&self, record: &Record) -> bool {
        self.priority.matches(&record.priority) && self.status.matches(&record.status)
    }
}
