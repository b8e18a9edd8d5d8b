//! Core types for sift
//!
//! This crate defines the foundational types used throughout the system:
//! - RecordId, Record, NewRecord: The searchable record model
//! - Priority, Status: Categorical record attributes
//! - Selection, FilterSet: "All"-or-one filter selections
//! - ResultView, SearchStats: What the search core hands to a renderer
//! - IndexLimits: Posting budget for index rebuilds
//! - Error: Error type

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod error;
pub mod filter;
pub mod limits;
pub mod search_types;
pub mod types;

pub use error::{Error, Result};
pub use filter::{FilterSet, Selection};
pub use limits::{IndexLimits, DEFAULT_MAX_POSTINGS, MIN_FRAGMENT_LEN};
pub use search_types::{ResultView, SearchStats};
pub use types::{IdSet, NewRecord, Priority, Record, RecordId, Status};
