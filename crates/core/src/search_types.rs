//! Core search output types
//!
//! This module defines what the search core hands back to a renderer:
//! - ResultView: The windowed slice plus "showing X of Y" counts
//! - SearchStats: Execution statistics for debugging/monitoring

use serde::Serialize;

use crate::filter::FilterSet;
use crate::types::Record;

// ============================================================================
// SearchStats
// ============================================================================

/// Execution statistics for the current view
///
/// Provides metadata about how the current result was produced,
/// useful for debugging and monitoring.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SearchStats {
    /// Record-set generation the index was built from
    pub index_generation: u64,

    /// Distinct fragments in the index
    pub fragments: usize,

    /// Total (fragment, id) postings in the index
    pub postings: usize,

    /// Ids matched by the query before categorical filtering
    pub candidates: usize,
}

impl SearchStats {
    /// Create new SearchStats
    pub fn new(index_generation: u64, fragments: usize, postings: usize) -> Self {
        SearchStats {
            index_generation,
            fragments,
            postings,
            candidates: 0,
        }
    }

    /// Builder: set candidate count
    pub fn with_candidates(mut self, candidates: usize) -> Self {
        self.candidates = candidates;
        self
    }
}

// ============================================================================
// ResultView
// ============================================================================

/// The windowed, filtered, searched result handed to a renderer
///
/// # Invariant
///
/// `records.len() <= total_matched`, and `has_more` is exactly
/// `records.len() < total_matched`.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ResultView {
    /// Visible prefix of the filtered result, in canonical record order
    pub records: Vec<Record>,

    /// Number of records that passed search and filters (pre-window)
    pub total_matched: usize,

    /// Whether further pages remain
    pub has_more: bool,

    /// Current page (1-based)
    pub page: usize,

    /// Debounced query that produced this view
    pub query: String,

    /// Filter selections that produced this view
    #[serde(skip)]
    pub filters: FilterSet,

    /// Execution statistics
    pub stats: SearchStats,
}

impl ResultView {
    /// Number of visible records
    pub fn visible(&self) -> usize {
        self.records.len()
    }

    /// Check if nothing is visible
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// "Showing X / Y results"
    pub fn summary(&self) -> String {
        format!(
            "Showing {} / {} results",
            self.records.len(),
            self.total_matched
        )
    }
}
