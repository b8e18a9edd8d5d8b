//! Substring inverted index
//!
//! This module provides:
//! - SubstringIndex: fragment -> set of record ids
//! - Wholesale rebuild from a record snapshot
//! - Posting budget enforcement via `IndexLimits`
//!
//! # Contents
//!
//! For every record, the title and description are tokenized and
//! deduplicated. Every contiguous substring of length 2..=len of every token
//! is a key mapping to the record id. The lowercase priority and status
//! labels are added as whole keys, so "open" or "high" typed into the search
//! box reach the categorical fields.
//!
//! Cost is O(records × token_len²). That blow-up is what makes arbitrary
//! substring lookup a single hash probe.
//!
//! # Rebuild
//!
//! There is no incremental patching. A rebuild constructs a fresh index and
//! either returns it complete or returns an error; callers swap it in whole.

use crate::tokenizer::{fragments, tokenize};
use rustc_hash::{FxHashMap, FxHashSet};
use sift_core::{Error, IdSet, IndexLimits, Record, RecordId, Result};
use std::time::Instant;
use tracing::info;

// ============================================================================
// SubstringIndex
// ============================================================================

/// Inverted index from token fragment to record ids
///
/// Immutable once built. Share it behind an `Arc` and replace it wholesale
/// when the record set changes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubstringIndex {
    /// Fragment -> ids of records containing it
    postings: FxHashMap<String, IdSet>,
    /// Total (fragment, id) pairs
    posting_count: usize,
    /// Records the index was built from
    record_count: usize,
}

impl SubstringIndex {
    /// Create an empty index
    pub fn new() -> Self {
        Self::default()
    }

    /// Build an index over `records` with no posting cap
    pub fn build(records: &[Record]) -> Self {
        let mut builder = IndexBuilder::new(IndexLimits::unbounded());
        for record in records {
            // An unbounded budget never runs out
            let _ = builder.add_record(record);
        }
        builder.finish()
    }

    /// Build an index over `records`, failing if the posting budget is exceeded
    ///
    /// # Errors
    ///
    /// Returns `IndexCapacity` if the records produce more than
    /// `limits.max_postings` postings. Nothing partial is returned.
    pub fn build_with_limits(records: &[Record], limits: &IndexLimits) -> Result<Self> {
        let start = Instant::now();
        let mut builder = IndexBuilder::new(*limits);
        for record in records {
            builder.add_record(record)?;
        }
        let index = builder.finish();
        info!(
            records = index.record_count,
            fragments = index.fragment_count(),
            postings = index.posting_count,
            elapsed_micros = start.elapsed().as_micros() as u64,
            "Substring index rebuilt"
        );
        Ok(index)
    }

    // ========================================================================
    // Query
    // ========================================================================

    /// Ids of records containing `fragment`
    ///
    /// Returns None if the fragment was never indexed.
    pub fn lookup(&self, fragment: &str) -> Option<&IdSet> {
        self.postings.get(fragment)
    }

    /// Check whether a fragment is indexed
    pub fn contains(&self, fragment: &str) -> bool {
        self.postings.contains_key(fragment)
    }

    /// All indexed fragments (unordered)
    pub fn fragments(&self) -> impl Iterator<Item = &str> + '_ {
        self.postings.keys().map(String::as_str)
    }

    // ========================================================================
    // Statistics
    // ========================================================================

    /// Number of distinct fragments
    pub fn fragment_count(&self) -> usize {
        self.postings.len()
    }

    /// Total (fragment, id) postings
    pub fn posting_count(&self) -> usize {
        self.posting_count
    }

    /// Number of records indexed
    pub fn record_count(&self) -> usize {
        self.record_count
    }

    /// Check if nothing is indexed
    pub fn is_empty(&self) -> bool {
        self.postings.is_empty()
    }
}

/// Build an index over `records` with no posting cap
pub fn build_index(records: &[Record]) -> SubstringIndex {
    SubstringIndex::build(records)
}

// ============================================================================
// IndexBuilder
// ============================================================================

/// Accumulates postings for one rebuild
struct IndexBuilder {
    postings: FxHashMap<String, IdSet>,
    posting_count: usize,
    record_count: usize,
    limits: IndexLimits,
}

impl IndexBuilder {
    fn new(limits: IndexLimits) -> Self {
        IndexBuilder {
            postings: FxHashMap::default(),
            posting_count: 0,
            record_count: 0,
            limits,
        }
    }

    fn add_record(&mut self, record: &Record) -> Result<()> {
        let mut tokens: FxHashSet<String> = FxHashSet::default();
        tokens.extend(tokenize(&record.title));
        tokens.extend(tokenize(&record.description));

        for token in &tokens {
            for fragment in fragments(token) {
                self.insert(fragment, record.id)?;
            }
        }

        self.insert(record.priority.label(), record.id)?;
        self.insert(record.status.label(), record.id)?;
        self.record_count += 1;
        Ok(())
    }

    fn insert(&mut self, fragment: &str, id: RecordId) -> Result<()> {
        let inserted = match self.postings.get_mut(fragment) {
            Some(ids) => ids.insert(id),
            None => {
                let mut ids = IdSet::default();
                ids.insert(id);
                self.postings.insert(fragment.to_string(), ids);
                true
            }
        };
        if inserted {
            self.posting_count += 1;
            if self.posting_count > self.limits.max_postings {
                return Err(Error::IndexCapacity {
                    postings: self.posting_count,
                    max: self.limits.max_postings,
                });
            }
        }
        Ok(())
    }

    fn finish(self) -> SubstringIndex {
        SubstringIndex {
            postings: self.postings,
            posting_count: self.posting_count,
            record_count: self.record_count,
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
