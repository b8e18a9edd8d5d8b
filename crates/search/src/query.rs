//! Query engine
//!
//! Boolean AND over substring lookups. A query matches a record when every
//! query token is a fragment indexed for that record. There is no scoring;
//! ordering is imposed later by the record collection.
//!
//! Degenerate inputs are policies, not errors:
//! - blank query: every id (no search means show everything)
//! - query with no tokens (pure punctuation): no ids
//! - any token missing from the index: no ids

use crate::index::SubstringIndex;
use crate::tokenizer::tokenize_unique;
use sift_core::IdSet;

/// A parsed query
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Query {
    /// Blank input: matches the whole universe
    All,
    /// Non-blank input that produced no tokens: matches nothing
    Nothing,
    /// Deduplicated lowercase tokens, all of which must match
    Terms(Vec<String>),
}

impl Query {
    /// Parse raw query text
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Query::All;
        }
        let terms = tokenize_unique(trimmed);
        if terms.is_empty() {
            Query::Nothing
        } else {
            Query::Terms(terms)
        }
    }

    /// Evaluate against an index
    ///
    /// `all_ids` is the universe returned for a blank query.
    pub fn evaluate(&self, index: &SubstringIndex, all_ids: &IdSet) -> IdSet {
        match self {
            Query::All => all_ids.clone(),
            Query::Nothing => IdSet::default(),
            Query::Terms(terms) => intersect_terms(terms, index),
        }
    }
}

/// Ids of records matching every token of `query`
///
/// # Example
///
/// ```
/// use sift_core::IdSet;
/// use sift_search::{search, SubstringIndex};
///
/// let index = SubstringIndex::new();
/// let all = IdSet::default();
/// assert!(search("anything", &index, &all).is_empty());
/// ```
pub fn search(query: &str, index: &SubstringIndex, all_ids: &IdSet) -> IdSet {
    Query::parse(query).evaluate(index, all_ids)
}

fn intersect_terms(terms: &[String], index: &SubstringIndex) -> IdSet {
    let mut sets: Vec<&IdSet> = Vec::with_capacity(terms.len());
    for term in terms {
        match index.lookup(term) {
            Some(ids) => sets.push(ids),
            // strict AND: one unknown token empties the whole result
            None => return IdSet::default(),
        }
    }

    // Walk the smallest posting set and probe the rest; same result as a
    // left fold of pairwise intersections.
    sets.sort_by_key(|ids| ids.len());
    let Some((smallest, rest)) = sets.split_first() else {
        return IdSet::default();
    };
    smallest
        .iter()
        .filter(|id| rest.iter().all(|ids| ids.contains(*id)))
        .copied()
        .collect()
}
