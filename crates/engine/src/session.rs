//! Search session
//!
//! Composes the pipeline for one consumer:
//!
//! ```text
//! RecordSnapshot ──sync──▶ SubstringIndex (rebuilt per generation)
//! raw query ──Debouncer──▶ debounced query ─┐
//!                                           ├─▶ id set ─▶ filters ─▶ Window ─▶ ResultView
//! FilterSet ────────────────────────────────┘
//! LoadMoreSignal ─────────────────────────────────────────▶ Window
//! ```
//!
//! Each stage is memoized on the exact inputs it reads, so repeated `view()`
//! calls with nothing changed do no work, and a change to one input only
//! recomputes the stages downstream of it.
//!
//! Page resets to 1 whenever the debounced query or a filter selection
//! actually changes. A record-set change alone keeps the page.

use crate::debounce::{DebounceState, Debouncer, DEFAULT_DEBOUNCE};
use crate::store::RecordSnapshot;
use crate::visibility::{LoadMoreSignal, VisibilityProvider};
use crate::window::{Window, DEFAULT_PAGE_SIZE};
use sift_core::{
    FilterSet, IdSet, IndexLimits, Priority, Record, Result, ResultView, SearchStats, Selection,
    Status,
};
use sift_search::{apply_filters, Query, SubstringIndex};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, warn};

// ============================================================================
// SessionConfig
// ============================================================================

/// Tunables for a search session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionConfig {
    /// Records per page
    pub page_size: usize,
    /// Debounce delay for query input
    pub debounce: Duration,
    /// Posting budget per index rebuild
    pub limits: IndexLimits,
}

impl Default for SessionConfig {
    fn default() -> Self {
        SessionConfig {
            page_size: DEFAULT_PAGE_SIZE,
            debounce: DEFAULT_DEBOUNCE,
            limits: IndexLimits::default(),
        }
    }
}

/// What `sync` did with a snapshot
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndexSync {
    /// Same generation as last time; nothing rebuilt
    Unchanged,
    /// Index rebuilt for the new generation
    Rebuilt,
    /// Rebuild failed; the previous index stays live
    Retained,
}

// ============================================================================
// Memo slots
// ============================================================================

#[derive(Debug)]
struct Memo<K, V> {
    key: K,
    value: V,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct MatchKey {
    index_generation: u64,
    record_generation: u64,
    query: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct FilterKey {
    matches: MatchKey,
    filters: FilterSet,
}

#[derive(Debug)]
struct IndexSlot {
    /// Record generation the index was built from
    generation: u64,
    index: Arc<SubstringIndex>,
}

// ============================================================================
// SearchSession
// ============================================================================

/// Incrementally maintained search over a record snapshot
#[derive(Debug)]
pub struct SearchSession {
    debouncer: Debouncer<String>,
    filters: FilterSet,
    window: Window,
    limits: IndexLimits,
    signal: LoadMoreSignal,
    snapshot: Option<RecordSnapshot>,
    index: IndexSlot,
    matches: Option<Memo<MatchKey, Arc<IdSet>>>,
    filtered: Option<Memo<FilterKey, Arc<[Record]>>>,
    torn_down: bool,
}

impl SearchSession {
    /// Create a session with an empty record set and blank query
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` if `config.page_size` is zero.
    pub fn new(config: SessionConfig) -> Result<Self> {
        Ok(SearchSession {
            debouncer: Debouncer::new(String::new(), config.debounce),
            filters: FilterSet::default(),
            window: Window::new(config.page_size)?,
            limits: config.limits,
            signal: LoadMoreSignal::new(),
            snapshot: None,
            index: IndexSlot {
                generation: 0,
                index: Arc::new(SubstringIndex::new()),
            },
            matches: None,
            filtered: None,
            torn_down: false,
        })
    }

    // ========================================================================
    // Inputs
    // ========================================================================

    /// Point the session at a record snapshot
    ///
    /// Rebuilds the index only when the snapshot's generation differs from
    /// the last one seen. A failed rebuild keeps the previous index.
    pub fn sync(&mut self, snapshot: &RecordSnapshot) -> IndexSync {
        let generation = snapshot.generation();
        if self
            .snapshot
            .as_ref()
            .is_some_and(|s| s.generation() == generation)
        {
            return IndexSync::Unchanged;
        }
        self.snapshot = Some(snapshot.clone());

        match SubstringIndex::build_with_limits(snapshot.records(), &self.limits) {
            Ok(index) => {
                self.index = IndexSlot {
                    generation,
                    index: Arc::new(index),
                };
                IndexSync::Rebuilt
            }
            Err(e) => {
                warn!(
                    generation,
                    kept_generation = self.index.generation,
                    error = %e,
                    "Index rebuild rejected; keeping previous index"
                );
                IndexSync::Retained
            }
        }
    }

    /// Feed raw query input observed at `now`
    pub fn set_query(&mut self, raw: &str, now: Instant) {
        if self.torn_down {
            return;
        }
        self.debouncer.push(raw.to_string(), now);
    }

    /// Replace both filter selections
    ///
    /// Returns true (and resets to page 1) if the selections changed.
    pub fn set_filters(&mut self, filters: FilterSet) -> bool {
        if self.filters == filters {
            return false;
        }
        debug!(
            priority = %filters.priority,
            status = %filters.status,
            "Filters changed"
        );
        self.filters = filters;
        self.restart_window();
        true
    }

    /// Change the priority selection
    pub fn set_priority_filter(&mut self, priority: Selection<Priority>) -> bool {
        self.set_filters(FilterSet {
            priority,
            ..self.filters
        })
    }

    /// Change the status selection
    pub fn set_status_filter(&mut self, status: Selection<Status>) -> bool {
        self.set_filters(FilterSet {
            status,
            ..self.filters
        })
    }

    /// Advance the clock: fire the debounce timer and drain load-more requests
    ///
    /// Returns true if the visible result may have changed.
    pub fn tick(&mut self, now: Instant) -> bool {
        if self.torn_down {
            return false;
        }
        let mut changed = false;
        if let Some(query) = self.debouncer.poll(now) {
            debug!(query = %query, "Debounced query published");
            self.restart_window();
            changed = true;
        }
        if self.signal.take() {
            changed |= self.load_more();
        }
        changed
    }

    /// Advance one page unless everything is already visible
    pub fn load_more(&mut self) -> bool {
        let total = self.filtered().len();
        let advanced = self.window.load_more(total);
        if advanced {
            debug!(page = self.window.page(), total, "Window advanced");
        }
        advanced
    }

    /// Back to page 1, dropping any queued load-more
    pub fn reset_page(&mut self) {
        self.restart_window();
    }

    /// Subscribe the session's load-more latch to a provider
    pub fn attach(&self, provider: &mut dyn VisibilityProvider) {
        provider.subscribe(self.signal.listener());
    }

    /// Handle to the session's load-more latch
    pub fn load_more_signal(&self) -> LoadMoreSignal {
        self.signal.clone()
    }

    /// Cancel the pending debounce timer and close the load-more latch
    ///
    /// After teardown, query input and ticks are ignored. The last view is
    /// still readable.
    pub fn teardown(&mut self) {
        if self.torn_down {
            return;
        }
        self.debouncer.cancel();
        self.signal.close();
        self.torn_down = true;
        debug!("Search session torn down");
    }

    // ========================================================================
    // Outputs
    // ========================================================================

    /// The windowed, filtered, searched result
    pub fn view(&mut self) -> ResultView {
        let matches = self.matches();
        let filtered = self.filtered();
        let visible = self.window.slice(&filtered[..]).to_vec();
        let stats = SearchStats::new(
            self.index.generation,
            self.index.index.fragment_count(),
            self.index.index.posting_count(),
        )
        .with_candidates(matches.len());

        ResultView {
            has_more: visible.len() < filtered.len(),
            total_matched: filtered.len(),
            records: visible,
            page: self.window.page(),
            query: self.debouncer.published().clone(),
            filters: self.filters,
            stats,
        }
    }

    /// Count of records passing search and filters (pre-window)
    pub fn total_matched(&mut self) -> usize {
        self.filtered().len()
    }

    /// Whether further pages remain
    pub fn has_more(&mut self) -> bool {
        let total = self.filtered().len();
        self.window.has_more(total)
    }

    /// Current page (1-based)
    pub fn page(&self) -> usize {
        self.window.page()
    }

    /// The debounced (published) query
    pub fn query(&self) -> &str {
        self.debouncer.published()
    }

    /// The latest raw query input
    pub fn raw_query(&self) -> &str {
        self.debouncer.latest()
    }

    /// Debounce timer state
    pub fn debounce_state(&self) -> DebounceState {
        self.debouncer.state()
    }

    /// When the debounce timer fires, if armed
    pub fn deadline(&self) -> Option<Instant> {
        self.debouncer.deadline()
    }

    /// Active filter selections
    pub fn filters(&self) -> FilterSet {
        self.filters
    }

    /// The live index
    pub fn index(&self) -> Arc<SubstringIndex> {
        Arc::clone(&self.index.index)
    }

    /// Record generation the live index was built from
    pub fn index_generation(&self) -> u64 {
        self.index.generation
    }

    /// Whether `teardown` has run
    pub fn is_torn_down(&self) -> bool {
        self.torn_down
    }

    // ========================================================================
    // Memoized stages
    // ========================================================================

    fn records(&self) -> &[Record] {
        match &self.snapshot {
            Some(snapshot) => snapshot.records(),
            None => &[],
        }
    }

    fn record_generation(&self) -> u64 {
        self.snapshot.as_ref().map_or(0, |s| s.generation())
    }

    fn match_key(&self) -> MatchKey {
        MatchKey {
            index_generation: self.index.generation,
            record_generation: self.record_generation(),
            query: self.debouncer.published().clone(),
        }
    }

    fn matches(&mut self) -> Arc<IdSet> {
        let key = self.match_key();
        if let Some(memo) = self.matches.as_ref().filter(|m| m.key == key) {
            return Arc::clone(&memo.value);
        }

        let ids: IdSet = match Query::parse(&key.query) {
            Query::All => self.records().iter().map(|r| r.id).collect(),
            query => query.evaluate(&self.index.index, &IdSet::default()),
        };
        debug!(query = %key.query, matched = ids.len(), "Query evaluated");

        let ids = Arc::new(ids);
        self.matches = Some(Memo {
            key,
            value: Arc::clone(&ids),
        });
        ids
    }

    fn filtered(&mut self) -> Arc<[Record]> {
        let key = FilterKey {
            matches: self.match_key(),
            filters: self.filters,
        };
        if let Some(memo) = self.filtered.as_ref().filter(|m| m.key == key) {
            return Arc::clone(&memo.value);
        }

        let ids = self.matches();
        let filtered: Arc<[Record]> = Arc::from(apply_filters(self.records(), &ids, &self.filters));
        debug!(filtered = filtered.len(), "Filters applied");

        self.filtered = Some(Memo {
            key,
            value: Arc::clone(&filtered),
        });
        filtered
    }

    fn restart_window(&mut self) {
        self.window.reset();
        // a request made against the old list is stale
        self.signal.clear();
    }
}

impl Drop for SearchSession {
    fn drop(&mut self) {
        self.teardown();
    }
}
