//! Desk: a record store wired to a search session
//!
//! This is the composition root an application shell talks to. Every
//! mutation goes through the store, and the session is re-synced right
//! after, so the index generation never lags behind a desk operation.

use crate::config::SiftConfig;
use crate::seed::seed_records;
use crate::session::{IndexSync, SearchSession, SessionConfig};
use crate::store::RecordStore;
use crate::visibility::{SentinelProvider, VisibilityProvider};
use chrono::{DateTime, Utc};
use sift_core::{NewRecord, Priority, RecordId, Result, ResultView, Selection, Status};
use std::time::Instant;
use tracing::info;

/// Record store, search session and load-more sentinel
#[derive(Debug)]
pub struct Desk {
    store: RecordStore,
    session: SearchSession,
    sentinel: SentinelProvider,
}

impl Desk {
    /// Create an empty desk
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` if `config.page_size` is zero.
    pub fn new(config: SessionConfig) -> Result<Self> {
        let store = RecordStore::new();
        let mut session = SearchSession::new(config)?;
        let mut sentinel = SentinelProvider::new();
        session.attach(&mut sentinel);
        session.sync(&store.snapshot());
        Ok(Desk {
            store,
            session,
            sentinel,
        })
    }

    /// Create a desk from a loaded config, seeding sample records
    pub fn from_config(config: &SiftConfig, now: DateTime<Utc>) -> Result<Self> {
        config.validate()?;
        let mut desk = Desk::new(config.session_config())?;
        if config.seed_records > 0 {
            desk.store
                .replace_all(seed_records(config.seed_records, now))?;
            desk.session.sync(&desk.store.snapshot());
            info!(records = config.seed_records, "Desk seeded");
        }
        Ok(desk)
    }

    // ========================================================================
    // Records
    // ========================================================================

    /// Add a record and jump back to page 1 so it is visible
    ///
    /// # Errors
    ///
    /// Returns `IdSpaceExhausted` if no fresh id is left.
    pub fn add(&mut self, new: NewRecord, now: DateTime<Utc>) -> Result<RecordId> {
        let id = self.store.append(new, now)?;
        self.resync();
        self.session.reset_page();
        Ok(id)
    }

    /// Flip a record between Open and Closed
    ///
    /// # Errors
    ///
    /// Returns `RecordNotFound` if no record has this id.
    pub fn toggle_status(&mut self, id: RecordId) -> Result<Status> {
        let status = self.store.toggle_status(id)?;
        self.resync();
        Ok(status)
    }

    /// Number of records currently Open
    pub fn open_count(&self) -> usize {
        self.store.open_count()
    }

    /// Number of records on the desk
    pub fn len(&self) -> usize {
        self.store.len()
    }

    /// Whether the desk holds no records
    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }

    /// The underlying store
    pub fn store(&self) -> &RecordStore {
        &self.store
    }

    // ========================================================================
    // Search
    // ========================================================================

    /// Feed raw query input
    pub fn set_query(&mut self, raw: &str, now: Instant) {
        self.session.set_query(raw, now);
    }

    /// Change the priority selection
    pub fn set_priority_filter(&mut self, priority: Selection<Priority>) -> bool {
        self.session.set_priority_filter(priority)
    }

    /// Change the status selection
    pub fn set_status_filter(&mut self, status: Selection<Status>) -> bool {
        self.session.set_status_filter(status)
    }

    /// Advance the clock
    pub fn tick(&mut self, now: Instant) -> bool {
        self.session.tick(now)
    }

    /// Reveal one more page
    pub fn load_more(&mut self) -> bool {
        self.session.load_more()
    }

    /// Report the load-more sentinel's visibility
    ///
    /// A hidden→visible edge queues one load-more for the next tick.
    pub fn set_sentinel_visible(&mut self, visible: bool) -> bool {
        self.sentinel.set_visible(visible)
    }

    /// Queue another load-more if the sentinel is still on screen
    pub fn rearm_sentinel(&mut self) -> bool {
        self.sentinel.rearm()
    }

    /// Current result
    pub fn view(&mut self) -> ResultView {
        self.session.view()
    }

    /// The search session
    pub fn session(&self) -> &SearchSession {
        &self.session
    }

    /// Mutable access to the search session
    pub fn session_mut(&mut self) -> &mut SearchSession {
        &mut self.session
    }

    /// Stop timers and detach the sentinel
    pub fn teardown(&mut self) {
        self.sentinel.unsubscribe();
        self.session.teardown();
    }

    fn resync(&mut self) {
        if self.session.sync(&self.store.snapshot()) == IndexSync::Retained {
            info!(
                generation = self.store.generation(),
                "Searching with a stale index until the next successful rebuild"
            );
        }
    }
}
