//! Shared test utilities for the root integration suites.
//!
//! Import via `mod common;` from any test file.

#![allow(dead_code)]
#![allow(unused_imports)]

use std::time::{Duration, Instant};

use chrono::{Duration as ChronoDuration, Utc};
pub use sift::{
    Desk, FilterSet, NewRecord, Priority, Record, RecordId, RecordStore, ResultView,
    SearchSession, Selection, SessionConfig, SiftConfig, Status,
};

/// Debounce delay used by every helper-built session.
pub const DEBOUNCE: Duration = Duration::from_millis(300);

/// Build a record with a fixed id, newest ids first in `created_at`.
pub fn record(id: u64, title: &str, description: &str, priority: Priority, status: Status) -> Record {
    NewRecord::new(title, description)
        .expect("valid record text")
        .with_priority(priority)
        .with_status(status)
        .into_record(RecordId::new(id), Utc::now() - ChronoDuration::seconds(id as i64))
}

/// A small help-desk style record set.
pub fn help_desk_records() -> Vec<Record> {
    vec![
        record(1, "Login error", "cannot login after reset", Priority::High, Status::Open),
        record(2, "Signup flow", "email login link broken", Priority::Low, Status::Open),
        record(3, "Payment timeout", "gateway returns 504", Priority::High, Status::Closed),
        record(4, "Dark mode", "contrast too low on login page", Priority::Medium, Status::Open),
        record(5, "Export CSV", "#export fails for large files", Priority::Medium, Status::Closed),
    ]
}

/// Store preloaded with `records`.
pub fn store_with(records: Vec<Record>) -> RecordStore {
    let mut store = RecordStore::new();
    store.replace_all(records).expect("unique ids");
    store
}

/// Session with the given page size and the shared debounce delay.
pub fn session(page_size: usize) -> SearchSession {
    SearchSession::new(SessionConfig {
        page_size,
        debounce: DEBOUNCE,
        ..SessionConfig::default()
    })
    .expect("valid session config")
}

/// Desk seeded with `count` sample records.
pub fn seeded_desk(count: usize) -> Desk {
    let config = SiftConfig {
        seed_records: count,
        ..SiftConfig::default()
    };
    Desk::from_config(&config, Utc::now()).expect("seeded desk")
}

/// Type `query` at `at` and let the debounce timer fire.
pub fn settle_query(desk: &mut Desk, query: &str, at: Instant) -> ResultView {
    desk.set_query(query, at);
    desk.tick(at + DEBOUNCE);
    desk.view()
}

/// Ids of the visible records, in display order.
pub fn ids(view: &ResultView) -> Vec<u64> {
    view.records.iter().map(|r| r.id.as_u64()).collect()
}
