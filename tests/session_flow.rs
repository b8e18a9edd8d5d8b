//! End-to-end search flow tests
//!
//! Drive a desk or session the way a UI shell would: type, wait for the
//! debounce, flip filters, scroll, mutate records. Timestamps are explicit so
//! every test is deterministic.

mod common;

use common::*;
use std::time::{Duration, Instant};
use sift::{DebounceState, IndexSync, IndexLimits, SentinelProvider};

// ============================================================================
// Query semantics through the session
// ============================================================================

#[test]
fn substring_and_query_over_help_desk() {
    let store = store_with(help_desk_records());
    let mut s = session(20);
    s.sync(&store.snapshot());
    let t0 = Instant::now();

    s.set_query("login", t0);
    s.tick(t0 + DEBOUNCE);
    assert_eq!(ids(&s.view()), vec![1, 2, 4], "canonical order kept");

    s.set_query("log err", t0 + DEBOUNCE);
    s.tick(t0 + DEBOUNCE * 2);
    assert_eq!(ids(&s.view()), vec![1], "every token must match");

    s.set_query("LOGIN zzz", t0 + DEBOUNCE * 2);
    s.tick(t0 + DEBOUNCE * 3);
    assert!(s.view().is_empty(), "one unknown token empties the result");
}

#[test]
fn blank_and_punctuation_queries() {
    let store = store_with(help_desk_records());
    let mut s = session(20);
    s.sync(&store.snapshot());
    let t0 = Instant::now();

    s.set_query("   ", t0);
    s.tick(t0 + DEBOUNCE);
    assert_eq!(s.view().total_matched, 5, "blank query shows everything");

    s.set_query("!!! ...", t0 + DEBOUNCE);
    s.tick(t0 + DEBOUNCE * 2);
    assert_eq!(s.view().total_matched, 0, "no tokens, no matches");
}

#[test]
fn category_labels_are_searchable() {
    let store = store_with(help_desk_records());
    let mut s = session(20);
    s.sync(&store.snapshot());
    let t0 = Instant::now();

    s.set_query("high open", t0);
    s.tick(t0 + DEBOUNCE);
    assert_eq!(ids(&s.view()), vec![1]);

    s.set_query("#export", t0 + DEBOUNCE);
    s.tick(t0 + DEBOUNCE * 2);
    assert_eq!(ids(&s.view()), vec![5], "hash is a word character");
}

#[test]
fn query_and_filters_compose() {
    let store = store_with(help_desk_records());
    let mut s = session(20);
    s.sync(&store.snapshot());
    let t0 = Instant::now();

    s.set_query("login", t0);
    s.tick(t0 + DEBOUNCE);
    s.set_priority_filter(Selection::Only(Priority::High));
    assert_eq!(ids(&s.view()), vec![1]);

    s.set_priority_filter(Selection::All);
    s.set_status_filter(Selection::Only(Status::Closed));
    assert!(s.view().is_empty());
}

// ============================================================================
// Debounce
// ============================================================================

#[test]
fn rapid_typing_publishes_only_the_last_value() {
    let store = store_with(help_desk_records());
    let mut s = session(20);
    s.sync(&store.snapshot());
    let t0 = Instant::now();

    let mut now = t0;
    for prefix in ["p", "pa", "pay", "paym"] {
        s.set_query(prefix, now);
        assert!(!s.tick(now), "nothing published mid-burst");
        now += Duration::from_millis(120);
    }
    assert_eq!(s.query(), "");
    assert_eq!(s.raw_query(), "paym");
    assert_eq!(s.debounce_state(), DebounceState::Pending);

    let last_input = now - Duration::from_millis(120);
    assert!(!s.tick(last_input + DEBOUNCE - Duration::from_millis(1)));
    assert!(s.tick(last_input + DEBOUNCE));
    assert_eq!(s.query(), "paym");
    assert_eq!(ids(&s.view()), vec![3]);
}

#[test]
fn stale_view_is_served_while_pending() {
    let store = store_with(help_desk_records());
    let mut s = session(20);
    s.sync(&store.snapshot());
    let t0 = Instant::now();

    s.set_query("payment", t0);
    let view = s.view();
    assert_eq!(view.query, "");
    assert_eq!(view.total_matched, 5);
}

// ============================================================================
// Windowing
// ============================================================================

#[test]
fn twenty_per_page_over_forty_five() {
    let mut desk = seeded_desk(45);

    let v = desk.view();
    assert_eq!((v.visible(), v.has_more, v.page), (20, true, 1));
    assert_eq!(v.summary(), "Showing 20 / 45 results");

    assert!(desk.load_more());
    let v = desk.view();
    assert_eq!((v.visible(), v.has_more, v.page), (40, true, 2));

    assert!(desk.load_more());
    let v = desk.view();
    assert_eq!((v.visible(), v.has_more, v.page), (45, false, 3));

    assert!(!desk.load_more(), "saturated");
    assert_eq!(desk.view().page, 3);
}

#[test]
fn new_query_starts_from_the_top() {
    let mut desk = seeded_desk(100);
    desk.load_more();
    desk.load_more();
    assert_eq!(desk.view().page, 3);

    let view = settle_query(&mut desk, "sample", Instant::now());
    assert_eq!(view.page, 1);
    assert_eq!(view.visible(), 20);
}

#[test]
fn unchanged_filter_keeps_page() {
    let mut desk = seeded_desk(100);
    desk.load_more();
    assert!(!desk.set_status_filter(Selection::All));
    assert_eq!(desk.view().page, 2);

    assert!(desk.set_status_filter(Selection::Only(Status::Open)));
    assert_eq!(desk.view().page, 1);
}

#[test]
fn sustained_visibility_does_not_spam_load_more() {
    let store = store_with(sift::seed_records(100, chrono::Utc::now()));
    let mut s = session(10);
    s.sync(&store.snapshot());
    let mut sentinel = SentinelProvider::new();
    s.attach(&mut sentinel);
    let t0 = Instant::now();

    sentinel.set_visible(true);
    for i in 0..5 {
        sentinel.set_visible(true);
        s.tick(t0 + Duration::from_millis(i));
    }
    assert_eq!(s.page(), 2, "one edge, one page");
}

// ============================================================================
// Record changes
// ============================================================================

#[test]
fn added_record_is_found_and_shown_first() {
    let mut desk = seeded_desk(45);
    desk.load_more();

    let id = desk.add(
        NewRecord::new("Printer jam", "tray 2 keeps jamming").unwrap(),
        chrono::Utc::now(),
    )
    .unwrap();
    let view = desk.view();
    assert_eq!(view.page, 1);
    assert_eq!(view.records[0].id, id);

    let view = settle_query(&mut desk, "jamm", Instant::now());
    assert_eq!(ids(&view), vec![id.as_u64()]);
}

#[test]
fn toggled_status_is_searchable_immediately() {
    let mut desk = seeded_desk(4);
    let t0 = Instant::now();
    let view = settle_query(&mut desk, "closed", t0);
    assert_eq!(ids(&view), vec![1001, 1003]);

    desk.toggle_status(RecordId::new(1000)).unwrap();
    assert_eq!(ids(&desk.view()), vec![1000, 1001, 1003]);
}

#[test]
fn index_only_rebuilds_on_record_change() {
    let mut store = store_with(help_desk_records());
    let mut s = session(20);
    assert_eq!(s.sync(&store.snapshot()), IndexSync::Rebuilt);
    assert_eq!(s.sync(&store.snapshot()), IndexSync::Unchanged);

    store.toggle_status(RecordId::new(1)).unwrap();
    assert_eq!(s.sync(&store.snapshot()), IndexSync::Rebuilt);
    assert_eq!(s.index_generation(), store.generation());
}

#[test]
fn removed_ids_never_match() {
    let mut store = store_with(help_desk_records());
    let mut s = session(20);
    s.sync(&store.snapshot());

    store
        .replace_all(vec![record(9, "Fresh start", "nothing here", Priority::Low, Status::Open)])
        .unwrap();
    s.sync(&store.snapshot());
    let t0 = Instant::now();
    s.set_query("login", t0);
    s.tick(t0 + DEBOUNCE);
    assert!(s.view().is_empty(), "index reflects the latest record set only");
}

#[test]
fn over_budget_rebuild_keeps_serving_old_index() {
    let mut store = store_with(help_desk_records());
    let mut s = SearchSession::new(SessionConfig {
        page_size: 20,
        debounce: DEBOUNCE,
        limits: IndexLimits::with_max_postings(400),
    })
    .unwrap();
    assert_eq!(s.sync(&store.snapshot()), IndexSync::Rebuilt);
    let before = s.index_generation();

    store.append(
        NewRecord::new(
            "Supercalifragilisticexpialidocious",
            "antidisestablishmentarianism pneumonoultramicroscopicsilicovolcanoconiosis",
        )
        .unwrap(),
        chrono::Utc::now(),
    )
    .unwrap();
    assert_eq!(s.sync(&store.snapshot()), IndexSync::Retained);
    assert_eq!(s.index_generation(), before);

    let t0 = Instant::now();
    s.set_query("login", t0);
    s.tick(t0 + DEBOUNCE);
    assert_eq!(ids(&s.view()), vec![1, 2, 4]);
}

// ============================================================================
// Teardown
// ============================================================================

#[test]
fn teardown_drops_pending_query() {
    let mut desk = seeded_desk(10);
    let t0 = Instant::now();
    desk.set_query("ticket #3", t0);
    desk.teardown();

    assert!(!desk.tick(t0 + DEBOUNCE * 10));
    assert_eq!(desk.view().query, "");
    assert_eq!(desk.view().total_matched, 10);
}
