//! sift - substring search over in-memory text records
//!
//! Records (title, description, priority, status) are indexed by every
//! 2+ character fragment of every word, so typing any part of a word finds
//! the records containing it. Multi-word queries are AND-ed. Results are
//! narrowed by priority/status filters and revealed page by page.
//!
//! # Quick Start
//!
//! ```
//! use std::time::{Duration, Instant};
//! use sift::{Desk, NewRecord, SiftConfig};
//!
//! let config = SiftConfig { seed_records: 45, ..SiftConfig::default() };
//! let mut desk = Desk::from_config(&config, chrono::Utc::now()).unwrap();
//!
//! let t0 = Instant::now();
//! desk.set_query("ticket #4", t0);
//! desk.tick(t0 + Duration::from_millis(300));
//!
//! let view = desk.view();
//! // "#4" appears in "#4", "#40".."#45"
//! assert_eq!(view.total_matched, 7);
//! println!("{}", view.summary());
//! ```
//!
//! # Architecture
//!
//! - [`sift_core`]: record model, filters, errors, result types
//! - [`sift_search`]: tokenizer, substring index, query engine, filter pipeline
//! - [`sift_engine`]: store, debouncer, window, session, desk, config
//!
//! The search functions are pure; the engine adds memoization, debouncing
//! and paging on top.

pub use sift_core::*;
pub use sift_engine::{
    seed_records, DebounceState, Debouncer, Desk, IndexSync, LoadMoreSignal, RecordSnapshot,
    RecordStore, SearchSession, SentinelProvider, SessionConfig, SiftConfig, VisibilityProvider,
    Window, CONFIG_FILE_NAME, DEFAULT_DEBOUNCE, DEFAULT_PAGE_SIZE,
};
pub use sift_search::{
    apply_filters, build_index, fragments, search, tokenize, tokenize_unique, Query,
    SubstringIndex,
};
