//! Search engine for sift
//!
//! This crate composes the pure search functions into a live pipeline:
//! - RecordStore: newest-first records with a generation counter
//! - Debouncer: explicit-clock debounce of query input
//! - Window: page-based reveal with saturating load-more
//! - LoadMoreSignal / VisibilityProvider: "bottom became visible" plumbing
//! - SearchSession: memoized index, match set and filtered list
//! - Desk: store + session, the composition root for a shell
//! - SiftConfig: `sift.toml` loading
//!
//! Everything runs on the caller's thread. Time only advances when the
//! caller passes an `Instant` to `tick`.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod debounce;
pub mod desk;
pub mod seed;
pub mod session;
pub mod store;
pub mod visibility;
pub mod window;

pub use config::{SiftConfig, CONFIG_FILE_NAME};
pub use debounce::{DebounceState, Debouncer, DEFAULT_DEBOUNCE};
pub use desk::Desk;
pub use seed::{seed_records, SEED_BASE_ID};
pub use session::{IndexSync, SearchSession, SessionConfig};
pub use store::{RecordSnapshot, RecordStore};
pub use visibility::{LoadMoreSignal, SentinelProvider, VisibilityListener, VisibilityProvider};
pub use window::{Window, DEFAULT_PAGE_SIZE};
