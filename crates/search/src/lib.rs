//! Search infrastructure for sift
//!
//! This crate provides:
//! - Tokenizer for record text and queries
//! - SubstringIndex: every 2+ character fragment of every token -> record ids
//! - Query engine: AND intersection over fragment lookups
//! - Filter pipeline: categorical narrowing in canonical record order
//!
//! All functions here are pure over their explicit inputs. Memoization and
//! rebuild scheduling live in `sift-engine`.
//!
//! # Usage
//!
//! ```
//! use sift_core::{FilterSet, IdSet};
//! use sift_search::{apply_filters, build_index, search};
//!
//! let records: Vec<sift_core::Record> = Vec::new();
//! let index = build_index(&records);
//! let all: IdSet = records.iter().map(|r| r.id).collect();
//! let ids = search("err", &index, &all);
//! let visible = apply_filters(&records, &ids, &FilterSet::default());
//! assert!(visible.is_empty());
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod filter;
pub mod index;
pub mod query;
pub mod tokenizer;

// Re-export commonly used types
pub use filter::apply_filters;
pub use index::{build_index, SubstringIndex};
pub use query::{search, Query};
pub use tokenizer::{fragments, tokenize, tokenize_unique};
