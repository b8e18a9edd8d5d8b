//! Size limits for the substring index
//!
//! Index size grows with the square of token length. `IndexLimits` caps the
//! total number of postings one rebuild may insert; a rebuild that would
//! exceed the cap is rejected as a whole and the previous index stays live.

/// Shortest fragment stored in the substring index
pub const MIN_FRAGMENT_LEN: usize = 2;

/// Default posting budget per rebuild
pub const DEFAULT_MAX_POSTINGS: usize = 50_000_000;

/// Limits applied while building the substring index
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndexLimits {
    /// Maximum (fragment, record id) insertions per rebuild
    pub max_postings: usize,
}

impl Default for IndexLimits {
    fn default() -> Self {
        IndexLimits {
            max_postings: DEFAULT_MAX_POSTINGS,
        }
    }
}

impl IndexLimits {
    /// No cap at all
    pub const fn unbounded() -> Self {
        IndexLimits {
            max_postings: usize::MAX,
        }
    }

    /// Cap postings at `max`
    pub const fn with_max_postings(max: usize) -> Self {
        IndexLimits { max_postings: max }
    }
}
