//! Debounce scheduler
//!
//! Coalesces rapid input changes into one delayed publication. The scheduler
//! is a two-state timer machine driven by an explicit clock: callers pass
//! `Instant`s in, nothing runs on its own.
//!
//! ```text
//!            push(v)                 poll(now >= deadline)
//! Settled ───────────▶ Pending ─────────────────────────▶ Settled
//!                       │   ▲                              (v published)
//!                       └───┘ push(v') restarts the wait
//!            cancel() from Pending drops v and returns to Settled
//! ```
//!
//! A published value was always the latest input for at least `delay`.

use std::time::{Duration, Instant};
use tracing::debug;

/// Default debounce delay
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(300);

/// Timer state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DebounceState {
    /// A value is waiting for its deadline; the stale value is still exposed
    Pending,
    /// No timer armed; the published value is current
    Settled,
}

#[derive(Debug, Clone)]
struct Armed<T> {
    value: T,
    deadline: Instant,
}

/// Debounced view of a rapidly changing value
#[derive(Debug, Clone)]
pub struct Debouncer<T> {
    delay: Duration,
    published: T,
    armed: Option<Armed<T>>,
}

impl<T: Clone + PartialEq> Debouncer<T> {
    /// Create a settled debouncer publishing `initial`
    pub fn new(initial: T, delay: Duration) -> Self {
        Debouncer {
            delay,
            published: initial,
            armed: None,
        }
    }

    /// Configured delay
    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Current timer state
    pub fn state(&self) -> DebounceState {
        if self.armed.is_some() {
            DebounceState::Pending
        } else {
            DebounceState::Settled
        }
    }

    /// The last published value
    pub fn published(&self) -> &T {
        &self.published
    }

    /// The latest raw input (pending value if armed, else the published one)
    pub fn latest(&self) -> &T {
        self.armed
            .as_ref()
            .map(|armed| &armed.value)
            .unwrap_or(&self.published)
    }

    /// When the armed timer fires, if any
    pub fn deadline(&self) -> Option<Instant> {
        self.armed.as_ref().map(|armed| armed.deadline)
    }

    /// Record a new raw input at `now`
    ///
    /// Arms (or re-arms) the timer unless `value` equals the latest input.
    pub fn push(&mut self, value: T, now: Instant) {
        if *self.latest() == value {
            return;
        }
        self.armed = Some(Armed {
            value,
            deadline: now + self.delay,
        });
    }

    /// Advance the clock to `now`
    ///
    /// If the timer has expired, settles and returns the newly published
    /// value. Returns None when nothing fired or the fired value equals what
    /// was already published.
    pub fn poll(&mut self, now: Instant) -> Option<T> {
        let expired = matches!(&self.armed, Some(armed) if now >= armed.deadline);
        if !expired {
            return None;
        }
        let armed = self.armed.take()?;
        if armed.value == self.published {
            return None;
        }
        self.published = armed.value;
        Some(self.published.clone())
    }

    /// Disarm the timer, dropping any pending value
    ///
    /// Returns true if a timer was armed. The published value is untouched.
    pub fn cancel(&mut self) -> bool {
        let was_armed = self.armed.take().is_some();
        if was_armed {
            debug!("Pending debounce cancelled");
        }
        was_armed
    }
}
