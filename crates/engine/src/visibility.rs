//! Load-more signalling
//!
//! The windower advances when something outside says "the bottom of the list
//! became visible". This module keeps that detection behind a small provider
//! trait and funnels its events into a coalescing latch the session drains
//! once per tick.
//!
//! Everything here is single-threaded (`Rc<Cell<_>>`): providers and the
//! session run on the same event loop.

use std::cell::Cell;
use std::fmt;
use std::rc::Rc;
use tracing::debug;

/// Callback invoked on each "became visible" edge
pub type VisibilityListener = Box<dyn FnMut()>;

/// Source of "became visible" edges
pub trait VisibilityProvider {
    /// Register the listener, replacing any previous one
    fn subscribe(&mut self, listener: VisibilityListener);

    /// Drop the listener; no further edges are delivered
    fn unsubscribe(&mut self);
}

// ============================================================================
// LoadMoreSignal
// ============================================================================

#[derive(Debug, Default)]
struct LatchState {
    raised: Cell<bool>,
    closed: Cell<bool>,
}

/// Coalescing load-more latch
///
/// Any number of raises between two drains count as one request. Once
/// closed, raises are ignored so a late callback cannot reach a torn-down
/// consumer.
#[derive(Clone, Default)]
pub struct LoadMoreSignal {
    state: Rc<LatchState>,
}

impl LoadMoreSignal {
    /// Create an open, lowered latch
    pub fn new() -> Self {
        Self::default()
    }

    /// Request one more page
    pub fn raise(&self) {
        if self.state.closed.get() {
            debug!("Load-more raised after close; ignored");
            return;
        }
        self.state.raised.set(true);
    }

    /// Consume the pending request, if any
    pub fn take(&self) -> bool {
        self.state.raised.replace(false)
    }

    /// Check for a pending request without consuming it
    pub fn is_raised(&self) -> bool {
        self.state.raised.get()
    }

    /// Drop any pending request without acting on it
    pub fn clear(&self) {
        self.state.raised.set(false);
    }

    /// Lower and permanently ignore further raises
    pub fn close(&self) {
        self.state.closed.set(true);
        self.state.raised.set(false);
    }

    /// Whether the latch has been closed
    pub fn is_closed(&self) -> bool {
        self.state.closed.get()
    }

    /// Listener that raises this latch, for `VisibilityProvider::subscribe`
    pub fn listener(&self) -> VisibilityListener {
        let signal = self.clone();
        Box::new(move || signal.raise())
    }
}

impl fmt::Debug for LoadMoreSignal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoadMoreSignal")
            .field("raised", &self.state.raised.get())
            .field("closed", &self.state.closed.get())
            .finish()
    }
}

// ============================================================================
// SentinelProvider
// ============================================================================

/// Provider for a sentinel element whose visibility the host reports
///
/// Emits only on hidden→visible transitions, so a sentinel that stays on
/// screen fires once. After new content renders, the host calls
/// [`SentinelProvider::rearm`] to fire again if the sentinel is still
/// visible.
#[derive(Default)]
pub struct SentinelProvider {
    visible: bool,
    listener: Option<VisibilityListener>,
}

impl SentinelProvider {
    /// Create a hidden, unsubscribed sentinel
    pub fn new() -> Self {
        Self::default()
    }

    /// Report the sentinel's visibility
    ///
    /// Returns true if this call delivered an edge to the listener.
    pub fn set_visible(&mut self, visible: bool) -> bool {
        let rising = visible && !self.visible;
        self.visible = visible;
        if rising {
            self.emit()
        } else {
            false
        }
    }

    /// Re-deliver an edge if the sentinel is currently visible
    pub fn rearm(&mut self) -> bool {
        if self.visible {
            self.emit()
        } else {
            false
        }
    }

    /// Whether the sentinel is currently visible
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Whether a listener is registered
    pub fn is_subscribed(&self) -> bool {
        self.listener.is_some()
    }

    fn emit(&mut self) -> bool {
        match self.listener.as_mut() {
            Some(listener) => {
                listener();
                true
            }
            None => false,
        }
    }
}

impl VisibilityProvider for SentinelProvider {
    fn subscribe(&mut self, listener: VisibilityListener) {
        self.listener = Some(listener);
    }

    fn unsubscribe(&mut self) {
        self.listener = None;
    }
}

impl fmt::Debug for SentinelProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SentinelProvider")
            .field("visible", &self.visible)
            .field("subscribed", &self.listener.is_some())
            .finish()
    }
}
