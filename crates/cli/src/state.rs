//! Desk wrapper that runs parsed actions against the wall clock.
//!
//! Every action ends with a `tick(now)`, so an expired debounce timer is
//! applied by whatever command happens to come next, the way an event loop
//! would.

use std::time::{Duration, Instant};

use chrono::Utc;
use sift_core::{RecordId, Result, ResultView, Status};
use sift_engine::{Desk, SiftConfig};

use crate::parse::Action;

/// What an action produced, for formatting.
#[derive(Debug)]
pub enum Output {
    /// Nothing to print.
    None,
    /// Query accepted; applies after the debounce delay.
    Pending { query: String },
    /// The current view.
    View(ResultView),
    /// A record was added.
    Added(RecordId),
    /// A record's status flipped.
    Toggled { id: RecordId, status: Status },
    /// Open and total record counts.
    Counts { open: usize, total: usize },
}

/// Wraps the desk and the debounce delay the `wait` command sleeps for.
pub struct DeskState {
    desk: Desk,
    debounce: Duration,
}

impl DeskState {
    /// Create a desk from a loaded config.
    pub fn new(config: &SiftConfig) -> Result<Self> {
        Ok(Self {
            desk: Desk::from_config(config, Utc::now())?,
            debounce: config.debounce(),
        })
    }

    /// Execute one action.
    pub fn execute(&mut self, action: Action) -> Result<Output> {
        let output = match action {
            Action::Search(query) => {
                self.desk.set_query(&query, Instant::now());
                Output::Pending { query }
            }
            Action::Priority(selection) => {
                self.desk.set_priority_filter(selection);
                self.settle_view()
            }
            Action::Status(selection) => {
                self.desk.set_status_filter(selection);
                self.settle_view()
            }
            Action::More => {
                // scrolling to the bottom: the sentinel comes into view, then leaves
                self.desk.set_sentinel_visible(true);
                self.desk.tick(Instant::now());
                self.desk.set_sentinel_visible(false);
                self.settle_view()
            }
            Action::Add(new) => {
                let id = self.desk.add(new, Utc::now())?;
                Output::Added(id)
            }
            Action::Toggle(id) => {
                let status = self.desk.toggle_status(id)?;
                Output::Toggled { id, status }
            }
            Action::Show => self.settle_view(),
            Action::Count => Output::Counts {
                open: self.desk.open_count(),
                total: self.desk.len(),
            },
            Action::Wait => {
                if let Some(deadline) = self.desk.session().deadline() {
                    std::thread::sleep(deadline.saturating_duration_since(Instant::now()));
                } else {
                    std::thread::sleep(self.debounce);
                }
                self.desk.tick(Instant::now());
                Output::None
            }
        };
        self.desk.tick(Instant::now());
        Ok(output)
    }

    /// Stop timers before exit.
    pub fn shutdown(&mut self) {
        self.desk.teardown();
    }

    /// Prompt showing the applied query and open count.
    pub fn prompt(&self) -> String {
        let query = self.desk.session().query();
        if query.is_empty() {
            format!("sift ({} open)> ", self.desk.open_count())
        } else {
            format!("sift [{}] ({} open)> ", query, self.desk.open_count())
        }
    }

    fn settle_view(&mut self) -> Output {
        self.desk.tick(Instant::now());
        Output::View(self.desk.view())
    }
}
