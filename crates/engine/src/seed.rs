//! Deterministic demo data
//!
//! Fills an empty desk with sample records so search, filters and paging
//! have something to chew on.

use chrono::{DateTime, Duration, Utc};
use sift_core::{Priority, Record, RecordId, Status};

/// First id handed out to seeded records
pub const SEED_BASE_ID: u64 = 1000;

/// Build `count` sample records, newest first
///
/// Record `i` gets id `1000 + i`, is `i` hours older than `now`, cycles
/// priority High/Medium/Low and alternates Open/Closed.
pub fn seed_records(count: usize, now: DateTime<Utc>) -> Vec<Record> {
    (0..count)
        .map(|i| {
            let n = i + 1;
            Record {
                id: RecordId::new(SEED_BASE_ID + i as u64),
                title: format!("Sample ticket #{}", n),
                description: format!(
                    "This is a seeded issue example number {}. Use search to find \"seed\", \"error\", or number.",
                    n
                ),
                priority: match i % 3 {
                    0 => Priority::High,
                    1 => Priority::Medium,
                    _ => Priority::Low,
                },
                status: if i % 2 == 0 {
                    Status::Open
                } else {
                    Status::Closed
                },
                created_at: now - Duration::hours(i as i64),
            }
        })
        .collect()
}
