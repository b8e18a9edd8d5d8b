//! Record store
//!
//! The single owner of the record collection. Records are kept newest-first
//! behind an `Arc<[Record]>`; every mutation builds a new slice and bumps the
//! generation counter, so readers holding a snapshot never observe a change
//! and "record set identity" is just the generation number.

use chrono::{DateTime, Utc};
use sift_core::{Error, NewRecord, Record, RecordId, Result, Status};
use std::sync::Arc;
use tracing::debug;

/// Immutable view of the record set at one generation
#[derive(Debug, Clone)]
pub struct RecordSnapshot {
    records: Arc<[Record]>,
    generation: u64,
}

impl RecordSnapshot {
    /// Records in canonical (newest-first) order
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    /// Generation this snapshot was taken at
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Number of records
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Check if the snapshot holds no records
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Owned, newest-first record collection with a controlled mutation API
#[derive(Debug)]
pub struct RecordStore {
    records: Arc<[Record]>,
    generation: u64,
    // None once u64::MAX has been handed out
    next_id: Option<u64>,
}

impl Default for RecordStore {
    fn default() -> Self {
        Self::new()
    }
}

impl RecordStore {
    /// Create an empty store
    pub fn new() -> Self {
        RecordStore {
            records: Arc::from(Vec::new()),
            generation: 0,
            next_id: Some(1),
        }
    }

    /// Current snapshot
    pub fn snapshot(&self) -> RecordSnapshot {
        RecordSnapshot {
            records: Arc::clone(&self.records),
            generation: self.generation,
        }
    }

    /// Generation counter, bumped on every mutation
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Number of records
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Check if the store is empty
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Look up a record by id
    pub fn get(&self, id: RecordId) -> Option<&Record> {
        self.records.iter().find(|r| r.id == id)
    }

    /// Number of records with status Open
    pub fn open_count(&self) -> usize {
        self.records
            .iter()
            .filter(|r| r.status == Status::Open)
            .count()
    }

    // ========================================================================
    // Mutation
    // ========================================================================

    /// Add a record at the front and return its fresh id
    ///
    /// # Errors
    ///
    /// Returns `IdSpaceExhausted` once every id has been used. The store is
    /// left unchanged.
    pub fn append(&mut self, new: NewRecord, now: DateTime<Utc>) -> Result<RecordId> {
        let raw = self.next_id.ok_or(Error::IdSpaceExhausted)?;
        let id = RecordId::new(raw);
        self.next_id = raw.checked_add(1);

        let mut records = Vec::with_capacity(self.records.len() + 1);
        records.push(new.into_record(id, now));
        records.extend_from_slice(&self.records);
        self.replace(records);
        debug!(%id, generation = self.generation, "Record appended");
        Ok(id)
    }

    /// Flip a record between Open and Closed
    ///
    /// # Errors
    ///
    /// Returns `RecordNotFound` if no record has this id.
    pub fn toggle_status(&mut self, id: RecordId) -> Result<Status> {
        let position = self
            .records
            .iter()
            .position(|r| r.id == id)
            .ok_or(Error::RecordNotFound(id))?;

        let mut records = self.records.to_vec();
        records[position] = records[position].with_status_toggled();
        let status = records[position].status;
        self.replace(records);
        debug!(%id, %status, generation = self.generation, "Record status toggled");
        Ok(status)
    }

    /// Replace the whole collection
    ///
    /// Records are taken in the given order. The id counter moves past the
    /// largest id seen so fresh ids never collide with loaded ones. Loading
    /// `u64::MAX` is allowed, but every later `append` then fails.
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` if two records share an id.
    pub fn replace_all(&mut self, records: Vec<Record>) -> Result<()> {
        let mut seen = sift_core::IdSet::default();
        for record in &records {
            if !seen.insert(record.id) {
                return Err(Error::invalid_input(format!(
                    "duplicate record id {}",
                    record.id
                )));
            }
        }
        if let Some(max) = records.iter().map(|r| r.id.as_u64()).max() {
            let after = max.checked_add(1);
            self.next_id = after.and_then(|after| self.next_id.map(|next| next.max(after)));
        }
        self.replace(records);
        debug!(
            records = self.records.len(),
            generation = self.generation,
            "Record set replaced"
        );
        Ok(())
    }

    fn replace(&mut self, records: Vec<Record>) {
        self.records = Arc::from(records);
        self.generation += 1;
    }
}
