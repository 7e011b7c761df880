//! In-memory record store

use tracing::debug;

use super::RecordStore;
use crate::app::models::DataRecord;
use crate::error::PersistenceError;

/// Keeps inserted records in insertion order
///
/// A store can be told to reject a given insert, which lets callers
/// exercise the persistence failure path without a database.
#[derive(Debug, Clone, Default)]
pub struct MemoryRecordStore {
    records: Vec<DataRecord>,
    attempts: usize,
    reject_attempt: Option<usize>,
}

impl MemoryRecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reject the `attempt`-th insert (1-based); earlier inserts succeed
    pub fn rejecting_attempt(attempt: usize) -> Self {
        Self {
            reject_attempt: Some(attempt),
            ..Self::default()
        }
    }

    /// Records persisted so far, in insertion order
    pub fn records(&self) -> &[DataRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Number of inserts attempted, rejected ones included
    pub fn attempts(&self) -> usize {
        self.attempts
    }

    pub fn into_records(self) -> Vec<DataRecord> {
        self.records
    }
}

impl RecordStore for MemoryRecordStore {
    fn insert_record(&mut self, record: &DataRecord) -> Result<(), PersistenceError> {
        self.attempts += 1;

        if self.reject_attempt == Some(self.attempts) {
            return Err(PersistenceError::rejected(format!(
                "insert #{} refused by store",
                self.attempts
            )));
        }

        debug!("Stored record {:?} in memory", record);
        self.records.push(record.clone());
        Ok(())
    }
}
