//! Record stores receiving validated records
//!
//! The ingestion pipeline persists through the [`RecordStore`] trait and
//! imposes no transaction semantics on it: each record is inserted on its
//! own, in file order.
//!
//! - [`sqlite`] - SQLite-backed store, one autocommitted insert per record
//! - [`memory`] - In-memory store for dry runs and tests

pub mod memory;
pub mod sqlite;

#[cfg(test)]
pub mod tests;

pub use memory::MemoryRecordStore;
pub use sqlite::SqliteRecordStore;

use crate::app::models::DataRecord;
use crate::error::PersistenceError;

/// Capability to persist one record at a time
pub trait RecordStore {
    /// Persist a single record
    fn insert_record(&mut self, record: &DataRecord) -> Result<(), PersistenceError>;
}
