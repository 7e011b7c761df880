//! Test utilities for CSV ingestion testing
//!
//! This module provides common helpers used across the ingestion test
//! modules.

use std::cell::Cell;
use std::io::{self, Read};
use std::rc::Rc;
use tempfile::NamedTempFile;

use crate::app::models::RawRow;
use crate::app::services::csv_ingest::{IngestPipeline, IngestSummary};
use crate::app::services::record_store::MemoryRecordStore;
use crate::error::IngestResult;

mod pipeline_tests;

/// Helper to build a raw row from string slices
pub fn row(line: usize, cells: &[&str]) -> RawRow {
    RawRow::new(line, cells.iter().map(|c| c.to_string()).collect())
}

/// Helper to run the default pipeline over in-memory content
pub fn ingest_str(
    content: &str,
    filename: &str,
) -> (IngestResult<IngestSummary>, MemoryRecordStore) {
    let mut store = MemoryRecordStore::new();
    let result = IngestPipeline::new().ingest(content.as_bytes(), filename, &mut store);
    (result, store)
}

/// Helper to collect stored records as owned tuples
pub fn stored_pairs(store: &MemoryRecordStore) -> Vec<(String, String)> {
    store
        .records()
        .iter()
        .map(|r| (r.field1().to_string(), r.field2().to_string()))
        .collect()
}

/// Helper to create a temporary `.csv` file with given content
pub fn create_temp_csv(content: &str) -> NamedTempFile {
    let mut temp_file = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
    std::io::Write::write_all(&mut temp_file, content.as_bytes()).unwrap();
    temp_file
}

/// Reader that always fails
pub struct FailingReader;

impl Read for FailingReader {
    fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
        Err(io::Error::new(io::ErrorKind::BrokenPipe, "connection reset"))
    }
}

/// Reader that records when it has been dropped
pub struct DropTrackingReader {
    inner: io::Cursor<Vec<u8>>,
    dropped: Rc<Cell<bool>>,
}

impl DropTrackingReader {
    pub fn new(content: &str) -> (Self, Rc<Cell<bool>>) {
        let dropped = Rc::new(Cell::new(false));
        let reader = Self {
            inner: io::Cursor::new(content.as_bytes().to_vec()),
            dropped: Rc::clone(&dropped),
        };
        (reader, dropped)
    }
}

impl Read for DropTrackingReader {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.inner.read(buf)
    }
}

impl Drop for DropTrackingReader {
    fn drop(&mut self) {
        self.dropped.set(true);
    }
}
