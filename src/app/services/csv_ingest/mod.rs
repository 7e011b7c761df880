//! CSV ingestion pipeline for two-column uploads
//!
//! This module turns an uploaded byte stream into persisted records. Every
//! run is fail-fast: the first problem found stops the run and is reported
//! with the line it came from.
//!
//! ## Architecture
//!
//! The pipeline is organized into logical components:
//! - [`decoder`] - Byte stream to [`RawRow`](crate::RawRow) decoding
//! - [`header`] - Header row validation against the required schema
//! - [`record_parser`] - Individual row validation and trimming
//! - [`pipeline`] - Precondition checks, then the parse-and-persist loop
//! - [`stats`] - Summary returned by a successful run
//!
//! ## Usage
//!
//! ```rust
//! use csv_ingest::{IngestError, IngestPipeline, MemoryRecordStore};
//!
//! let mut store = MemoryRecordStore::new();
//! let result = IngestPipeline::new().ingest(
//!     "field1,field2\na,\n".as_bytes(),
//!     "upload.csv",
//!     &mut store,
//! );
//!
//! match result {
//!     Err(IngestError::RowProcessing { line, reason }) => {
//!         assert_eq!(line, 2);
//!         assert_eq!(reason.to_string(), "Empty value found for 'field2' at line 2");
//!     }
//!     other => panic!("unexpected outcome: {:?}", other),
//! }
//! assert!(store.is_empty());
//! ```

pub mod decoder;
pub mod header;
pub mod pipeline;
pub mod record_parser;
pub mod stats;

#[cfg(test)]
pub mod tests;

// Re-export main types for easy access
pub use decoder::RowDecoder;
pub use header::validate_headers;
pub use pipeline::{IngestPipeline, PreparedUpload};
pub use record_parser::parse_row;
pub use stats::IngestSummary;
