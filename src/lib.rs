//! CSV Ingest Library
//!
//! A Rust library for validating uploaded two-column CSV files and
//! persisting each row as a typed record.
//!
//! This library provides tools for:
//! - Decoding comma-delimited uploads while keeping empty lines significant
//! - Validating the header row against a fixed, ordered schema
//! - Parsing rows into trimmed, non-empty [`DataRecord`]s
//! - Persisting records one at a time through a [`RecordStore`]
//! - Fail-fast error reporting with the offending line number
//!
//! ```rust
//! use csv_ingest::{IngestPipeline, MemoryRecordStore};
//!
//! let upload = "field1,field2\n x ,y\np,q\n";
//! let mut store = MemoryRecordStore::new();
//!
//! let summary = IngestPipeline::new()
//!     .ingest(upload.as_bytes(), "upload.csv", &mut store)
//!     .unwrap();
//!
//! assert_eq!(summary.records_persisted, 2);
//! assert_eq!(store.records()[0].field1(), "x");
//! ```

pub mod config;
pub mod constants;
pub mod error;

// Core application modules
pub mod app {
    pub mod models;
    pub mod services {
        pub mod csv_ingest;
        pub mod record_store;
    }
}

// CLI modules
pub mod cli {
    pub mod args;
    pub mod commands;
}

// Re-export commonly used types
pub use app::models::{DataRecord, RawRow, Schema};
pub use app::services::csv_ingest::{IngestPipeline, IngestSummary, PreparedUpload, parse_row};
pub use app::services::record_store::{MemoryRecordStore, RecordStore, SqliteRecordStore};
pub use config::Config;
pub use error::{DecodeError, IngestError, ParseError, PersistenceError, RowError};

/// Result type alias for the CSV ingest tool
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level error types for CSV ingest operations
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// I/O operation failed
    #[error("I/O error: {message}")]
    Io {
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// Configuration error
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// Ingestion of an upload failed
    #[error("Error processing file: {0}")]
    Ingest(#[from] IngestError),

    /// Record store could not be opened or queried
    #[error("Record store error: {0}")]
    Persistence(#[from] PersistenceError),

    /// Result could not be serialized for output
    #[error("Serialization error: {message}")]
    Serialization {
        message: String,
        #[source]
        source: serde_json::Error,
    },
}

impl Error {
    /// Create an I/O error with context
    pub fn io(message: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            message: message.into(),
            source,
        }
    }

    /// Create a configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Create a serialization error
    pub fn serialization(message: impl Into<String>, source: serde_json::Error) -> Self {
        Self::Serialization {
            message: message.into(),
            source,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(error: std::io::Error) -> Self {
        Self::Io {
            message: "I/O operation failed".to_string(),
            source: error,
        }
    }
}
