//! Application constants for the CSV ingest tool
//!
//! This module contains the fixed header schema, default values and
//! naming used throughout the ingestion pipeline and record stores.

// =============================================================================
// Required Header Schema
// =============================================================================

/// Column names a valid upload header must carry, in order
pub const REQUIRED_HEADERS: &[&str] = &["field1", "field2"];

/// Separator used when listing the required headers in error messages
pub const HEADER_LIST_SEPARATOR: &str = ", ";

// =============================================================================
// Upload Format
// =============================================================================

/// File extension an upload must end with (compared case-insensitively)
pub const REQUIRED_EXTENSION: &str = ".csv";

/// Cell delimiter for uploaded files
pub const FIELD_DELIMITER: u8 = b',';

/// Quote character for uploaded files
pub const QUOTE_CHAR: char = '"';

/// Line number of the header row; data rows start right after it
pub const HEADER_LINE: usize = 1;

// =============================================================================
// Record Store Defaults
// =============================================================================

/// Default table receiving ingested records
pub const DEFAULT_TABLE_NAME: &str = "data_records";

/// Application directory name under the user data directory
pub const APP_DIR_NAME: &str = "csv-ingest";

/// Default SQLite database filename
pub const DEFAULT_DATABASE_FILENAME: &str = "records.sqlite";

/// Environment variable overriding the database path
pub const ENV_DATABASE_PATH: &str = "CSV_INGEST_DATABASE";

/// Environment variable overriding the table name
pub const ENV_TABLE_NAME: &str = "CSV_INGEST_TABLE";

// =============================================================================
// Logging
// =============================================================================

/// Default log level when no verbosity flag is given
pub const DEFAULT_LOG_LEVEL: &str = "warn";

/// Target used for the tracing env filter
pub const LOG_TARGET: &str = "csv_ingest";
