//! Error handling for CSV ingestion operations.
//!
//! Every failure the pipeline can report is a variant here. Row-level
//! failures are wrapped in [`IngestError::RowProcessing`] together with the
//! line they came from; nothing else adds context on the way up.

use thiserror::Error;

/// Failure of a whole ingestion run
#[derive(Error, Debug)]
pub enum IngestError {
    #[error("File is empty or null")]
    EmptyInput,

    #[error("File must be a CSV file: '{filename}' does not end with '{required_extension}'")]
    UnsupportedFormat {
        filename: String,
        required_extension: String,
    },

    #[error(
        "Invalid number of headers. Expected {expected} headers but found {actual}. Required headers are: {required}"
    )]
    HeaderCountMismatch {
        expected: usize,
        actual: usize,
        required: String,
    },

    #[error(
        "Invalid header found: '{actual}'. Expected header: '{expected}'. Required headers are: {required}"
    )]
    HeaderNameMismatch {
        position: usize,
        expected: String,
        actual: String,
        required: String,
    },

    #[error("CSV file is empty (no data rows)")]
    NoDataRows,

    #[error("Error processing line {line}: {reason}")]
    RowProcessing {
        line: usize,
        #[source]
        reason: RowError,
    },

    #[error("I/O error: {message}")]
    Io {
        message: String,
        #[source]
        source: std::io::Error,
    },
}

impl IngestError {
    /// Line number for row-level failures
    pub fn line(&self) -> Option<usize> {
        match self {
            Self::RowProcessing { line, .. } => Some(*line),
            _ => None,
        }
    }

    /// Short machine-readable name of the failure kind
    pub fn kind(&self) -> &'static str {
        match self {
            Self::EmptyInput => "empty_input",
            Self::UnsupportedFormat { .. } => "unsupported_format",
            Self::HeaderCountMismatch { .. } => "header_count_mismatch",
            Self::HeaderNameMismatch { .. } => "header_name_mismatch",
            Self::NoDataRows => "no_data_rows",
            Self::RowProcessing { reason, .. } => reason.kind(),
            Self::Io { .. } => "io",
        }
    }
}

/// Why a single data row could not be ingested
#[derive(Error, Debug)]
pub enum RowError {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Persistence(#[from] PersistenceError),

    #[error(transparent)]
    Malformed(#[from] DecodeError),
}

impl RowError {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Parse(ParseError::InsufficientColumns { .. }) => "insufficient_columns",
            Self::Parse(ParseError::EmptyField { .. }) => "empty_field",
            Self::Persistence(_) => "persistence_failure",
            Self::Malformed(_) => "malformed_row",
        }
    }
}

/// Record parser rejection
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("Record at line {line} has insufficient columns. Expected: {expected}, Found: {found}")]
    InsufficientColumns {
        line: usize,
        expected: usize,
        found: usize,
    },

    #[error("Empty value found for '{field_name}' at line {line}")]
    EmptyField { line: usize, field_name: String },
}

/// Row decoder failure
#[derive(Error, Debug)]
pub enum DecodeError {
    #[error("Failed to read line {line}: {source}")]
    Io {
        line: usize,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed CSV at line {line}: {source}")]
    Csv {
        line: usize,
        #[source]
        source: csv::Error,
    },

    #[error("Malformed CSV at line {line}: more than one record on the line")]
    MultipleRecords { line: usize },
}

impl DecodeError {
    pub fn line(&self) -> usize {
        match self {
            Self::Io { line, .. } | Self::Csv { line, .. } | Self::MultipleRecords { line } => {
                *line
            }
        }
    }
}

/// Record store rejection
#[derive(Error, Debug)]
pub enum PersistenceError {
    #[error("Record rejected: {message}")]
    Rejected { message: String },

    #[error("Database error: {message} ({source})")]
    Database {
        message: String,
        #[source]
        source: rusqlite::Error,
    },

    #[error("Storage I/O error: {message} ({source})")]
    Io {
        message: String,
        #[source]
        source: std::io::Error,
    },
}

impl PersistenceError {
    pub fn rejected(message: impl Into<String>) -> Self {
        Self::Rejected {
            message: message.into(),
        }
    }

    pub fn database(message: impl Into<String>, source: rusqlite::Error) -> Self {
        Self::Database {
            message: message.into(),
            source,
        }
    }
}

pub type IngestResult<T> = std::result::Result<T, IngestError>;
