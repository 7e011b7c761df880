//! Core ingestion pipeline implementation
//!
//! This module drives a whole run: precondition checks, header validation,
//! then parse-and-persist for every data row in file order. The first
//! failure aborts the run. Records persisted before the failure stay
//! persisted; the pipeline never rolls back.

use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::iter::Peekable;
use std::path::Path;
use tracing::{debug, error, info};

use super::decoder::RowDecoder;
use super::header::validate_headers;
use super::record_parser::parse_row;
use super::stats::IngestSummary;
use crate::app::models::{RawRow, Schema};
use crate::app::services::record_store::RecordStore;
use crate::config::Config;
use crate::constants::{HEADER_LINE, REQUIRED_EXTENSION};
use crate::error::{DecodeError, IngestError, IngestResult, RowError};

/// Sequential, fail-fast ingestion of one upload at a time
///
/// The pipeline holds no state between runs; one instance can serve any
/// number of uploads, including from several threads.
#[derive(Debug, Clone)]
pub struct IngestPipeline {
    schema: Schema,
    required_extension: String,
}

impl IngestPipeline {
    /// Create a pipeline for the required schema and `.csv` uploads
    pub fn new() -> Self {
        Self {
            schema: Schema::REQUIRED,
            required_extension: REQUIRED_EXTENSION.to_string(),
        }
    }

    /// Create a pipeline using the upload settings of a configuration
    pub fn from_config(config: &Config) -> Self {
        Self::new().with_required_extension(&config.required_extension)
    }

    /// Accept uploads ending with a different extension
    pub fn with_required_extension(mut self, extension: impl Into<String>) -> Self {
        self.required_extension = extension.into();
        self
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    pub fn required_extension(&self) -> &str {
        &self.required_extension
    }

    /// Ingest an upload from a file on disk
    ///
    /// The file name (without directories) is used for the extension check.
    pub fn ingest_path<S>(&self, path: &Path, store: &mut S) -> IngestResult<IngestSummary>
    where
        S: RecordStore + ?Sized,
    {
        self.prepare_path(path)?.persist_into(store)
    }

    /// Ingest an upload stream, persisting each record through `store`
    ///
    /// Runs [`prepare`](Self::prepare) and then
    /// [`PreparedUpload::persist_into`]. A parse or persistence failure is
    /// returned as [`IngestError::RowProcessing`] with the row's line number
    /// and no later row is read.
    pub fn ingest<R, S>(&self, reader: R, filename: &str, store: &mut S) -> IngestResult<IngestSummary>
    where
        R: Read,
        S: RecordStore + ?Sized,
    {
        self.prepare(reader, filename)?.persist_into(store)
    }

    /// Open a file on disk and check its upload preconditions
    pub fn prepare_path(&self, path: &Path) -> IngestResult<PreparedUpload<BufReader<File>>> {
        let filename = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();

        let file = File::open(path).map_err(|source| IngestError::Io {
            message: format!("Failed to open {}", path.display()),
            source,
        })?;

        self.prepare(file, &filename)
    }

    /// Check the upload preconditions without touching any store
    ///
    /// Checks, in order: the stream is non-empty, the filename carries the
    /// required extension, the header matches the schema, at least one data
    /// row follows.
    pub fn prepare<R>(&self, reader: R, filename: &str) -> IngestResult<PreparedUpload<BufReader<R>>>
    where
        R: Read,
    {
        let mut reader = BufReader::new(reader);

        let is_empty = reader
            .fill_buf()
            .map_err(|source| IngestError::Io {
                message: format!("Failed to read upload {}", filename),
                source,
            })?
            .is_empty();
        if is_empty {
            return Err(IngestError::EmptyInput);
        }

        self.check_extension(filename)?;

        info!("Processing file: {}", filename);

        let mut rows = RowDecoder::new(reader);

        let header = match rows.next() {
            Some(Ok(header)) => header,
            Some(Err(e)) => {
                return Err(IngestError::RowProcessing {
                    line: HEADER_LINE,
                    reason: RowError::Malformed(e),
                });
            }
            None => RawRow::new(HEADER_LINE, Vec::new()),
        };
        validate_headers(&header.cells, &self.schema)?;

        let mut rows = rows.peekable();
        if rows.peek().is_none() {
            return Err(IngestError::NoDataRows);
        }

        Ok(PreparedUpload {
            schema: self.schema,
            filename: filename.to_string(),
            rows,
        })
    }

    fn check_extension(&self, filename: &str) -> IngestResult<()> {
        let extension = self.required_extension.to_lowercase();
        if filename.to_lowercase().ends_with(&extension) {
            Ok(())
        } else {
            Err(IngestError::UnsupportedFormat {
                filename: filename.to_string(),
                required_extension: self.required_extension.clone(),
            })
        }
    }
}

impl Default for IngestPipeline {
    fn default() -> Self {
        Self::new()
    }
}

/// Upload that passed every precondition, with its data rows still unread
///
/// Dropping it releases the underlying stream without persisting anything.
pub struct PreparedUpload<R: BufRead> {
    schema: Schema,
    filename: String,
    rows: Peekable<RowDecoder<R>>,
}

impl<R: BufRead> PreparedUpload<R> {
    pub fn filename(&self) -> &str {
        &self.filename
    }

    /// Parse and persist every data row in file order
    ///
    /// The first failure stops the run. Records persisted before it stay
    /// persisted.
    pub fn persist_into<S>(self, store: &mut S) -> IngestResult<IngestSummary>
    where
        S: RecordStore + ?Sized,
    {
        let mut summary = IngestSummary::new(self.filename.as_str());

        for row in self.rows {
            let line = match &row {
                Ok(row) => row.line,
                Err(e) => e.line(),
            };

            if let Err(reason) = process_row(row, &self.schema, store) {
                error!("Error processing line {}: {}", line, reason);
                return Err(IngestError::RowProcessing { line, reason });
            }

            summary.records_persisted += 1;
            info!("Successfully inserted record from line {}", line);
        }

        debug!(
            "Finished {}: {} records persisted",
            summary.filename, summary.records_persisted
        );

        Ok(summary)
    }
}

/// Parse one decoded row and hand the record to the store
fn process_row<S>(
    row: Result<RawRow, DecodeError>,
    schema: &Schema,
    store: &mut S,
) -> Result<(), RowError>
where
    S: RecordStore + ?Sized,
{
    let row = row?;
    let record = parse_row(&row, schema)?;
    store.insert_record(&record)?;
    Ok(())
}
