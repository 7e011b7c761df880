//! Ingest command implementation
//!
//! Loads configuration, checks the upload, then opens the record store and
//! persists the upload's rows.

use super::shared::{destination, report_failure, report_success, setup_logging};
use crate::Result;
use crate::app::services::csv_ingest::{IngestPipeline, IngestSummary};
use crate::app::services::record_store::{MemoryRecordStore, RecordStore, SqliteRecordStore};
use crate::cli::args::{IngestArgs, OutputFormat};
use crate::config::Config;
use crate::error::IngestError;
use tracing::{debug, info};

/// Ingest command runner
pub fn run_ingest(args: IngestArgs) -> Result<IngestSummary> {
    setup_logging(args.get_log_level(), args.quiet)?;
    debug!("Ingest arguments: {:?}", args);

    args.validate()?;

    let config = args.apply_to(Config::from_env());
    config.validate()?;
    debug!("Loaded configuration: {:?}", config);

    let pipeline = IngestPipeline::from_config(&config);
    debug!(
        "Accepting '{}' uploads with header: {}",
        pipeline.required_extension(),
        pipeline.schema()
    );

    // A rejected upload never creates the database
    let upload = match pipeline.prepare_path(&args.file) {
        Ok(upload) => upload,
        Err(e) => return failed(e, args.output_format),
    };

    let mut store = open_store(&config)?;
    info!("Storing records from {} in {}", upload.filename(), destination(&config));

    match upload.persist_into(store.as_mut()) {
        Ok(summary) => {
            report_success(&summary, &config, args.output_format)?;
            Ok(summary)
        }
        Err(e) => failed(e, args.output_format),
    }
}

/// Open the store records are written to
fn open_store(config: &Config) -> Result<Box<dyn RecordStore>> {
    if config.dry_run {
        return Ok(Box::new(MemoryRecordStore::new()));
    }

    let store = SqliteRecordStore::open(&config.database_path, &config.table_name)?;
    debug!("Opened table '{}'", store.table());
    Ok(Box::new(store))
}

fn failed(error: IngestError, format: OutputFormat) -> Result<IngestSummary> {
    report_failure(&error, format)?;
    Err(error.into())
}
