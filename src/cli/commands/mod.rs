//! Command implementations for the CSV ingest CLI
//!
//! Each command is implemented in its own module.

pub mod ingest;
pub mod schema;
pub mod shared;

use crate::Result;
use crate::app::services::csv_ingest::IngestSummary;
use crate::cli::args::{Args, Commands};

/// Main command runner
///
/// Dispatches to the subcommand handler. Returns the ingest summary when a
/// file was ingested.
pub fn run(args: Args) -> Result<Option<IngestSummary>> {
    match args.command {
        Some(Commands::Ingest(ingest_args)) => ingest::run_ingest(ingest_args).map(Some),
        Some(Commands::Schema) => schema::run_schema().map(|_| None),
        None => Ok(None),
    }
}
