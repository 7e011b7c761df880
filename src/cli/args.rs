//! Command-line argument definitions for the CSV ingest tool
//!
//! This module defines the CLI interface using the clap derive API.

use crate::config::Config;
use crate::{Error, Result};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// CLI arguments for the CSV ingest tool
///
/// Validates an uploaded CSV file against the required `field1,field2`
/// header and stores each row as a record.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "csv-ingest",
    version,
    about = "Validate a two-column CSV upload and store each row as a record",
    long_about = "Checks that an upload is a non-empty .csv file whose header is exactly \
                  'field1,field2', then parses and stores every data row in order. The first \
                  invalid row stops the run and is reported with its line number; rows stored \
                  before it are kept."
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands
#[derive(Debug, Clone, Subcommand)]
pub enum Commands {
    /// Validate a CSV file and store its rows
    Ingest(IngestArgs),
    /// Print the required header schema
    Schema,
}

/// Arguments for the ingest command
#[derive(Debug, Clone, Parser)]
pub struct IngestArgs {
    /// CSV file to ingest
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// SQLite database receiving the records
    ///
    /// Overrides CSV_INGEST_DATABASE. Defaults to records.sqlite under the
    /// user data directory.
    #[arg(
        short = 'd',
        long = "database",
        value_name = "PATH",
        help = "SQLite database receiving the records"
    )]
    pub database: Option<PathBuf>,

    /// Table receiving the records
    ///
    /// Overrides CSV_INGEST_TABLE. Created if it does not exist.
    #[arg(
        short = 't',
        long = "table",
        value_name = "NAME",
        help = "Table receiving the records"
    )]
    pub table: Option<String>,

    /// Validate and parse without touching the database
    #[arg(
        long = "dry-run",
        help = "Validate and parse the file without storing anything"
    )]
    pub dry_run: bool,

    /// Logging verbosity level
    #[arg(
        short = 'v',
        long = "verbose",
        action = clap::ArgAction::Count,
        help = "Increase logging verbosity (-v: info, -vv: debug, -vvv: trace)"
    )]
    pub verbose: u8,

    /// Suppress output except errors
    #[arg(
        short = 'q',
        long = "quiet",
        help = "Suppress output except errors",
        conflicts_with = "verbose"
    )]
    pub quiet: bool,

    /// Output format for the result
    #[arg(
        long = "output-format",
        value_enum,
        default_value = "human",
        help = "Output format for results"
    )]
    pub output_format: OutputFormat,
}

/// Output format options for results
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable output
    Human,
    /// JSON format for scripting
    Json,
}

impl IngestArgs {
    /// Validate the ingest command arguments
    pub fn validate(&self) -> Result<()> {
        if !self.file.exists() {
            return Err(Error::configuration(format!(
                "Input file does not exist: {}",
                self.file.display()
            )));
        }

        if !self.file.is_file() {
            return Err(Error::configuration(format!(
                "Input path is not a file: {}",
                self.file.display()
            )));
        }

        Ok(())
    }

    /// Get log level based on verbosity flags
    pub fn get_log_level(&self) -> &'static str {
        if self.quiet {
            "error"
        } else {
            match self.verbose {
                0 => "warn",
                1 => "info",
                2 => "debug",
                _ => "trace",
            }
        }
    }

    /// Apply argument overrides on top of a loaded configuration
    pub fn apply_to(&self, mut config: Config) -> Config {
        if let Some(database) = &self.database {
            config.database_path = database.clone();
        }
        if let Some(table) = &self.table {
            config.table_name = table.clone();
        }
        config.dry_run = self.dry_run;
        config.log_level = self.get_log_level().to_string();
        config
    }
}
