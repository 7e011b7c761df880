//! Shared components for CLI commands
//!
//! Logging setup and result reporting used by the command handlers.

use crate::app::services::csv_ingest::IngestSummary;
use crate::cli::args::OutputFormat;
use crate::config::Config;
use crate::constants::LOG_TARGET;
use crate::error::IngestError;
use crate::{Error, Result};
use colored::*;
use tracing::debug;

/// Set up structured logging at the given level
///
/// `RUST_LOG` takes precedence over the level when set. Calling this more
/// than once keeps the first subscriber.
pub fn setup_logging(log_level: &str, quiet: bool) -> Result<()> {
    use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("{}={}", LOG_TARGET, log_level)));

    let result = if quiet {
        // Minimal logging for quiet mode
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_level(true)
                    .with_writer(std::io::stderr)
                    .compact(),
            )
            .try_init()
    } else {
        // Standard logging with timestamps
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_level(true)
                    .with_timer(fmt::time::uptime())
                    .with_writer(std::io::stderr),
            )
            .try_init()
    };

    match result {
        Ok(()) => debug!("Logging initialized at level: {}", log_level),
        // A global subscriber is already installed
        Err(e) => debug!("Keeping existing logger: {}", e),
    }
    Ok(())
}

/// Describe where records went
pub fn destination(config: &Config) -> String {
    if config.dry_run {
        "memory (dry run)".to_string()
    } else {
        format!(
            "{} (table {})",
            config.database_path.display(),
            config.table_name
        )
    }
}

/// Report a successful run
pub fn report_success(summary: &IngestSummary, config: &Config, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Human => {
            println!("{}", "File processed successfully".bright_green().bold());
            println!("   • File: {}", summary.filename);
            println!(
                "   • Records stored: {}",
                summary.records_persisted.to_string().bright_white().bold()
            );
            println!("   • Destination: {}", destination(config));
        }
        OutputFormat::Json => {
            let report = serde_json::json!({
                "status": "success",
                "filename": summary.filename,
                "records_persisted": summary.records_persisted,
                "dry_run": config.dry_run,
                "destination": destination(config),
            });
            print_json(&report)?;
        }
    }
    Ok(())
}

/// Report a failed run on stdout when machine-readable output was asked for
///
/// Human-readable failures are printed by the binary on stderr.
pub fn report_failure(error: &IngestError, format: OutputFormat) -> Result<()> {
    if format == OutputFormat::Json {
        let report = serde_json::json!({
            "status": "failed",
            "kind": error.kind(),
            "line": error.line(),
            "message": error.to_string(),
        });
        print_json(&report)?;
    }
    Ok(())
}

fn print_json(value: &serde_json::Value) -> Result<()> {
    let text = serde_json::to_string_pretty(value)
        .map_err(|e| Error::serialization("Failed to serialize report", e))?;
    println!("{}", text);
    Ok(())
}
