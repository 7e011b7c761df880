//! Header row validation
//!
//! An upload header must match the schema exactly: same number of columns,
//! same names, same order. Names are compared as-is, without trimming or
//! case folding.

use tracing::info;

use crate::app::models::Schema;
use crate::error::{IngestError, IngestResult};

/// Validate decoded header names against the schema
///
/// The column count is checked first; the first positional name mismatch is
/// reported after that.
pub fn validate_headers(actual: &[String], schema: &Schema) -> IngestResult<()> {
    info!("Validating headers: {:?}", actual);

    if actual.len() != schema.len() {
        return Err(IngestError::HeaderCountMismatch {
            expected: schema.len(),
            actual: actual.len(),
            required: schema.describe(),
        });
    }

    let mismatch = schema
        .field_names()
        .iter()
        .zip(actual)
        .enumerate()
        .find(|(_, (expected, actual))| **expected != actual.as_str());

    if let Some((position, (expected, actual))) = mismatch {
        return Err(IngestError::HeaderNameMismatch {
            position,
            expected: expected.to_string(),
            actual: actual.clone(),
            required: schema.describe(),
        });
    }

    Ok(())
}
