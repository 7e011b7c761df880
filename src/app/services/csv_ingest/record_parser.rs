//! Individual row parsing for uploaded CSV files
//!
//! This module turns one decoded data row into a [`DataRecord`]. Parsing is
//! schema-exact and fails closed: no coercion, no defaults, and the first
//! failing check decides the error.

use crate::app::models::{DataRecord, RawRow, Schema};
use crate::error::ParseError;

/// Parse a single data row into a record
///
/// Checks run in order:
/// 1. the row has at least as many cells as the schema has columns,
/// 2. every schema column, trimmed, is non-empty (first empty column wins).
///
/// Trimming strips characters up to and including U+0020 (space and ASCII
/// control characters). Other Unicode whitespace such as U+00A0 is kept.
///
/// Cells beyond the schema are ignored.
pub fn parse_row(row: &RawRow, schema: &Schema) -> Result<DataRecord, ParseError> {
    if row.len() < schema.len() {
        return Err(ParseError::InsufficientColumns {
            line: row.line,
            expected: schema.len(),
            found: row.len(),
        });
    }

    let mut values = Vec::with_capacity(schema.len());
    for (cell, field_name) in row.cells.iter().zip(schema.field_names()) {
        let value = trim_cell(cell);
        if value.is_empty() {
            return Err(ParseError::EmptyField {
                line: row.line,
                field_name: field_name.to_string(),
            });
        }
        values.push(value.to_string());
    }

    DataRecord::try_from(values).map_err(|values| ParseError::InsufficientColumns {
        line: row.line,
        expected: DataRecord::FIELD_COUNT,
        found: values.len(),
    })
}

fn trim_cell(cell: &str) -> &str {
    cell.trim_matches(|c: char| c <= ' ')
}
