//! Data models for CSV ingestion
//!
//! This module contains the core data structures flowing through the
//! ingestion pipeline: the decoded row, the required header schema, and the
//! validated record handed to a record store.

use crate::constants::{HEADER_LIST_SEPARATOR, REQUIRED_HEADERS};
use serde::{Deserialize, Serialize};
use std::fmt;

// =============================================================================
// Raw Row Structure
// =============================================================================

/// One decoded row of an upload, before validation
///
/// `line` is 1-based and counts the header as line 1, so the first data row
/// is line 2.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawRow {
    /// 1-based line number of the row
    pub line: usize,

    /// Cell values in file order, untrimmed
    pub cells: Vec<String>,
}

impl RawRow {
    pub fn new(line: usize, cells: Vec<String>) -> Self {
        Self { line, cells }
    }

    /// Number of cells in the row
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Cell at a zero-based position
    pub fn get(&self, index: usize) -> Option<&str> {
        self.cells.get(index).map(String::as_str)
    }
}

// =============================================================================
// Header Schema
// =============================================================================

/// Ordered list of column names a valid header must match exactly
///
/// The schema defines both the arity and the positional identity of the
/// columns. It is immutable and safe to share between concurrent runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Schema {
    field_names: &'static [&'static str],
}

impl Schema {
    /// The schema every upload is validated against
    pub const REQUIRED: Schema = Schema::new(REQUIRED_HEADERS);

    pub(crate) const fn new(field_names: &'static [&'static str]) -> Self {
        Self { field_names }
    }

    /// Column names in order
    pub fn field_names(&self) -> &'static [&'static str] {
        self.field_names
    }

    /// Name expected at a zero-based position
    pub fn field_name(&self, position: usize) -> Option<&'static str> {
        self.field_names.get(position).copied()
    }

    pub fn len(&self) -> usize {
        self.field_names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.field_names.is_empty()
    }

    /// Human-readable list used in error messages, e.g. `field1, field2`
    pub fn describe(&self) -> String {
        self.field_names.join(HEADER_LIST_SEPARATOR)
    }

    /// Header line a valid upload starts with, e.g. `field1,field2`
    pub fn header_line(&self) -> String {
        self.field_names.join(",")
    }
}

impl Default for Schema {
    fn default() -> Self {
        Self::REQUIRED
    }
}

impl fmt::Display for Schema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.describe())
    }
}

// =============================================================================
// Data Record Structure
// =============================================================================

/// Validated record produced from one data row
///
/// Both fields are trimmed and non-empty. Records carry no identity beyond
/// their values; keys, if any, are assigned by the record store.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DataRecord {
    field1: String,
    field2: String,
}

impl DataRecord {
    /// Number of fields a record holds
    pub const FIELD_COUNT: usize = 2;

    pub(crate) fn new(field1: impl Into<String>, field2: impl Into<String>) -> Self {
        Self {
            field1: field1.into(),
            field2: field2.into(),
        }
    }

    pub fn field1(&self) -> &str {
        &self.field1
    }

    pub fn field2(&self) -> &str {
        &self.field2
    }

    /// Field values in schema order
    pub fn values(&self) -> [&str; Self::FIELD_COUNT] {
        [&self.field1, &self.field2]
    }
}

impl TryFrom<Vec<String>> for DataRecord {
    type Error = Vec<String>;

    /// Build a record from exactly [`DataRecord::FIELD_COUNT`] values,
    /// handing the values back when the count does not match
    fn try_from(values: Vec<String>) -> std::result::Result<Self, Self::Error> {
        let [field1, field2]: [String; Self::FIELD_COUNT] = values.try_into()?;
        Ok(Self { field1, field2 })
    }
}
