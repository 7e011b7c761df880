//! Test utilities for record store testing

use crate::app::models::DataRecord;


/// Helper to build a record
pub fn record(field1: &str, field2: &str) -> DataRecord {
    DataRecord::new(field1, field2)
}
