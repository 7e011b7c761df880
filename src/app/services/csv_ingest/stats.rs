//! Result structures for successful ingestion runs

use serde::{Deserialize, Serialize};

/// Summary of a run that persisted every data row
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IngestSummary {
    /// Name of the ingested upload
    pub filename: String,

    /// Number of records handed to the record store
    pub records_persisted: usize,
}

impl IngestSummary {
    pub fn new(filename: impl Into<String>) -> Self {
        Self {
            filename: filename.into(),
            records_persisted: 0,
        }
    }

    /// Line number of the last persisted row, if any
    pub fn last_line(&self) -> Option<usize> {
        (self.records_persisted > 0).then(|| self.records_persisted + crate::constants::HEADER_LINE)
    }
}
