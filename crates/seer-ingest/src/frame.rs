//! Registry frame: the decoded table plus how it was built.

use std::path::PathBuf;
use std::time::Duration;

use polars::prelude::DataFrame;
use serde::Serialize;

/// Counters collected while building a registry table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BuildReport {
    /// Input lines seen, including skipped ones.
    pub lines_read: usize,
    pub rows_decoded: usize,
    /// Rows dropped because a field failed to decode.
    pub rows_skipped: usize,
    /// Decoded rows whose line ended before the last span.
    pub truncated_rows: usize,
    pub elapsed: Duration,
}

/// A decoded registry extract.
///
/// Columns follow the dictionary's declaration order; row `i` is the
/// `i`-th successfully decoded input line.
#[derive(Debug, Clone)]
pub struct RegistryFrame {
    pub data: DataFrame,
    pub report: BuildReport,
    /// The file the frame was read from, if any.
    pub source_file: Option<PathBuf>,
}

impl RegistryFrame {
    pub fn new(data: DataFrame, report: BuildReport) -> Self {
        Self {
            data,
            report,
            source_file: None,
        }
    }

    /// Returns the number of records in the frame.
    pub fn record_count(&self) -> usize {
        self.data.height()
    }

    pub fn column_names(&self) -> Vec<String> {
        self.data
            .get_column_names()
            .into_iter()
            .map(ToString::to_string)
            .collect()
    }
}
