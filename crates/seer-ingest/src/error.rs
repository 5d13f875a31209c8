use std::path::{Path, PathBuf};

use polars::prelude::PolarsError;
use thiserror::Error;

/// Unexpected failure while decoding one record. The row is dropped.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RowDecodeError {
    #[error("record is empty")]
    EmptyRecord,
    #[error("field {field} is not valid UTF-8")]
    InvalidUtf8 { field: String },
    #[error("field {field} does not fit a 64-bit integer: {raw:?}")]
    IntegerOverflow { field: String, raw: String },
}

#[derive(Debug, Error)]
pub enum IngestError {
    #[error("failed to read registry file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("line {line_number}: {source}")]
    RowDecode {
        line_number: usize,
        #[source]
        source: RowDecodeError,
    },
    #[error("failed to build registry table: {0}")]
    Polars(#[from] PolarsError),
}

impl IngestError {
    pub(crate) fn io(path: &Path, source: std::io::Error) -> Self {
        Self::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}
