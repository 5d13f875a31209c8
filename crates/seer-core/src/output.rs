//! CSV output of analysis-ready rows.

use std::fs::{self, File};
use std::path::{Path, PathBuf};

use polars::prelude::{CsvWriter, DataFrame, PolarsError, SerWriter};

#[derive(Debug, thiserror::Error)]
pub enum OutputError {
    #[error("failed to create {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write CSV {path}: {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: PolarsError,
    },
}

/// Write `df` to `path` as CSV with a header row, creating parent
/// directories as needed. Nulls become empty cells.
pub fn write_rows_csv(df: &mut DataFrame, path: &Path) -> Result<(), OutputError> {
    let io_error = |source| OutputError::Io {
        path: path.to_path_buf(),
        source,
    };
    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(io_error)?;
    }
    let mut file = File::create(path).map_err(io_error)?;
    CsvWriter::new(&mut file)
        .include_header(true)
        .finish(df)
        .map_err(|source| OutputError::Csv {
            path: path.to_path_buf(),
            source,
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use polars::prelude::{NamedFrom, Series};

    #[test]
    fn writes_header_and_empty_nulls() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("nested").join("rows.csv");
        let mut df = DataFrame::new(vec![
            Series::new("Sex".into(), vec![Some(2i64), None]).into(),
            Series::new("Age group".into(), vec![Some(1i64), Some(2)]).into(),
        ])
        .expect("frame");

        write_rows_csv(&mut df, &path).expect("write csv");

        let text = fs::read_to_string(&path).expect("read csv");
        assert_eq!(text, "Sex,Age group\n2,1\n,2\n");
    }
}
