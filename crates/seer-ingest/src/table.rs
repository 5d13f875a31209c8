//! Table building: decode every record line into a column-oriented frame.

use std::fs;
use std::path::Path;
use std::time::Instant;

use polars::prelude::{Column, DataFrame, NamedFrom, Series};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use seer_model::{FieldDictionary, FieldValue};

use crate::decode::decode_record;
use crate::error::IngestError;
use crate::frame::{BuildReport, RegistryFrame};

/// How row decode failures are handled.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DecodeMode {
    /// Skip the failing row with a warning and keep going.
    #[default]
    Lenient,
    /// Abort the build on the first failing row.
    Strict,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IngestOptions {
    #[serde(default)]
    pub decode_mode: DecodeMode,
}

impl IngestOptions {
    pub fn strict() -> Self {
        Self {
            decode_mode: DecodeMode::Strict,
        }
    }
}

struct ColumnBuilder {
    name: String,
    values: Vec<FieldValue>,
}

impl ColumnBuilder {
    fn into_column(self) -> Column {
        let has_text = self.values.iter().any(|value| value.as_text().is_some());
        if has_text {
            let values: Vec<Option<String>> = self
                .values
                .into_iter()
                .map(|value| match value {
                    FieldValue::Null => None,
                    other => Some(other.to_string()),
                })
                .collect();
            Series::new(self.name.as_str().into(), values).into()
        } else {
            let values: Vec<Option<i64>> = self.values.iter().map(FieldValue::as_int).collect();
            Series::new(self.name.as_str().into(), values).into()
        }
    }
}

/// Decode `lines` into a registry frame.
///
/// Rows keep input order; failed rows are skipped (or abort the build in
/// [`DecodeMode::Strict`]). The column set is every spanned field of
/// `dictionary`, in declaration order.
///
/// # Errors
///
/// Returns [`IngestError::RowDecode`] in strict mode, or a Polars error if
/// the frame cannot be assembled.
pub fn build_table<I, L>(
    lines: I,
    dictionary: &FieldDictionary,
    options: &IngestOptions,
) -> Result<RegistryFrame, IngestError>
where
    I: IntoIterator<Item = L>,
    L: AsRef<[u8]>,
{
    let start = Instant::now();
    let mut builders: Vec<ColumnBuilder> = dictionary
        .spanned()
        .map(|spec| ColumnBuilder {
            name: spec.name.clone(),
            values: Vec::new(),
        })
        .collect();
    let mut report = BuildReport::default();

    for (idx, line) in lines.into_iter().enumerate() {
        let line_number = idx + 1;
        report.lines_read += 1;
        let mut row = match decode_record(line.as_ref(), dictionary) {
            Ok(row) => row,
            Err(source) => match options.decode_mode {
                DecodeMode::Strict => {
                    return Err(IngestError::RowDecode {
                        line_number,
                        source,
                    });
                }
                DecodeMode::Lenient => {
                    warn!(line_number, error = %source, "skipping row");
                    report.rows_skipped += 1;
                    continue;
                }
            },
        };
        if row.truncated {
            report.truncated_rows += 1;
        }
        for builder in &mut builders {
            let value = row.values.remove(&builder.name).unwrap_or(FieldValue::Null);
            builder.values.push(value);
        }
        report.rows_decoded += 1;
    }

    if report.truncated_rows > 0 {
        warn!(
            truncated_rows = report.truncated_rows,
            "records shorter than the field layout; missing slices read as null"
        );
    }

    let columns: Vec<Column> = builders
        .into_iter()
        .map(ColumnBuilder::into_column)
        .collect();
    let data = DataFrame::new(columns)?;
    report.elapsed = start.elapsed();
    info!(
        lines = report.lines_read,
        rows = report.rows_decoded,
        skipped = report.rows_skipped,
        duration_ms = report.elapsed.as_millis(),
        "registry table loaded"
    );
    Ok(RegistryFrame::new(data, report))
}

/// Read a registry extract file and decode every line.
///
/// The file is read once in full. A trailing newline does not produce an
/// extra record, and `\r\n` line endings are accepted.
///
/// # Errors
///
/// Returns [`IngestError::Io`] when the file cannot be read, and anything
/// [`build_table`] returns.
pub fn read_registry_file(
    path: &Path,
    dictionary: &FieldDictionary,
    options: &IngestOptions,
) -> Result<RegistryFrame, IngestError> {
    debug!(path = %path.display(), "reading registry file");
    let bytes = fs::read(path).map_err(|source| IngestError::io(path, source))?;
    let mut frame = build_table(split_lines(&bytes), dictionary, options)?;
    frame.source_file = Some(path.to_path_buf());
    Ok(frame)
}

fn split_lines(bytes: &[u8]) -> Vec<&[u8]> {
    let body = bytes.strip_suffix(b"\n").unwrap_or(bytes);
    if body.is_empty() {
        return Vec::new();
    }
    body.split(|byte| *byte == b'\n')
        .map(|line| line.strip_suffix(b"\r").unwrap_or(line))
        .collect()
}
