//! Polars AnyValue utility functions.
//!
//! Registry columns are `Int64` when every decoded value was an integer or
//! null, and `String` otherwise. These helpers read either kind as integers.

use polars::prelude::*;

/// Converts an AnyValue to i64, returning None for non-integer or null values.
pub fn any_to_i64(value: AnyValue<'_>) -> Option<i64> {
    match value {
        AnyValue::Null => None,
        AnyValue::Int8(v) => Some(i64::from(v)),
        AnyValue::Int16(v) => Some(i64::from(v)),
        AnyValue::Int32(v) => Some(i64::from(v)),
        AnyValue::Int64(v) => Some(v),
        AnyValue::UInt8(v) => Some(i64::from(v)),
        AnyValue::UInt16(v) => Some(i64::from(v)),
        AnyValue::UInt32(v) => Some(i64::from(v)),
        AnyValue::UInt64(v) => i64::try_from(v).ok(),
        AnyValue::String(s) => parse_i64(s),
        AnyValue::StringOwned(s) => parse_i64(&s),
        _ => None,
    }
}

/// Parses a string as i64, returning None for invalid or empty strings.
pub fn parse_i64(value: &str) -> Option<i64> {
    if value.trim().is_empty() {
        return None;
    }
    value.trim().parse::<i64>().ok()
}

/// Read a column as integers; text that does not parse reads as `None`.
pub fn column_i64_values(df: &DataFrame, name: &str) -> PolarsResult<Vec<Option<i64>>> {
    let column = df.column(name)?;
    let mut values = Vec::with_capacity(df.height());
    for idx in 0..df.height() {
        values.push(any_to_i64(column.get(idx).unwrap_or(AnyValue::Null)));
    }
    Ok(values)
}

/// Per-row flag: true when every column of the row is non-null.
pub fn complete_rows(df: &DataFrame) -> Vec<bool> {
    let mut keep = vec![true; df.height()];
    for column in df.get_columns() {
        if column.null_count() == 0 {
            continue;
        }
        for (idx, flag) in keep.iter_mut().enumerate() {
            if *flag && matches!(column.get(idx), Ok(AnyValue::Null) | Err(_)) {
                *flag = false;
            }
        }
    }
    keep
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_int_and_string_columns_as_integers() {
        let df = DataFrame::new(vec![
            Series::new("a".into(), vec![Some(1i64), None, Some(3)]).into(),
            Series::new("b".into(), vec![Some("4"), Some("x"), None]).into(),
        ])
        .expect("frame");
        assert_eq!(
            column_i64_values(&df, "a").expect("a"),
            vec![Some(1), None, Some(3)]
        );
        assert_eq!(
            column_i64_values(&df, "b").expect("b"),
            vec![Some(4), None, None]
        );
        assert!(column_i64_values(&df, "missing").is_err());
        assert_eq!(complete_rows(&df), vec![true, false, false]);
    }
}
