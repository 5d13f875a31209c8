//! Fixed-width record decoding.
//!
//! Every spanned field of the dictionary is sliced out of the raw line and
//! classified as an integer, a text value, or null. Fields are independent
//! slices of the same line, so decode order does not matter.

use std::collections::BTreeMap;
use std::num::{IntErrorKind, ParseIntError};

use seer_model::{FieldDictionary, FieldValue};

use crate::error::RowDecodeError;

/// One decoded record: field name → value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DecodedRow {
    pub values: BTreeMap<String, FieldValue>,
    /// True when the line ended before the end of at least one span.
    pub truncated: bool,
}

impl DecodedRow {
    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.values.get(name)
    }
}

/// Classify one field slice.
///
/// - an integer literal (surrounding whitespace, sign, and leading zeros
///   allowed) becomes [`FieldValue::Int`]
/// - an empty or all-whitespace slice becomes [`FieldValue::Null`]
/// - any other text is kept verbatim as [`FieldValue::Text`]
///
/// # Errors
///
/// Returns the parse error when the slice is an integer literal that does
/// not fit in an `i64`.
pub fn classify_slice(raw: &str) -> Result<FieldValue, ParseIntError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(FieldValue::Null);
    }
    match trimmed.parse::<i64>() {
        Ok(value) => Ok(FieldValue::Int(value)),
        Err(err) if matches!(err.kind(), IntErrorKind::PosOverflow | IntErrorKind::NegOverflow) => {
            Err(err)
        }
        Err(_) => Ok(FieldValue::Text(raw.to_string())),
    }
}

/// Decode one record line against every spanned field of `dictionary`.
///
/// Lines shorter than a span are sliced leniently: the missing bytes are
/// treated as blank, and the row is flagged as truncated.
///
/// # Errors
///
/// Returns a [`RowDecodeError`] for empty records, slices that are not
/// valid UTF-8, and integer literals that overflow. The caller decides
/// whether to skip the row or abort.
pub fn decode_record(
    line: &[u8],
    dictionary: &FieldDictionary,
) -> Result<DecodedRow, RowDecodeError> {
    if line.is_empty() {
        return Err(RowDecodeError::EmptyRecord);
    }
    let mut row = DecodedRow::default();
    for spec in dictionary.spanned() {
        let Some(span) = spec.span else {
            continue;
        };
        if !span.fits(line.len()) {
            row.truncated = true;
        }
        let raw = std::str::from_utf8(span.slice(line)).map_err(|_| {
            RowDecodeError::InvalidUtf8 {
                field: spec.name.clone(),
            }
        })?;
        let value = classify_slice(raw).map_err(|_| RowDecodeError::IntegerOverflow {
            field: spec.name.clone(),
            raw: raw.to_string(),
        })?;
        row.values.insert(spec.name.clone(), value);
    }
    Ok(row)
}
