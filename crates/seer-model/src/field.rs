//! Field specifications for fixed-width registry records.
//!
//! A [`FieldSpec`] names one column of the extract. Raw columns carry a
//! [`Span`] into every record line; derived columns only carry a
//! [`CodeTable`] describing their categories.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Half-open byte interval `[start, end)` into a record line.
///
/// The registry documentation numbers positions from 1; spans are
/// 0-indexed. Use [`Span::from_positions`] to convert a documented
/// `first..=last` position range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub const fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// Build a span from 1-indexed inclusive positions as printed in the
    /// record layout documentation. A `first` of 0 is read as position 1.
    pub const fn from_positions(first: usize, last: usize) -> Self {
        Self {
            start: first.saturating_sub(1),
            end: last,
        }
    }

    pub const fn width(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    /// Returns true when a line of `len` bytes covers the whole span.
    pub const fn fits(&self, len: usize) -> bool {
        self.end <= len
    }

    /// Slice `line` by this span, clamping both ends to the line length.
    ///
    /// A line shorter than `end` yields a truncated (possibly empty) slice.
    pub fn slice<'a>(&self, line: &'a [u8]) -> &'a [u8] {
        let end = self.end.min(line.len());
        let start = self.start.min(end);
        &line[start..end]
    }
}

/// Mapping from a raw integer code to its human-readable label.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodeTable {
    codes: BTreeMap<i64, String>,
}

impl CodeTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_pairs<I, S>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (i64, S)>,
        S: Into<String>,
    {
        Self {
            codes: pairs
                .into_iter()
                .map(|(code, label)| (code, label.into()))
                .collect(),
        }
    }

    pub fn label(&self, code: i64) -> Option<&str> {
        self.codes.get(&code).map(String::as_str)
    }

    pub fn contains(&self, code: i64) -> bool {
        self.codes.contains_key(&code)
    }

    /// Iterate `(code, label)` pairs in ascending code order.
    pub fn iter(&self) -> impl Iterator<Item = (i64, &str)> {
        self.codes.iter().map(|(code, label)| (*code, label.as_str()))
    }

    /// Codes whose label satisfies `predicate`.
    pub fn codes_where<F>(&self, mut predicate: F) -> Vec<i64>
    where
        F: FnMut(&str) -> bool,
    {
        self.iter()
            .filter(|(_, label)| predicate(label))
            .map(|(code, _)| code)
            .collect()
    }

    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }
}

/// One named column of the registry extract.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldSpec {
    pub name: String,
    /// Byte span for raw columns; `None` for derived columns.
    pub span: Option<Span>,
    pub codes: Option<CodeTable>,
}

impl FieldSpec {
    /// A raw column read from the record line.
    pub fn raw(name: impl Into<String>, span: Span) -> Self {
        Self {
            name: name.into(),
            span: Some(span),
            codes: None,
        }
    }

    /// A synthetic column produced by a derivation rule.
    pub fn derived(name: impl Into<String>, codes: CodeTable) -> Self {
        Self {
            name: name.into(),
            span: None,
            codes: Some(codes),
        }
    }

    #[must_use]
    pub fn with_codes(mut self, codes: CodeTable) -> Self {
        self.codes = Some(codes);
        self
    }

    pub fn label(&self, code: i64) -> Option<&str> {
        self.codes.as_ref().and_then(|codes| codes.label(code))
    }

    pub fn is_derived(&self) -> bool {
        self.span.is_none()
    }
}
