//! Row predicates over integer-valued columns.
//!
//! A [`Condition`] compares one column against an integer literal. A
//! [`Mask`] combines conditions with `any`/`all`. Null cells, and text
//! cells that do not read as integers, never satisfy a comparison.

use std::fmt;

use polars::prelude::DataFrame;
use serde::{Deserialize, Serialize};

use seer_ingest::column_i64_values;

use crate::error::{Result, TransformError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CompareOp {
    #[serde(rename = "==")]
    Eq,
    #[serde(rename = "!=")]
    Ne,
    #[serde(rename = "<")]
    Lt,
    #[serde(rename = "<=")]
    Le,
    #[serde(rename = ">")]
    Gt,
    #[serde(rename = ">=")]
    Ge,
}

impl CompareOp {
    pub fn symbol(self) -> &'static str {
        match self {
            Self::Eq => "==",
            Self::Ne => "!=",
            Self::Lt => "<",
            Self::Le => "<=",
            Self::Gt => ">",
            Self::Ge => ">=",
        }
    }

    pub fn holds(self, lhs: i64, rhs: i64) -> bool {
        match self {
            Self::Eq => lhs == rhs,
            Self::Ne => lhs != rhs,
            Self::Lt => lhs < rhs,
            Self::Le => lhs <= rhs,
            Self::Gt => lhs > rhs,
            Self::Ge => lhs >= rhs,
        }
    }
}

impl fmt::Display for CompareOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// `column OP value`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Condition {
    pub column: String,
    pub op: CompareOp,
    pub value: i64,
}

impl Condition {
    pub fn new(column: impl Into<String>, op: CompareOp, value: i64) -> Self {
        Self {
            column: column.into(),
            op,
            value,
        }
    }

    pub fn eq(column: impl Into<String>, value: i64) -> Self {
        Self::new(column, CompareOp::Eq, value)
    }

    /// Evaluate the condition for every row of `df`.
    pub fn evaluate(&self, df: &DataFrame) -> Result<Vec<bool>> {
        if df.column(&self.column).is_err() {
            return Err(TransformError::MissingColumn {
                name: self.column.clone(),
            });
        }
        let values = column_i64_values(df, &self.column)?;
        Ok(values
            .into_iter()
            .map(|value| value.is_some_and(|lhs| self.op.holds(lhs, self.value)))
            .collect())
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.column, self.op, self.value)
    }
}

/// Boolean combination of conditions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Mask {
    When(Condition),
    /// True when any member holds; false for an empty list.
    Any(Vec<Mask>),
    /// True when every member holds; true for an empty list.
    All(Vec<Mask>),
}

impl Mask {
    pub fn any<I: IntoIterator<Item = Condition>>(conditions: I) -> Self {
        Self::Any(conditions.into_iter().map(Self::When).collect())
    }

    pub fn all<I: IntoIterator<Item = Condition>>(conditions: I) -> Self {
        Self::All(conditions.into_iter().map(Self::When).collect())
    }

    pub fn evaluate(&self, df: &DataFrame) -> Result<Vec<bool>> {
        match self {
            Self::When(condition) => condition.evaluate(df),
            Self::Any(members) => {
                let mut acc = vec![false; df.height()];
                for member in members {
                    for (slot, hit) in acc.iter_mut().zip(member.evaluate(df)?) {
                        *slot |= hit;
                    }
                }
                Ok(acc)
            }
            Self::All(members) => {
                let mut acc = vec![true; df.height()];
                for member in members {
                    for (slot, hit) in acc.iter_mut().zip(member.evaluate(df)?) {
                        *slot &= hit;
                    }
                }
                Ok(acc)
            }
        }
    }
}

impl From<Condition> for Mask {
    fn from(condition: Condition) -> Self {
        Self::When(condition)
    }
}
