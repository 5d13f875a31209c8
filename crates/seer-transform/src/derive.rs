//! Derived-variable rules.
//!
//! A derived variable appends one `Int64` column of small category codes
//! and registers its code table in an extended [`FieldDictionary`]. Two
//! rule shapes exist:
//!
//! - [`CodeCategoryRule`]: categorise a coded source column by the labels
//!   of its code table. Labels are matched once per code, not per row.
//! - [`MaskRule`]: assign categories from boolean masks over one or more
//!   columns; later assignments override earlier ones.
//!
//! Rows that no group or mask selects stay null.

use std::collections::{BTreeMap, BTreeSet};

use polars::prelude::{DataFrame, NamedFrom, Series};
use tracing::{debug, info};

use seer_ingest::column_i64_values;
use seer_model::{AjccStage, CodeTable, FieldDictionary};

use crate::error::{Result, TransformError};
use crate::predicate::Mask;

/// Test applied to a code's label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LabelMatcher {
    /// The label is one of the listed strings.
    Exact(BTreeSet<String>),
    /// The label starts with the token.
    Prefix(String),
    /// The code's precomputed stage group equals the stage.
    Stage(AjccStage),
}

impl LabelMatcher {
    pub fn exact<I, S>(labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::Exact(labels.into_iter().map(Into::into).collect())
    }

    pub fn prefix(token: impl Into<String>) -> Self {
        Self::Prefix(token.into())
    }
}

/// Ordered `(category, matcher)` groups over a coded source column.
/// The first matching group wins.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeCategoryRule {
    pub source: String,
    pub groups: Vec<(i64, LabelMatcher)>,
}

impl CodeCategoryRule {
    /// Resolve every code of the source code table to its category.
    pub fn category_map(&self, dictionary: &FieldDictionary) -> Result<BTreeMap<i64, i64>> {
        let codes = dictionary.code_table(&self.source)?;
        let needs_stages = self
            .groups
            .iter()
            .any(|(_, matcher)| matches!(matcher, LabelMatcher::Stage(_)));
        let stages = if needs_stages {
            Some(dictionary.stage_index(&self.source)?)
        } else {
            None
        };

        let mut categories = BTreeMap::new();
        for (code, label) in codes.iter() {
            let category = self.groups.iter().find_map(|(category, matcher)| {
                let hit = match matcher {
                    LabelMatcher::Exact(labels) => labels.contains(label),
                    LabelMatcher::Prefix(token) => label.starts_with(token.as_str()),
                    LabelMatcher::Stage(stage) => {
                        stages.and_then(|index| index.stage(code)) == Some(*stage)
                    }
                };
                hit.then_some(*category)
            });
            if let Some(category) = category {
                categories.insert(code, category);
            }
        }
        Ok(categories)
    }

    fn evaluate(&self, df: &DataFrame, dictionary: &FieldDictionary) -> Result<Vec<Option<i64>>> {
        let categories = self.category_map(dictionary)?;
        debug!(source = %self.source, codes = categories.len(), "resolved code categories");
        let values = source_values(df, &self.source)?;
        Ok(values
            .into_iter()
            .map(|value| value.and_then(|code| categories.get(&code).copied()))
            .collect())
    }
}

/// Ordered `(category, mask)` assignments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MaskRule {
    pub assignments: Vec<(i64, Mask)>,
}

impl MaskRule {
    fn evaluate(&self, df: &DataFrame) -> Result<Vec<Option<i64>>> {
        let mut values = vec![None; df.height()];
        for (category, mask) in &self.assignments {
            for (slot, hit) in values.iter_mut().zip(mask.evaluate(df)?) {
                if hit {
                    *slot = Some(*category);
                }
            }
        }
        Ok(values)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DerivationRule {
    Codes(CodeCategoryRule),
    Masks(MaskRule),
}

/// One derived column: its name, category code table, and rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DerivedVariable {
    pub name: String,
    pub codes: CodeTable,
    pub rule: DerivationRule,
}

impl DerivedVariable {
    /// Compute the column values for `df`.
    ///
    /// Every value is either a key of [`DerivedVariable::codes`] or null.
    pub fn evaluate(
        &self,
        df: &DataFrame,
        dictionary: &FieldDictionary,
    ) -> Result<Vec<Option<i64>>> {
        let values = match &self.rule {
            DerivationRule::Codes(rule) => rule.evaluate(df, dictionary)?,
            DerivationRule::Masks(rule) => rule.evaluate(df)?,
        };
        if let Some(value) = values
            .iter()
            .flatten()
            .find(|value| !self.codes.contains(**value))
        {
            return Err(TransformError::CategoryOutOfRange {
                name: self.name.clone(),
                value: *value,
            });
        }
        Ok(values)
    }
}

fn source_values(df: &DataFrame, name: &str) -> Result<Vec<Option<i64>>> {
    if df.column(name).is_err() {
        return Err(TransformError::MissingColumn {
            name: name.to_string(),
        });
    }
    Ok(column_i64_values(df, name)?)
}

/// Append every derived column to `df` and return the dictionary extended
/// with their code tables.
///
/// Variables are applied in order, so a later rule may read a column that
/// an earlier one derived. On error `df` is left untouched.
pub fn apply_derivations(
    df: &mut DataFrame,
    dictionary: FieldDictionary,
    variables: &[DerivedVariable],
) -> Result<FieldDictionary> {
    let mut staged = df.clone();
    let mut dictionary = dictionary;
    for variable in variables {
        dictionary = dictionary.register(variable.name.as_str(), variable.codes.clone())?;
        let values = variable.evaluate(&staged, &dictionary)?;
        let assigned = values.iter().flatten().count();
        staged.with_column(Series::new(variable.name.as_str().into(), values))?;
        info!(
            variable = %variable.name,
            assigned,
            rows = staged.height(),
            "derived column added"
        );
    }
    *df = staged;
    Ok(dictionary)
}
