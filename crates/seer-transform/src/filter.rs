//! Cohort filter pipeline.
//!
//! Steps run in order, each keeping the rows where one `column OP value`
//! comparison holds. Filtering is stable: surviving rows keep their
//! relative order, and a step never adds rows. After the configured steps,
//! rows with a null in any column can be dropped.

use polars::prelude::{BooleanChunked, DataFrame, NewChunkedArray};
use serde::{Deserialize, Serialize};
use tracing::info;

use seer_ingest::complete_rows;
use seer_model::schema::{AGE_AT_DIAGNOSIS, AJCC_STAGE, SEX, SURVIVAL_MONTHS, YEAR_OF_DIAGNOSIS};

use crate::error::Result;
use crate::predicate::{CompareOp, Condition};

const COMPLETE_ROWS_LABEL: &str = "complete rows";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterStep {
    #[serde(flatten)]
    pub condition: Condition,
    /// Human-readable label for reports; defaults to the condition itself.
    #[serde(default)]
    pub description: Option<String>,
}

impl FilterStep {
    pub fn new(column: impl Into<String>, op: CompareOp, value: i64) -> Self {
        Self {
            condition: Condition::new(column, op, value),
            description: None,
        }
    }

    #[must_use]
    pub fn described(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn label(&self) -> String {
        self.description
            .clone()
            .unwrap_or_else(|| self.condition.to_string())
    }
}

fn default_drop_incomplete() -> bool {
    true
}

/// An ordered list of filter steps.
///
/// The default is the Hsu et al. (2017) cohort; see [`CohortFilter::hsu_2017`].
/// A config that leaves out `steps` gets those steps too; `steps = []` keeps
/// every row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CohortFilter {
    #[serde(default = "hsu_2017_steps")]
    pub steps: Vec<FilterStep>,
    /// Drop rows containing any null after the steps have run.
    #[serde(default = "default_drop_incomplete")]
    pub drop_incomplete: bool,
}

impl Default for CohortFilter {
    fn default() -> Self {
        Self::hsu_2017()
    }
}

impl CohortFilter {
    pub fn new(steps: Vec<FilterStep>) -> Self {
        Self {
            steps,
            drop_incomplete: true,
        }
    }

    /// Women aged 18-64 diagnosed 2007-2008 with a known AJCC stage above 0
    /// and at most 60 months of survival follow-up.
    pub fn hsu_2017() -> Self {
        Self::new(hsu_2017_steps())
    }
}

fn hsu_2017_steps() -> Vec<FilterStep> {
    vec![
        FilterStep::new(SEX, CompareOp::Eq, 2).described("women"),
        FilterStep::new(YEAR_OF_DIAGNOSIS, CompareOp::Ge, 2007)
            .described("diagnosed in or after 2007"),
        FilterStep::new(YEAR_OF_DIAGNOSIS, CompareOp::Le, 2008)
            .described("diagnosed in or before 2008"),
        FilterStep::new(AGE_AT_DIAGNOSIS, CompareOp::Ge, 18).described("aged 18 or older"),
        FilterStep::new(AGE_AT_DIAGNOSIS, CompareOp::Le, 64).described("aged 64 or younger"),
        FilterStep::new(AJCC_STAGE, CompareOp::Gt, 0).described("AJCC 6th stage above 0"),
        FilterStep::new(SURVIVAL_MONTHS, CompareOp::Le, 60)
            .described("survival of 60 months or less"),
    ]
}

/// Row count after one filter step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StepCount {
    pub label: String,
    pub remaining: usize,
}

/// Attrition through the cohort filter.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CohortReport {
    pub initial_rows: usize,
    pub steps: Vec<StepCount>,
}

impl CohortReport {
    pub fn final_rows(&self) -> usize {
        self.steps
            .last()
            .map_or(self.initial_rows, |step| step.remaining)
    }
}

/// Keep the rows whose flag is set, preserving order.
pub fn filter_rows(df: &mut DataFrame, keep: &[bool]) -> Result<()> {
    let mask = BooleanChunked::from_slice("keep".into(), keep);
    *df = df.filter(&mask)?;
    Ok(())
}

/// Apply one step in place and return the remaining row count.
pub fn apply_step(df: &mut DataFrame, step: &FilterStep) -> Result<usize> {
    let keep = step.condition.evaluate(df)?;
    filter_rows(df, &keep)?;
    Ok(df.height())
}

/// Drop every row holding a null in any column.
pub fn drop_incomplete_rows(df: &mut DataFrame) -> Result<usize> {
    let keep = complete_rows(df);
    filter_rows(df, &keep)?;
    Ok(df.height())
}

/// Run every step of `filter` over `df` in order.
pub fn apply_cohort(df: &mut DataFrame, filter: &CohortFilter) -> Result<CohortReport> {
    let mut report = CohortReport {
        initial_rows: df.height(),
        steps: Vec::with_capacity(filter.steps.len() + 1),
    };
    info!(rows = report.initial_rows, "filtering cohort");
    for step in &filter.steps {
        let remaining = apply_step(df, step)?;
        let label = step.label();
        info!(step = %label, remaining, "filter step applied");
        report.steps.push(StepCount { label, remaining });
    }
    if filter.drop_incomplete {
        let remaining = drop_incomplete_rows(df)?;
        info!(step = COMPLETE_ROWS_LABEL, remaining, "filter step applied");
        report.steps.push(StepCount {
            label: COMPLETE_ROWS_LABEL.to_string(),
            remaining,
        });
    }
    Ok(report)
}
