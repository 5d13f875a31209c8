//! Cohort filtering and derived variables over decoded SEER tables.
//!
//! - **predicate**: column comparisons and boolean masks
//! - **filter**: the ordered cohort filter pipeline
//! - **derive**: code-table and mask driven derived columns
//! - **study**: the derived variables of the Hsu et al. (2017) study

pub mod derive;
pub mod error;
pub mod filter;
pub mod predicate;
pub mod study;

pub use derive::{
    CodeCategoryRule, DerivationRule, DerivedVariable, LabelMatcher, MaskRule, apply_derivations,
};
pub use error::{Result, TransformError};
pub use filter::{
    CohortFilter, CohortReport, FilterStep, StepCount, apply_cohort, apply_step,
    drop_incomplete_rows, filter_rows,
};
pub use predicate::{CompareOp, Condition, Mask};
pub use study::hsu_2017_derivations;
