//! SEER cohort study driver.
//!
//! Ties the workspace crates together: a [`StudyConfig`] names the registry
//! extract and cohort, [`run_study`] decodes, filters and derives the study
//! variables, and the result can be written as CSV and summarised as an
//! attrition table.

pub mod config;
pub mod logging;
pub mod output;
pub mod pipeline;
pub mod summary;

pub use config::{ConfigError, StudyConfig, load_study_config};
pub use logging::{LogConfig, LogFormat, init_logging, init_logging_with_writer};
pub use output::{OutputError, write_rows_csv};
pub use pipeline::{StudyResult, process_frame, run_study};
pub use summary::{describe_build, render_attrition};
