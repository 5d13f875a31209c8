//! Study run: ingest, cohort filter, derived variables, output.

use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use polars::prelude::DataFrame;
use tracing::{info, info_span};

use seer_ingest::{BuildReport, RegistryFrame, read_registry_file};
use seer_model::{FieldDictionary, seer_nov_2016};
use seer_transform::{
    CohortFilter, CohortReport, DerivedVariable, apply_cohort, apply_derivations,
    hsu_2017_derivations,
};

use crate::config::StudyConfig;
use crate::output::write_rows_csv;

/// The analysis-ready rows of a study run and how they were produced.
#[derive(Debug)]
pub struct StudyResult {
    pub frame: DataFrame,
    /// The registry dictionary extended with the derived variables.
    pub dictionary: FieldDictionary,
    pub build: BuildReport,
    pub cohort: CohortReport,
    pub output: Option<PathBuf>,
}

impl StudyResult {
    pub fn record_count(&self) -> usize {
        self.frame.height()
    }
}

/// Filter and extend an in-memory registry frame.
///
/// The cohort filter runs first, then every derived variable in order.
pub fn process_frame(
    frame: RegistryFrame,
    dictionary: FieldDictionary,
    filter: &CohortFilter,
    derivations: &[DerivedVariable],
) -> Result<StudyResult> {
    let RegistryFrame {
        data: mut df,
        report: build,
        ..
    } = frame;

    let cohort_span = info_span!("cohort", steps = filter.steps.len());
    let cohort_start = Instant::now();
    let cohort = cohort_span
        .in_scope(|| apply_cohort(&mut df, filter))
        .context("apply cohort filter")?;
    info!(
        initial_rows = cohort.initial_rows,
        final_rows = cohort.final_rows(),
        duration_ms = cohort_start.elapsed().as_millis(),
        "cohort filter complete"
    );

    let derive_span = info_span!("derive", variables = derivations.len());
    let derive_start = Instant::now();
    let dictionary = derive_span
        .in_scope(|| apply_derivations(&mut df, dictionary, derivations))
        .context("derive study variables")?;
    info!(
        columns = df.width(),
        duration_ms = derive_start.elapsed().as_millis(),
        "derived variables complete"
    );

    Ok(StudyResult {
        frame: df,
        dictionary,
        build,
        cohort,
        output: None,
    })
}

/// Run the study described by `config` end to end.
pub fn run_study(config: &StudyConfig) -> Result<StudyResult> {
    let dictionary = seer_nov_2016().context("build SEER dictionary")?;

    // =========================================================================
    // Stage 1: Ingest - decode the fixed-width extract
    // =========================================================================
    let ingest_span = info_span!("ingest", input = %config.input.display());
    let frame = ingest_span
        .in_scope(|| read_registry_file(&config.input, &dictionary, &config.ingest))
        .with_context(|| format!("load registry extract {}", config.input.display()))?;

    // =========================================================================
    // Stage 2: Cohort and derived variables
    // =========================================================================
    let mut result = process_frame(frame, dictionary, &config.cohort, &hsu_2017_derivations())?;

    // =========================================================================
    // Stage 3: Output
    // =========================================================================
    if let Some(path) = &config.output {
        let output_span = info_span!("output", path = %path.display());
        let output_start = Instant::now();
        output_span
            .in_scope(|| write_rows_csv(&mut result.frame, path))
            .context("write cohort rows")?;
        info!(
            rows = result.record_count(),
            duration_ms = output_start.elapsed().as_millis(),
            "cohort rows written"
        );
        result.output = Some(path.clone());
    }

    Ok(result)
}
