//! Tests for the cohort filter pipeline.

use polars::prelude::{Column, DataFrame, IntoColumn, NamedFrom, Series};
use proptest::prelude::*;

use seer_ingest::column_i64_values;
use seer_model::schema::{AGE_AT_DIAGNOSIS, AJCC_STAGE, SEX, SURVIVAL_MONTHS, YEAR_OF_DIAGNOSIS};
use seer_transform::{CohortFilter, CompareOp, FilterStep, TransformError, apply_cohort, apply_step};

fn test_df(columns: Vec<(&str, Vec<Option<i64>>)>) -> DataFrame {
    let cols: Vec<Column> = columns
        .into_iter()
        .map(|(name, values)| Series::new(name.into(), values).into_column())
        .collect();
    DataFrame::new(cols).unwrap()
}

fn some(values: &[i64]) -> Vec<Option<i64>> {
    values.iter().copied().map(Some).collect()
}

#[test]
fn sex_filter_keeps_seven_of_ten_in_order() {
    let ids: Vec<Option<i64>> = (1..=10).map(Some).collect();
    let sex = [2, 1, 2, 2, 1, 2, 2, 1, 2, 2].map(Some).to_vec();
    let mut df = test_df(vec![("id", ids), (SEX, sex)]);

    let remaining = apply_step(&mut df, &FilterStep::new(SEX, CompareOp::Eq, 2)).unwrap();

    assert_eq!(remaining, 7);
    assert_eq!(
        column_i64_values(&df, "id").unwrap(),
        [1, 3, 4, 6, 7, 9, 10].map(Some).to_vec()
    );
}

#[test]
fn hsu_cohort_reports_attrition() {
    let mut df = test_df(vec![
        ("id", (1..=8).map(Some).collect()),
        (SEX, some(&[2, 1, 2, 2, 2, 2, 2, 2])),
        (YEAR_OF_DIAGNOSIS, some(&[2007, 2007, 2006, 2008, 2008, 2007, 2007, 2008])),
        (AGE_AT_DIAGNOSIS, some(&[45, 45, 45, 70, 30, 50, 50, 64])),
        (AJCC_STAGE, some(&[10, 10, 10, 10, 53, 0, 32, 70])),
        (SURVIVAL_MONTHS, some(&[12, 12, 12, 12, 61, 12, 24, 5])),
        (
            "Insurance recode",
            vec![Some(3), Some(3), Some(3), Some(3), Some(3), Some(3), None, Some(1)],
        ),
    ]);

    let report = apply_cohort(&mut df, &CohortFilter::hsu_2017()).unwrap();

    let remaining: Vec<usize> = report.steps.iter().map(|step| step.remaining).collect();
    assert_eq!(report.initial_rows, 8);
    assert_eq!(remaining, vec![7, 6, 6, 6, 5, 4, 3, 2]);
    assert_eq!(report.steps[0].label, "women");
    assert_eq!(report.steps.last().unwrap().label, "complete rows");
    assert_eq!(report.final_rows(), 2);
    assert_eq!(column_i64_values(&df, "id").unwrap(), vec![Some(1), Some(8)]);
}

#[test]
fn nulls_fail_every_comparison() {
    let mut df = test_df(vec![(SEX, vec![Some(2), None, Some(2)])]);
    let remaining = apply_step(&mut df, &FilterStep::new(SEX, CompareOp::Ne, 1)).unwrap();
    assert_eq!(remaining, 2);
}

#[test]
fn unknown_filter_column_is_an_error() {
    let mut df = test_df(vec![(SEX, vec![Some(2)])]);
    let err = apply_step(&mut df, &FilterStep::new("Nope", CompareOp::Eq, 1)).unwrap_err();
    assert!(matches!(err, TransformError::MissingColumn { .. }));
}

#[test]
fn cohort_filter_reads_from_toml() {
    let filter: CohortFilter = toml::from_str(
        r#"
        drop_incomplete = false

        [[steps]]
        column = "Sex"
        op = "=="
        value = 2
        description = "women"

        [[steps]]
        column = "Age at diagnosis"
        op = "<="
        value = 64
        "#,
    )
    .unwrap();
    assert!(!filter.drop_incomplete);
    assert_eq!(
        filter.steps,
        vec![
            FilterStep::new(SEX, CompareOp::Eq, 2).described("women"),
            FilterStep::new(AGE_AT_DIAGNOSIS, CompareOp::Le, 64),
        ]
    );
    assert_eq!(filter.steps[1].label(), "Age at diagnosis <= 64");
}

#[test]
fn cohort_filter_json_round_trip() {
    let filter = CohortFilter::hsu_2017();
    let json = serde_json::to_string(&filter).unwrap();
    let round: CohortFilter = serde_json::from_str(&json).unwrap();
    assert_eq!(round, filter);
}

fn op_strategy() -> impl Strategy<Value = CompareOp> {
    prop_oneof![
        Just(CompareOp::Eq),
        Just(CompareOp::Ne),
        Just(CompareOp::Lt),
        Just(CompareOp::Le),
        Just(CompareOp::Gt),
        Just(CompareOp::Ge),
    ]
}

proptest! {
    #[test]
    fn filter_steps_never_add_rows(
        values in proptest::collection::vec(proptest::option::of(0i64..5), 0..60),
        steps in proptest::collection::vec((op_strategy(), 0i64..5), 1..6),
    ) {
        let ids: Vec<Option<i64>> = (0..values.len() as i64).map(Some).collect();
        let mut df = test_df(vec![("id", ids), ("v", values)]);
        let mut previous = df.height();
        for (op, value) in steps {
            let remaining = apply_step(&mut df, &FilterStep::new("v", op, value)).unwrap();
            prop_assert!(remaining <= previous);
            previous = remaining;
        }
        let ids: Vec<i64> = column_i64_values(&df, "id").unwrap().into_iter().flatten().collect();
        let mut sorted = ids.clone();
        sorted.sort_unstable();
        prop_assert_eq!(ids, sorted);
    }
}
