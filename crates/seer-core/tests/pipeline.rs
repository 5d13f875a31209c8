//! End-to-end study runs over small fixed-width extracts.

use std::fs;
use std::path::Path;

use seer_core::{StudyConfig, load_study_config, process_frame, render_attrition, run_study};
use seer_ingest::{IngestOptions, build_table, column_i64_values};
use seer_model::schema::PATIENT_ID;
use seer_model::seer_nov_2016;
use seer_transform::study::{
    AGE_GROUP, CANCER_STAGE_NUM, EARLY_LATE_STAGE, HORMONE_RECEPTOR, MARITAL_GROUP,
};
use seer_transform::{CohortFilter, hsu_2017_derivations};

const RECORD_WIDTH: usize = 358;

struct Patient {
    id: &'static str,
    marital: &'static str,
    sex: &'static str,
    age: &'static str,
    year: &'static str,
    race: &'static str,
    insurance: &'static str,
    death: &'static str,
    er: &'static str,
    pr: &'static str,
    survival: &'static str,
    stage: &'static str,
}

impl Patient {
    fn eligible(id: &'static str) -> Self {
        Self {
            id,
            marital: "2",
            sex: "2",
            age: "045",
            year: "2007",
            race: "1",
            insurance: "3",
            death: "0",
            er: "1",
            pr: "2",
            survival: "0024",
            stage: "32",
        }
    }

    fn line(&self) -> String {
        let mut line = vec![b' '; RECORD_WIDTH];
        for (offset, text) in [
            (0, self.id),
            (18, self.marital),
            (23, self.sex),
            (24, self.age),
            (38, self.year),
            (233, self.race),
            (271, self.death),
            (277, self.er),
            (278, self.pr),
            (300, self.survival),
            (310, self.insurance),
            (329, self.stage),
        ] {
            line[offset..offset + text.len()].copy_from_slice(text.as_bytes());
        }
        String::from_utf8(line).expect("ascii record")
    }
}

fn fixture_lines() -> Vec<String> {
    vec![
        Patient::eligible("00000001"),
        Patient {
            sex: "1",
            ..Patient::eligible("00000002")
        },
        Patient {
            year: "2010",
            ..Patient::eligible("00000003")
        },
        Patient {
            age: "070",
            ..Patient::eligible("00000004")
        },
        Patient {
            insurance: " ",
            ..Patient::eligible("00000005")
        },
        Patient {
            marital: "1",
            age: "039",
            year: "2008",
            race: "2",
            insurance: "1",
            death: "1",
            er: "2",
            pr: "2",
            survival: "0012",
            stage: "53",
            ..Patient::eligible("00000006")
        },
    ]
    .iter()
    .map(Patient::line)
    .collect()
}

fn write_extract(dir: &Path) -> std::path::PathBuf {
    let path = dir.join("BREAST.TXT");
    let mut text = fixture_lines().join("\n");
    text.push('\n');
    fs::write(&path, text).expect("write extract");
    path
}

#[test]
fn study_run_filters_derives_and_writes() {
    let dir = tempfile::tempdir().expect("temp dir");
    let input = write_extract(dir.path());
    let output = dir.path().join("out").join("cohort.csv");
    let config = StudyConfig::new(&input).with_output(&output);

    let result = run_study(&config).expect("study run");

    assert_eq!(result.build.lines_read, 6);
    assert_eq!(result.build.rows_decoded, 6);
    assert_eq!(result.record_count(), 2);
    assert_eq!(
        column_i64_values(&result.frame, PATIENT_ID).expect("ids"),
        vec![Some(1), Some(6)]
    );
    assert_eq!(
        column_i64_values(&result.frame, EARLY_LATE_STAGE).expect("early/late"),
        vec![Some(1), Some(2)]
    );
    assert_eq!(
        column_i64_values(&result.frame, CANCER_STAGE_NUM).expect("stage num"),
        vec![Some(2), Some(3)]
    );
    assert_eq!(
        column_i64_values(&result.frame, HORMONE_RECEPTOR).expect("receptor"),
        vec![Some(1), Some(2)]
    );
    assert_eq!(
        column_i64_values(&result.frame, MARITAL_GROUP).expect("marital"),
        vec![Some(2), Some(1)]
    );
    assert_eq!(
        column_i64_values(&result.frame, AGE_GROUP).expect("age"),
        vec![Some(2), Some(1)]
    );
    assert_eq!(result.dictionary.len(), 17);

    insta::assert_json_snapshot!(result.cohort, @r#"
    {
      "initial_rows": 6,
      "steps": [
        {
          "label": "women",
          "remaining": 5
        },
        {
          "label": "diagnosed in or after 2007",
          "remaining": 5
        },
        {
          "label": "diagnosed in or before 2008",
          "remaining": 4
        },
        {
          "label": "aged 18 or older",
          "remaining": 4
        },
        {
          "label": "aged 64 or younger",
          "remaining": 3
        },
        {
          "label": "AJCC 6th stage above 0",
          "remaining": 3
        },
        {
          "label": "survival of 60 months or less",
          "remaining": 3
        },
        {
          "label": "complete rows",
          "remaining": 2
        }
      ]
    }
    "#);

    assert_eq!(result.output.as_deref(), Some(output.as_path()));
    let csv = fs::read_to_string(&output).expect("read output");
    let lines: Vec<&str> = csv.lines().collect();
    assert_eq!(lines.len(), 3);
    assert!(lines[0].starts_with("Patient ID number,Marital Status at DX,Sex,"));
    assert!(lines[0].ends_with("Marital Group,Age Group"));
    assert!(lines[1].starts_with("1,2,2,45,2007,"));
    assert!(lines[2].starts_with("6,1,2,39,2008,"));
}

#[test]
fn config_file_paths_resolve_next_to_the_config() {
    let dir = tempfile::tempdir().expect("temp dir");
    write_extract(dir.path());
    let config_path = dir.path().join("study.toml");
    fs::write(
        &config_path,
        "input = \"BREAST.TXT\"\n\n[cohort]\ndrop_incomplete = false\n\n\
         [[cohort.steps]]\ncolumn = \"Sex\"\nop = \"==\"\nvalue = 2\n",
    )
    .expect("write config");

    let config = load_study_config(&config_path).expect("load config");
    assert_eq!(config.input, dir.path().join("BREAST.TXT"));

    let result = run_study(&config).expect("study run");
    assert_eq!(result.record_count(), 5);
    assert_eq!(result.cohort.steps.len(), 1);
    assert!(result.output.is_none());
    assert!(render_attrition(&result.cohort).contains("Sex == 2"));
}

#[test]
fn in_memory_frames_run_through_the_same_stages() {
    let dictionary = seer_nov_2016().expect("schema");
    let frame =
        build_table(fixture_lines(), &dictionary, &IngestOptions::default()).expect("build");

    let result = process_frame(
        frame,
        dictionary,
        &CohortFilter::hsu_2017(),
        &hsu_2017_derivations(),
    )
    .expect("process");

    assert_eq!(result.cohort.initial_rows, 6);
    assert_eq!(result.record_count(), 2);
    assert_eq!(result.frame.width(), 17);
}

#[test]
fn missing_extract_names_the_file() {
    let dir = tempfile::tempdir().expect("temp dir");
    let config = StudyConfig::new(dir.path().join("absent.TXT"));
    let err = run_study(&config).expect_err("missing input");
    assert!(format!("{err:#}").contains("absent.TXT"));
}
