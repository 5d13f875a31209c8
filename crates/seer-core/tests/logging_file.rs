//! Logging to a file.
//!
//! Installs the global subscriber, so it lives in its own test binary.

use std::fs;

use seer_core::{LogConfig, LogFormat, init_logging};
use seer_ingest::{IngestOptions, build_table};
use seer_model::seer_nov_2016;

#[test]
fn compact_logs_append_to_the_log_file() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("study.log");
    let config = LogConfig::default()
        .with_format(LogFormat::Compact)
        .with_ansi(false)
        .with_log_file(Some(path.clone()));
    init_logging(&config).expect("init logging");

    let dict = seer_nov_2016().expect("schema");
    let lines = vec![String::new(), "00000002".to_string()];
    build_table(&lines, &dict, &IngestOptions::default()).expect("build");

    let text = fs::read_to_string(&path).expect("read log file");
    assert!(text.contains("skipping row"), "{text}");
    assert!(text.contains("line_number=1"), "{text}");
    assert!(text.contains("registry table loaded"), "{text}");
}
