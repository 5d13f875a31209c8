//! Property tests for record decoding and table building.

use proptest::prelude::*;

use seer_ingest::{IngestOptions, build_table, classify_slice, column_i64_values, decode_record};
use seer_model::schema::PATIENT_ID;
use seer_model::{FieldValue, seer_nov_2016};

fn ascii_line() -> impl Strategy<Value = String> {
    proptest::string::string_regex("[ 0-9A-Z]{0,340}").expect("line regex")
}

proptest! {
    #[test]
    fn decoding_is_deterministic(line in ascii_line()) {
        let dict = seer_nov_2016().expect("schema");
        let first = decode_record(line.as_bytes(), &dict);
        let second = decode_record(line.as_bytes(), &dict);
        prop_assert_eq!(first, second);
    }

    #[test]
    fn blank_slices_are_null(width in 0usize..12) {
        let raw = " ".repeat(width);
        prop_assert_eq!(classify_slice(&raw), Ok(FieldValue::Null));
    }

    #[test]
    fn padded_integers_decode_to_their_value(
        value in 0i64..100_000_000,
        zeros in 0usize..4,
        left in 0usize..3,
        right in 0usize..3,
    ) {
        let raw = format!(
            "{}{}{}{}",
            " ".repeat(left),
            "0".repeat(zeros),
            value,
            " ".repeat(right)
        );
        prop_assert_eq!(classify_slice(&raw), Ok(FieldValue::Int(value)));
    }

    #[test]
    fn building_never_adds_rows_and_keeps_order(
        ids in proptest::collection::vec(0u32..10_000_000, 0..40),
        blank_every in 2usize..6,
    ) {
        let dict = seer_nov_2016().expect("schema");
        let lines: Vec<String> = ids
            .iter()
            .enumerate()
            .map(|(idx, id)| {
                if idx % blank_every == 0 {
                    String::new()
                } else {
                    format!("{id:08}")
                }
            })
            .collect();
        let frame = build_table(&lines, &dict, &IngestOptions::default()).expect("build");
        prop_assert!(frame.record_count() <= lines.len());

        let expected: Vec<Option<i64>> = ids
            .iter()
            .enumerate()
            .filter(|(idx, _)| idx % blank_every != 0)
            .map(|(_, id)| Some(i64::from(*id)))
            .collect();
        prop_assert_eq!(column_i64_values(&frame.data, PATIENT_ID).expect("ids"), expected);
    }
}
