//! SEER registry ingestion.
//!
//! Decodes fixed-width registry records against a [`seer_model::FieldDictionary`]
//! and assembles them into a Polars frame.

pub mod decode;
pub mod error;
pub mod frame;
pub mod polars_utils;
pub mod table;

pub use decode::{DecodedRow, classify_slice, decode_record};
pub use error::{IngestError, RowDecodeError};
pub use frame::{BuildReport, RegistryFrame};
pub use polars_utils::{any_to_i64, column_i64_values, complete_rows, parse_i64};
pub use table::{DecodeMode, IngestOptions, build_table, read_registry_file};
