//! SEER registry record model.
//!
//! - **field**: byte spans, code tables, and field specs
//! - **dictionary**: the append-only field dictionary
//! - **schema**: the November 2016 SEER record layout
//! - **stage**: AJCC 6th stage classification of coded labels
//! - **value**: decoded field values

pub mod dictionary;
pub mod error;
pub mod field;
pub mod schema;
pub mod stage;
pub mod value;

pub use dictionary::FieldDictionary;
pub use error::{DictionaryError, Result};
pub use field::{CodeTable, FieldSpec, Span};
pub use schema::seer_nov_2016;
pub use stage::{AjccStage, StageIndex};
pub use value::FieldValue;
