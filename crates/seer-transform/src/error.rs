use polars::prelude::PolarsError;
use seer_model::DictionaryError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TransformError {
    #[error(transparent)]
    Dictionary(#[from] DictionaryError),
    #[error("missing column: {name}")]
    MissingColumn { name: String },
    #[error("derived value {value} for {name} is not listed in its code table")]
    CategoryOutOfRange { name: String, value: i64 },
    #[error("polars error: {0}")]
    Polars(#[from] PolarsError),
}

pub type Result<T> = std::result::Result<T, TransformError>;
