use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum DictionaryError {
    #[error("unknown field: {name}")]
    UnknownField { name: String },
    #[error("field already registered: {name}")]
    DuplicateField { name: String },
    #[error("field has no code table: {name}")]
    NoCodeTable { name: String },
    #[error("field has no staging classification: {name}")]
    NotStaged { name: String },
}

impl DictionaryError {
    pub(crate) fn unknown(name: &str) -> Self {
        Self::UnknownField {
            name: name.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, DictionaryError>;
