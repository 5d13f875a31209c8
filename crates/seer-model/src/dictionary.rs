//! The field dictionary: an append-only, explicitly passed schema.
//!
//! The base dictionary describes the raw columns of one record layout
//! version. Derivation steps never mutate it in place; [`FieldDictionary::register`]
//! consumes a dictionary and returns the extended one.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::{DictionaryError, Result};
use crate::field::{CodeTable, FieldSpec};
use crate::stage::StageIndex;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldDictionary {
    fields: Vec<FieldSpec>,
    /// Stage classification for staged fields, computed when the field is added.
    stages: BTreeMap<String, StageIndex>,
}

impl FieldDictionary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a field spec. Names must be unique.
    pub fn with_field(mut self, spec: FieldSpec) -> Result<Self> {
        if self.contains(&spec.name) {
            return Err(DictionaryError::DuplicateField { name: spec.name });
        }
        self.fields.push(spec);
        Ok(self)
    }

    /// Classify the labels of `name`'s code table into AJCC stage groups.
    pub fn with_staging(mut self, name: &str) -> Result<Self> {
        let index = StageIndex::from_codes(self.code_table(name)?);
        self.stages.insert(name.to_string(), index);
        Ok(self)
    }

    /// Register a synthetic, span-less field describing a derived column.
    pub fn register(self, name: impl Into<String>, codes: CodeTable) -> Result<Self> {
        self.with_field(FieldSpec::derived(name, codes))
    }

    pub fn get(&self, name: &str) -> Result<&FieldSpec> {
        self.fields
            .iter()
            .find(|spec| spec.name == name)
            .ok_or_else(|| DictionaryError::unknown(name))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.fields.iter().any(|spec| spec.name == name)
    }

    /// All field specs in declaration order.
    pub fn all(&self) -> &[FieldSpec] {
        &self.fields
    }

    /// Field specs that have a byte span (the raw record columns).
    pub fn spanned(&self) -> impl Iterator<Item = &FieldSpec> {
        self.fields.iter().filter(|spec| spec.span.is_some())
    }

    pub fn code_table(&self, name: &str) -> Result<&CodeTable> {
        self.get(name)?
            .codes
            .as_ref()
            .ok_or_else(|| DictionaryError::NoCodeTable {
                name: name.to_string(),
            })
    }

    /// Label of `code` in `name`'s code table, if the code is listed.
    pub fn label(&self, name: &str, code: i64) -> Result<Option<&str>> {
        Ok(self.get(name)?.label(code))
    }

    pub fn stage_index(&self, name: &str) -> Result<&StageIndex> {
        if !self.contains(name) {
            return Err(DictionaryError::unknown(name));
        }
        self.stages
            .get(name)
            .ok_or_else(|| DictionaryError::NotStaged {
                name: name.to_string(),
            })
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}
