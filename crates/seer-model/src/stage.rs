//! AJCC 6th edition stage classification.
//!
//! The registry stores the adjusted AJCC stage as a two-digit code whose
//! label spells out the substage (`IIIB`, `IVNOS`, `0is`, ...). Labels are
//! classified into an [`AjccStage`] once when the schema is built; rules
//! then look codes up in a [`StageIndex`] instead of re-matching strings.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::field::CodeTable;

/// Major AJCC stage group of a coded stage label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum AjccStage {
    Stage0,
    StageI,
    StageII,
    StageIII,
    StageIV,
    Occult,
    Unknown,
    NotApplicable,
}

impl AjccStage {
    /// Classify a stage label.
    ///
    /// Roman numeral prefixes are tested from most to least specific so
    /// that `IV` and `III` labels are never read as stage `I`.
    pub fn from_label(label: &str) -> Option<Self> {
        let label = label.trim();
        if label.eq_ignore_ascii_case("N/A") {
            return Some(Self::NotApplicable);
        }
        if label.eq_ignore_ascii_case("OCCULT") {
            return Some(Self::Occult);
        }
        if label.to_ascii_uppercase().starts_with("UNK") {
            return Some(Self::Unknown);
        }
        if label.starts_with('0') {
            return Some(Self::Stage0);
        }
        [
            ("IV", Self::StageIV),
            ("III", Self::StageIII),
            ("II", Self::StageII),
            ("I", Self::StageI),
        ]
        .into_iter()
        .find(|(prefix, _)| label.starts_with(prefix))
        .map(|(_, stage)| stage)
    }

    /// Roman numeral stage as an integer (1-4); `None` for stage 0 and the
    /// special codes.
    pub fn numeral(self) -> Option<u8> {
        match self {
            Self::StageI => Some(1),
            Self::StageII => Some(2),
            Self::StageIII => Some(3),
            Self::StageIV => Some(4),
            Self::Stage0 | Self::Occult | Self::Unknown | Self::NotApplicable => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Stage0 => "0",
            Self::StageI => "I",
            Self::StageII => "II",
            Self::StageIII => "III",
            Self::StageIV => "IV",
            Self::Occult => "OCCULT",
            Self::Unknown => "UNK",
            Self::NotApplicable => "N/A",
        }
    }
}

impl fmt::Display for AjccStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Code → stage group lookup for one staged field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StageIndex {
    stages: BTreeMap<i64, AjccStage>,
}

impl StageIndex {
    /// Classify every label of `codes`. Labels that match no stage group are
    /// left out of the index.
    pub fn from_codes(codes: &CodeTable) -> Self {
        let stages = codes
            .iter()
            .filter_map(|(code, label)| AjccStage::from_label(label).map(|stage| (code, stage)))
            .collect();
        Self { stages }
    }

    pub fn stage(&self, code: i64) -> Option<AjccStage> {
        self.stages.get(&code).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (i64, AjccStage)> + '_ {
        self.stages.iter().map(|(code, stage)| (*code, *stage))
    }

    pub fn codes_in(&self, stage: AjccStage) -> Vec<i64> {
        self.iter()
            .filter(|(_, candidate)| *candidate == stage)
            .map(|(code, _)| code)
            .collect()
    }
}
