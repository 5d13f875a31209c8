//! Study configuration.
//!
//! A study run is described by a TOML file:
//!
//! ```toml
//! input = "data/BREAST.TXT"
//! output = "out/cohort.csv"
//!
//! [ingest]
//! decode_mode = "lenient"
//!
//! [cohort]
//! drop_incomplete = true
//!
//! [[cohort.steps]]
//! column = "Sex"
//! op = "=="
//! value = 2
//! description = "women"
//! ```
//!
//! Missing `[ingest]` and `[cohort]` sections fall back to lenient decoding
//! and the Hsu et al. (2017) cohort. A `[cohort]` table without steps also
//! runs the Hsu steps; write `steps = []` to skip filtering.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use seer_ingest::IngestOptions;
use seer_transform::CohortFilter;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config {path}: {source}")]
    Toml {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudyConfig {
    /// Fixed-width registry extract to read.
    pub input: PathBuf,
    /// Where to write the analysis-ready rows as CSV, if anywhere.
    #[serde(default)]
    pub output: Option<PathBuf>,
    #[serde(default)]
    pub ingest: IngestOptions,
    #[serde(default)]
    pub cohort: CohortFilter,
}

impl StudyConfig {
    pub fn new(input: impl Into<PathBuf>) -> Self {
        Self {
            input: input.into(),
            output: None,
            ingest: IngestOptions::default(),
            cohort: CohortFilter::default(),
        }
    }

    #[must_use]
    pub fn with_output(mut self, path: impl Into<PathBuf>) -> Self {
        self.output = Some(path.into());
        self
    }

    /// Parse a config from TOML text. Relative paths are kept as written.
    pub fn from_toml(text: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(text)
    }
}

/// Load a study config file. Relative `input`/`output` paths resolve
/// against the config file's directory.
pub fn load_study_config(path: &Path) -> Result<StudyConfig, ConfigError> {
    let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let mut config = StudyConfig::from_toml(&text).map_err(|source| ConfigError::Toml {
        path: path.to_path_buf(),
        source,
    })?;
    if let Some(base) = path.parent() {
        config.input = resolve(base, &config.input);
        config.output = config.output.map(|output| resolve(base, &output));
    }
    Ok(config)
}

fn resolve(base: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        base.join(path)
    }
}
