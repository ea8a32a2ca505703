//! Run configuration: input and output paths plus key column names

use crate::error::{Error, Result};
use crate::join::{MEMBER_KEY, PRIMARY_KEY};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Paths and key columns for one join run.
///
/// Stored as JSON. Fields missing from the file take their default value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunConfig {
    /// Primary extract, keyed by `primary_key`
    pub primary: PathBuf,
    /// Scored dataset (cluster statistics), keyed by `member_key`
    pub scored: PathBuf,
    /// Predicted dataset (forecasts), keyed by `member_key`
    pub predicted: PathBuf,
    /// Merged export
    pub output: PathBuf,
    /// Identifier column of the primary extract
    pub primary_key: String,
    /// Identifier column of the auxiliary datasets
    pub member_key: String,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            primary: PathBuf::from("../data/extract.csv"),
            scored: PathBuf::from("../data/08_scored_members.csv"),
            predicted: PathBuf::from("../data/09_predictions_2025.csv"),
            output: PathBuf::from("../data/merged_export.csv"),
            primary_key: PRIMARY_KEY.to_string(),
            member_key: MEMBER_KEY.to_string(),
        }
    }
}

impl RunConfig {
    /// Load a configuration from JSON
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref()).map_err(|e| Error::FileRead {
            path: path.as_ref().to_path_buf(),
            source: e,
        })?;
        serde_json::from_str(&content).map_err(Error::Json)
    }

    /// Load from `path` if given, otherwise use the defaults
    pub fn load_or_default<P: AsRef<Path>>(path: Option<P>) -> Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }

    /// Save the configuration to JSON
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        fs::write(path.as_ref(), content).map_err(|e| Error::FileWrite {
            path: path.as_ref().to_path_buf(),
            source: e,
        })
    }
}
