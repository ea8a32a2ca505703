//! Summary of a completed join run
//!
//! The report is diagnostic only. It records what went in, how many members
//! matched, and where the export went.

use crate::config::RunConfig;
use crate::error::{Error, Result};
use crate::join::JoinStats;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// A record of one run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunReport {
    /// When the run finished
    pub timestamp: DateTime<Utc>,
    /// Configuration the run used
    pub config: RunConfig,
    /// Match counters
    pub stats: JoinStats,
    /// Number of merged records written
    pub rows_written: usize,
    /// Export path, or `None` when nothing was written
    pub output: Option<PathBuf>,
}

impl RunReport {
    /// Build a report for a run that wrote `rows_written` records
    pub fn new(config: &RunConfig, stats: JoinStats, rows_written: usize) -> Self {
        let output = (rows_written > 0).then(|| config.output.clone());
        Self {
            timestamp: Utc::now(),
            config: config.clone(),
            stats,
            rows_written,
            output,
        }
    }

    /// Save the report to JSON
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content).map_err(|e| Error::FileWrite {
            path: path.to_path_buf(),
            source: e,
        })
    }
}
