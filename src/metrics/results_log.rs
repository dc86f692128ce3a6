//! Plain-text results log and end-of-session report
//!
//! The log gets one line per episode, flushed as it is written, so an
//! interrupted session still leaves a usable file. The report is written
//! once, next to the log, as `<path>.report.json`.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use super::EpisodeStats;
use crate::sim::EnvConfig;

/// Append-only per-episode results file
#[derive(Debug)]
pub struct ResultsLog {
    file: File,
    path: PathBuf,
}

impl ResultsLog {
    /// Create (or truncate) the results file, creating parent directories if
    /// they don't exist
    pub fn create(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("Failed to create directory: {:?}", parent))?;
            }
        }

        let file = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(path)
            .with_context(|| format!("Failed to open results file {:?}", path))?;

        Ok(Self {
            file,
            path: path.to_path_buf(),
        })
    }

    pub fn append_line(&mut self, line: &str) -> Result<()> {
        writeln!(self.file, "{}", line)
            .and_then(|_| self.file.flush())
            .with_context(|| format!("Failed to write to {:?}", self.path))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Where the session report for this log goes
    pub fn report_path(&self) -> PathBuf {
        self.path.with_extension("report.json")
    }
}

/// Summary of a whole session, saved as JSON
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionReport {
    pub episodes: usize,
    pub total_steps: usize,
    pub laps_completed: usize,
    pub average_score: f64,
    pub best_average: f64,
    pub validation: bool,
    /// Set when Ctrl+C ended the session before the episode limit
    pub stopped_early: bool,
    pub env_config: EnvConfig,
    /// Crate version that produced the report
    pub version: String,
}

impl SessionReport {
    pub fn new(
        stats: &EpisodeStats,
        env_config: EnvConfig,
        validation: bool,
        stopped_early: bool,
    ) -> Self {
        Self {
            episodes: stats.total_episodes(),
            total_steps: stats.total_steps(),
            laps_completed: stats.laps_completed(),
            average_score: stats.average_score(),
            best_average: stats.best_average(),
            validation,
            stopped_early,
            env_config,
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self).context("Failed to serialize report")?;
        std::fs::write(path, json)
            .with_context(|| format!("Failed to write report to {:?}", path))
    }

    pub fn load(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read report from {:?}", path))?;
        serde_json::from_str(&json).context("Failed to parse report")
    }
}
