//! Run summary persisted next to the generated wordlist

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{PsudohashError, Result};
use crate::types::{Keyword, SizeEstimate};

/// Record of one generation run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunSummary {
    /// Run identifier
    pub run_id: String,
    /// Keywords in processing order
    pub keywords: Vec<Keyword>,
    /// Output wordlist
    pub output: PathBuf,
    /// Volume promised before generation
    pub estimated: SizeEstimate,
    /// Volume actually written
    pub written: SizeEstimate,
    pub started_at: DateTime<Utc>,
    pub finished_at: Option<DateTime<Utc>>,
}

impl RunSummary {
    /// Start a new run summary
    pub fn new(keywords: Vec<Keyword>, output: PathBuf, estimated: SizeEstimate) -> Self {
        let now = Utc::now();
        Self {
            run_id: format!("run_{}", now.format("%Y%m%d_%H%M%S")),
            keywords,
            output,
            estimated,
            written: SizeEstimate::default(),
            started_at: now,
            finished_at: None,
        }
    }

    /// Add the measured output of one keyword
    pub fn record(&mut self, written: SizeEstimate) {
        self.written += written;
    }

    /// Mark as finished
    pub fn finish(&mut self) {
        self.finished_at = Some(Utc::now());
    }

    /// Whether the written volume matches the estimate
    pub fn matches_estimate(&self) -> bool {
        self.written == self.estimated
    }

    /// Get elapsed time
    pub fn elapsed(&self) -> chrono::Duration {
        self.finished_at.unwrap_or_else(Utc::now) - self.started_at
    }

    /// Load summary from file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            PsudohashError::io(e.to_string(), Some(path.to_string_lossy().to_string()))
        })?;

        serde_json::from_str(&content).map_err(|e| {
            PsudohashError::parse(e.to_string(), Some(content))
        })
    }

    /// Save summary to file
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| {
                PsudohashError::io(e.to_string(), Some(parent.to_string_lossy().to_string()))
            })?;
        }

        let content = serde_json::to_string_pretty(self).map_err(|e| {
            PsudohashError::internal(format!("Failed to serialize summary: {}", e))
        })?;

        std::fs::write(path, content).map_err(|e| {
            PsudohashError::io(e.to_string(), Some(path.to_string_lossy().to_string()))
        })
    }
}
