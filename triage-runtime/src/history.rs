use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub ts_unix_ms: i64,
    /// Where the email came from: an upload filename or "inline text".
    pub source: String,
    pub category: String,
    pub confidence: f64,
}

/// JSON file keeping the most recent analyses, newest last.
#[derive(Debug, Clone)]
pub struct AnalysisHistoryStore {
    path: PathBuf,
    max_entries: usize,
}

impl AnalysisHistoryStore {
    pub fn at_path(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            max_entries: 200,
        }
    }

    pub fn with_max_entries(mut self, max: usize) -> Self {
        self.max_entries = max.max(1);
        self
    }

    pub fn load(&self) -> anyhow::Result<Vec<HistoryEntry>> {
        if !self.path.exists() {
            return Ok(vec![]);
        }

        let raw = fs::read_to_string(&self.path)
            .with_context(|| format!("failed to read history: {}", self.path.display()))?;
        let entries: Vec<HistoryEntry> = serde_json::from_str(&raw)
            .with_context(|| format!("failed to parse history: {}", self.path.display()))?;
        Ok(entries)
    }

    pub fn append(&self, entry: HistoryEntry) -> anyhow::Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("failed to create dir: {}", parent.display()))?;
        }

        let mut entries = self.load()?;
        entries.push(entry);
        if entries.len() > self.max_entries {
            let start = entries.len() - self.max_entries;
            entries = entries.split_off(start);
        }

        let tmp = self.path.with_extension("tmp");
        fs::write(&tmp, serde_json::to_string_pretty(&entries)?)
            .with_context(|| format!("failed to write history temp: {}", tmp.display()))?;
        crate::config_store::replace_file(&tmp, &self.path)
            .with_context(|| format!("failed to replace history: {}", self.path.display()))?;
        Ok(())
    }

    pub fn clear(&self) -> anyhow::Result<()> {
        if self.path.exists() {
            fs::remove_file(&self.path)
                .with_context(|| format!("failed to remove history: {}", self.path.display()))?;
        }
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}
