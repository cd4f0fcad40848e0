//! Append-only plan history stored as JSON lines.

use serde::{Deserialize, Serialize};
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};
use uiplan_core::{plan_fingerprint, Plan};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub version: usize,
    pub prompt: String,
    pub plan_hash: String,
    pub plan: Plan,
}

#[derive(Debug, thiserror::Error)]
pub enum HistoryError {
    #[error("history io failed `{path}`: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("history line {line} in `{path}` is invalid: {source}")]
    Decode {
        path: String,
        line: usize,
        #[source]
        source: serde_json::Error,
    },
    #[error("history entry encode failed: {0}")]
    Encode(#[from] serde_json::Error),
}

pub fn encode_history_jsonl_line(entry: &HistoryEntry) -> serde_json::Result<String> {
    let mut line = serde_json::to_string(entry)?;
    line.push('\n');
    Ok(line)
}

pub fn parse_history_jsonl_line(line: &str) -> serde_json::Result<HistoryEntry> {
    serde_json::from_str::<HistoryEntry>(line.trim_end())
}

#[derive(Debug, Clone)]
pub struct PlanHistory {
    path: PathBuf,
    entries: Vec<HistoryEntry>,
}

impl PlanHistory {
    /// Reads every entry from `path`; a missing file is an empty history.
    pub fn load_or_empty(path: impl AsRef<Path>) -> Result<Self, HistoryError> {
        let path = path.as_ref().to_path_buf();
        let content = match std::fs::read_to_string(&path) {
            Ok(content) => content,
            Err(source) if source.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "no history file yet");
                String::new()
            }
            Err(source) => {
                return Err(HistoryError::Io {
                    path: path.display().to_string(),
                    source,
                })
            }
        };

        let mut entries = Vec::new();
        for (index, line) in content.lines().enumerate() {
            if line.trim().is_empty() {
                continue;
            }
            let entry = parse_history_jsonl_line(line).map_err(|source| HistoryError::Decode {
                path: path.display().to_string(),
                line: index + 1,
                source,
            })?;
            entries.push(entry);
        }
        Ok(Self { path, entries })
    }

    /// Records `plan` as the next version and appends it to the file.
    pub fn append(&mut self, prompt: &str, plan: &Plan) -> Result<&HistoryEntry, HistoryError> {
        let entry = HistoryEntry {
            version: self.entries.len() + 1,
            prompt: prompt.to_string(),
            plan_hash: plan_fingerprint(plan),
            plan: plan.clone(),
        };
        let line = encode_history_jsonl_line(&entry)?;
        let io_error = |source| HistoryError::Io {
            path: self.path.display().to_string(),
            source,
        };
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(io_error)?;
        file.write_all(line.as_bytes()).map_err(io_error)?;
        tracing::info!(version = entry.version, path = %self.path.display(), "plan recorded");
        self.entries.push(entry);
        Ok(&self.entries[self.entries.len() - 1])
    }

    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    /// Versions start at 1.
    pub fn get(&self, version: usize) -> Option<&HistoryEntry> {
        version
            .checked_sub(1)
            .and_then(|index| self.entries.get(index))
    }

    pub fn latest(&self) -> Option<&HistoryEntry> {
        self.entries.last()
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[cfg(test)]
#[path = "history_test.rs"]
mod tests;
