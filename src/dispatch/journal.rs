//! Alerts journal
//!
//! Append-only record of every notification delivered, one JSON object per
//! line (JSONL). Backs `spendwatch alerts history`.

use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, Write};
use std::path::PathBuf;

use crate::alerts::BudgetNotification;
use crate::error::{TrackerError, TrackerResult};
use crate::models::UserId;

use super::NotificationSink;

/// Writes delivered notifications to the alerts journal file
pub struct JournalSink {
    log_path: PathBuf,
}

impl JournalSink {
    pub fn new(log_path: PathBuf) -> Self {
        Self { log_path }
    }

    /// Append one notification and flush immediately
    pub fn append(&self, notification: &BudgetNotification) -> TrackerResult<()> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.log_path)
            .map_err(|e| TrackerError::Io(format!("Failed to open alerts journal: {}", e)))?;

        let json = serde_json::to_string(notification)
            .map_err(|e| TrackerError::Json(format!("Failed to serialize notification: {}", e)))?;

        writeln!(file, "{}", json)
            .map_err(|e| TrackerError::Io(format!("Failed to write notification: {}", e)))?;

        file.flush()
            .map_err(|e| TrackerError::Io(format!("Failed to flush alerts journal: {}", e)))?;

        Ok(())
    }

    /// Read all journal entries, oldest first
    pub fn read_all(&self) -> TrackerResult<Vec<BudgetNotification>> {
        if !self.log_path.exists() {
            return Ok(Vec::new());
        }

        let file = File::open(&self.log_path)
            .map_err(|e| TrackerError::Io(format!("Failed to open alerts journal: {}", e)))?;

        let reader = BufReader::new(file);
        let mut entries = Vec::new();

        for (line_num, line) in reader.lines().enumerate() {
            let line = line.map_err(|e| {
                TrackerError::Io(format!(
                    "Failed to read alerts journal line {}: {}",
                    line_num + 1,
                    e
                ))
            })?;

            if line.trim().is_empty() {
                continue;
            }

            let entry: BudgetNotification = serde_json::from_str(&line).map_err(|e| {
                TrackerError::Json(format!(
                    "Failed to parse alerts journal line {}: {}",
                    line_num + 1,
                    e
                ))
            })?;

            entries.push(entry);
        }

        Ok(entries)
    }

    /// The most recent `count` entries for one user, oldest first
    pub fn read_recent(&self, user_id: &UserId, count: usize) -> TrackerResult<Vec<BudgetNotification>> {
        let entries: Vec<_> = self
            .read_all()?
            .into_iter()
            .filter(|n| &n.user_id == user_id)
            .collect();
        let start = entries.len().saturating_sub(count);
        Ok(entries[start..].to_vec())
    }

    pub fn path(&self) -> &PathBuf {
        &self.log_path
    }
}

impl NotificationSink for JournalSink {
    fn name(&self) -> &'static str {
        "journal"
    }

    fn deliver(&self, notification: &BudgetNotification) -> TrackerResult<()> {
        self.append(notification)
    }
}
