// 📝 Run Log - Append-Only Progress Record
// One timestamped line per message. Never truncated within a run, never read
// back by the pipeline; on a fatal error the lines written so far are the
// only record of how far the run got.

use anyhow::{Context, Result};
use chrono::Local;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Timestamp layout: Year-MonthAbbrev-Day-Hour:Minute:Second
const TIMESTAMP_FORMAT: &str = "%Y-%h-%d-%H:%M:%S";

pub struct RunLog {
    path: PathBuf,
}

impl RunLog {
    pub fn new(path: &Path) -> Self {
        RunLog {
            path: path.to_path_buf(),
        }
    }

    /// Append one `timestamp : message` line to the log file.
    pub fn append(&self, message: &str) -> Result<()> {
        let timestamp = Local::now().format(TIMESTAMP_FORMAT);

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .with_context(|| format!("Failed to open run log {}", self.path.display()))?;

        writeln!(file, "{} : {}", timestamp, message)
            .with_context(|| format!("Failed to write to run log {}", self.path.display()))?;

        Ok(())
    }
}
