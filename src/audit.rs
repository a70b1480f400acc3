//! Append-only interaction log: one JSON line per turn, one file per day.
//! Best-effort telemetry; a failed write never aborts the turn.

use std::io::Write;
use std::path::PathBuf;

use chrono::Local;

use crate::core::errors::{AppError, AppResult};
use crate::core::types::RetrievalTurn;

pub struct TurnLog {
    dir: PathBuf,
}

impl TurnLog {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Path of today's log file.
    pub fn current_file(&self) -> PathBuf {
        self.dir
            .join(format!("qa-{}.jsonl", Local::now().format("%Y-%m-%d")))
    }

    pub fn record(&self, turn: &RetrievalTurn) {
        if let Err(err) = self.append(turn) {
            tracing::warn!(code = err.code(), "failed to write turn log: {err}");
        }
    }

    fn append(&self, turn: &RetrievalTurn) -> AppResult<()> {
        std::fs::create_dir_all(&self.dir)?;
        let line = serde_json::to_string(turn)
            .map_err(|err| AppError::InvalidInput(format!("unserializable turn: {err}")))?;
        let mut file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(self.current_file())?;
        writeln!(file, "{line}")?;
        Ok(())
    }
}
