//! File-backed implementation of `LineageSink`.
//!
//! `LineageLogger` appends one JSON object per line to an NDJSON file.  Each
//! `emit` opens the file in append mode, issues a single `write_all` of the
//! full line, and closes it again; existing lines are never read or touched.
//!
//! There is no cross-process lock.  Concurrent writers rely on the platform
//! keeping one append-mode write intact, which large payloads split across
//! several OS-level writes can break.

use std::{
    fs::{self, OpenOptions},
    io::Write,
    path::{Path, PathBuf},
};

use serde_json::Value;
use tracing::debug;

use codex_contracts::{
    error::{CodexError, CodexResult},
    record::LogRecord,
};
use codex_core::traits::LineageSink;

use crate::{record::build_record, replay::Replay};

/// An append-only lineage log stored at an explicit path.
#[derive(Debug, Clone)]
pub struct LineageLogger {
    path: PathBuf,
}

impl LineageLogger {
    /// Where the pipeline scripts keep the shared log by default.
    pub const DEFAULT_PATH: &'static str = "scrolls/latest.ndjson";

    /// Create a logger for the log file at `path`.  Nothing is touched on
    /// disk until the first `emit`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The log file this logger appends to.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append an already-built record as one line.
    ///
    /// Creates the parent directory first if it is missing.
    pub fn append(&self, record: &LogRecord) -> CodexResult<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let mut line = serde_json::to_vec(record).map_err(|e| CodexError::Serialization {
            reason: format!("failed to serialize lineage record: {}", e),
        })?;
        line.push(b'\n');

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        file.write_all(&line)?;

        Ok(())
    }

    /// Lazily replay every stored record for `job_id`, oldest first.
    ///
    /// A missing log yields an empty sequence.  Malformed lines are skipped.
    pub fn replay(&self, job_id: &str) -> CodexResult<Replay> {
        Replay::open(&self.path, job_id)
    }
}

impl LineageSink for LineageLogger {
    fn emit(
        &self,
        job_id: &str,
        stage: &str,
        status: &str,
        payload: Value,
        checksum_source: Option<&str>,
    ) -> CodexResult<()> {
        let record = build_record(job_id, stage, status, payload, checksum_source)?;
        self.append(&record)?;

        debug!(
            job_id = %record.job_id,
            stage = %record.stage,
            status = %record.status,
            size_bytes = record.size_bytes,
            log = %self.path.display(),
            "lineage event appended"
        );

        Ok(())
    }
}
