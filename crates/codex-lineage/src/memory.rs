//! In-memory implementation of `LineageSink`.
//!
//! Keeps records in a `Vec` behind a `Mutex`.  Used by tests and by callers
//! that want to inspect what a stage reported without touching the disk.

use std::sync::Mutex;

use serde_json::Value;

use codex_contracts::{
    error::{CodexError, CodexResult},
    record::LogRecord,
};
use codex_core::traits::LineageSink;

use crate::record::build_record;

/// An append-only lineage sink held entirely in memory.
#[derive(Debug, Default)]
pub struct InMemoryLineageSink {
    pub(crate) records: Mutex<Vec<LogRecord>>,
}

impl InMemoryLineageSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every record emitted so far, in emit order.
    pub fn records(&self) -> Vec<LogRecord> {
        self.records.lock().expect("lineage state lock poisoned").clone()
    }

    /// Records for `job_id`, in emit order.
    pub fn replay(&self, job_id: &str) -> Vec<LogRecord> {
        self.records
            .lock()
            .expect("lineage state lock poisoned")
            .iter()
            .filter(|r| r.job_id == job_id)
            .cloned()
            .collect()
    }
}

impl LineageSink for InMemoryLineageSink {
    fn emit(
        &self,
        job_id: &str,
        stage: &str,
        status: &str,
        payload: Value,
        checksum_source: Option<&str>,
    ) -> CodexResult<()> {
        let record = build_record(job_id, stage, status, payload, checksum_source)?;

        let mut records = self.records.lock().map_err(|e| {
            CodexError::Io(std::io::Error::other(format!("lineage state lock poisoned: {}", e)))
        })?;
        records.push(record);

        Ok(())
    }
}
