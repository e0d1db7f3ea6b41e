//! Core trait definitions for the Codex pipeline.
//!
//! Pipeline stages (scraping, validation, publishing) never write the lineage
//! log directly.  They report through a `LineageSink`, which lets the CLI
//! use the append-only file log while tests use an in-memory sink.

use serde_json::Value;

use codex_contracts::error::CodexResult;

/// A destination for job-stage lineage events.
///
/// Implementations must be append-only: an emitted record is never edited,
/// reordered, or deleted.
pub trait LineageSink {
    /// Record one stage transition for `job_id`.
    ///
    /// `payload` must be a JSON object.  When `checksum_source` is given the
    /// stored record carries its SHA-256 hex digest; otherwise the checksum
    /// field is left out entirely.
    ///
    /// Write failures are returned to the caller unchanged.  Nothing retries.
    fn emit(
        &self,
        job_id: &str,
        stage: &str,
        status: &str,
        payload: Value,
        checksum_source: Option<&str>,
    ) -> CodexResult<()>;
}
