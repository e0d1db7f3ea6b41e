//! Lineage log records.
//!
//! A `LogRecord` is one line of the append-only lineage log.  Records are
//! written once and never edited; replay reconstructs a job's history by
//! filtering them on `job_id`.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Structured payload attached to every record: a JSON object.
pub type Payload = Map<String, Value>;

/// A log line exactly as stored: every key in file order, including keys
/// that `LogRecord` does not model.
pub type StoredRecord = Map<String, Value>;

/// Status tag for a stage that completed normally.
pub const STATUS_SUCCESS: &str = "success";

/// Status tag for a stage that failed.
pub const STATUS_ERROR: &str = "error";

/// One job-stage event as stored in the lineage log.
///
/// Field order here is the key order on disk.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogRecord {
    /// UTC instant with second precision and a `Z` suffix,
    /// e.g. `2026-10-19T08:15:00Z`.
    pub timestamp: String,

    /// Opaque identifier grouping the events of one pipeline run.
    pub job_id: String,

    /// Free-form name of the pipeline phase (e.g. "ingress", "validation").
    pub stage: String,

    /// `success`, `error`, or any caller-defined tag.
    pub status: String,

    /// Arbitrary structured data supplied by the caller.
    pub payload: Payload,

    /// UTF-8 byte length of `payload` as single-line JSON with `", "` and
    /// `": "` separators, keys in insertion order.
    pub size_bytes: u64,

    /// SHA-256 hex digest of the caller's checksum source.  Omitted from the
    /// serialized line when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub checksum: Option<String>,
}
