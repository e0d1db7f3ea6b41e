//! Timestamp formatting shared by lineage records and verification reports.

use chrono::{DateTime, SecondsFormat, Utc};

/// Format `at` as ISO-8601 UTC with second precision and a `Z` suffix,
/// e.g. `2026-10-19T08:15:00Z`.
pub fn utc_timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Secs, true)
}

/// The current instant in the lineage timestamp format.
pub fn utc_now() -> String {
    utc_timestamp(Utc::now())
}
