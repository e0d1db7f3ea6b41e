//! Integrity verification report types.
//!
//! A report is produced only when the index, the entry, and the artifact all
//! resolved.  Missing inputs are `CodexError`s, never a `Mismatch`.

use serde::{Deserialize, Serialize};

/// Outcome of comparing a computed checksum with the indexed one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScrollStatus {
    Verified,
    Mismatch,
}

/// The JSON object the verifier prints to standard output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerificationReport {
    /// Lineage job the verification run belongs to.
    pub job_id: String,
    pub status: ScrollStatus,
    /// Artifact path with `/` separators.
    pub scroll: String,
    /// Raw on-disk size of the artifact, before normalization.
    pub size_bytes: u64,
    pub hash_algorithm: String,
    pub computed_checksum: String,
    pub index_checksum: String,
    /// UTC instant with second precision and a `Z` suffix.
    pub timestamp: String,
}

impl VerificationReport {
    /// True when the computed checksum matched the index.
    pub fn is_verified(&self) -> bool {
        self.status == ScrollStatus::Verified
    }
}
