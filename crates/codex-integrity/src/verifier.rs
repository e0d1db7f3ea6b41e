//! Index-backed scroll verifier.
//!
//! `ScrollVerifier::verify` runs a fixed sequence:
//!
//! 1. Load the index (`MissingIndex` on failure).
//! 2. Look up the named entry (`UnknownScroll` on failure).
//! 3. Normalize the artifact (`MissingArtifact` on failure).
//! 4. Hash the normalized bytes and compare with the indexed checksum.
//!
//! The first three steps abort before any checksum is computed.  Only step 4
//! can produce a `Mismatch`, and it does so as a report, not an error.

use std::{fs, path::Path};

use tracing::{debug, info, warn};

use codex_contracts::{
    error::CodexResult,
    report::{ScrollStatus, VerificationReport},
};
use codex_core::{sha256_hex, utc_now};

use crate::{index::ScrollIndex, normalize::Normalizer};

/// Compares normalized scroll checksums against an index.
#[derive(Debug, Clone)]
pub struct ScrollVerifier {
    normalizer: Normalizer,
    job_id: String,
}

impl ScrollVerifier {
    /// Job id stamped on reports unless overridden.
    pub const DEFAULT_JOB_ID: &'static str = "stellar-integrity-audit/verify";

    pub fn new() -> Self {
        Self {
            normalizer: Normalizer::new(),
            job_id: Self::DEFAULT_JOB_ID.to_string(),
        }
    }

    /// Use `job_id` in produced reports.
    pub fn with_job_id(mut self, job_id: impl Into<String>) -> Self {
        self.job_id = job_id.into();
        self
    }

    /// Use a custom normalizer (e.g. a different marker token).
    pub fn with_normalizer(mut self, normalizer: Normalizer) -> Self {
        self.normalizer = normalizer;
        self
    }

    /// Verify the scroll at `scroll_path` against the entry `scroll_name` in
    /// the index at `index_path`.
    pub fn verify(
        &self,
        scroll_path: &Path,
        index_path: &Path,
        scroll_name: &str,
    ) -> CodexResult<VerificationReport> {
        let index = ScrollIndex::load(index_path)?;
        let entry = index.entry(scroll_name)?;

        let normalized = self.normalizer.normalize_file(scroll_path)?;
        let size_bytes = fs::metadata(scroll_path)?.len();

        let computed_checksum = sha256_hex(&normalized);
        debug!(
            scroll = %scroll_name,
            normalized_bytes = normalized.len(),
            computed = %computed_checksum,
            "scroll normalized and hashed"
        );

        let status = if computed_checksum == entry.checksum_sha256 {
            ScrollStatus::Verified
        } else {
            ScrollStatus::Mismatch
        };

        match status {
            ScrollStatus::Verified => info!(scroll = %scroll_name, "scroll checksum verified"),
            ScrollStatus::Mismatch => warn!(
                scroll = %scroll_name,
                computed = %computed_checksum,
                expected = %entry.checksum_sha256,
                "scroll checksum mismatch"
            ),
        }

        Ok(VerificationReport {
            job_id: self.job_id.clone(),
            status,
            scroll: scroll_path.display().to_string().replace('\\', "/"),
            size_bytes,
            hash_algorithm: entry.hash_algorithm.clone(),
            computed_checksum,
            index_checksum: entry.checksum_sha256.clone(),
            timestamp: utc_now(),
        })
    }
}

impl Default for ScrollVerifier {
    fn default() -> Self {
        Self::new()
    }
}
