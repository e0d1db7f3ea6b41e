//! Draft canonicalization and checks ahead of publishing.

use std::{collections::BTreeMap, path::Path};

use serde_json::{json, Value};
use tracing::{info, warn};

use codex_contracts::{
    content::Draft,
    error::{CodexError, CodexResult},
    record::{STATUS_ERROR, STATUS_SUCCESS},
};
use codex_core::traits::LineageSink;

use crate::engine::ContentPolicy;

/// Lineage stage name for draft checks.
pub const STAGE_DRAFT_CHECK: &str = "draft-check";

const REQUIRED_SECTIONS: [&str; 3] = ["body", "cta", "title"];

fn invalid(reason: impl Into<String>) -> CodexError {
    CodexError::InvalidDraft {
        reason: reason.into(),
    }
}

/// Normalize whitespace in each section.
///
/// The title collapses every whitespace run to one space; the body is
/// trimmed and each of its lines trimmed; the call to action is trimmed.
pub fn canonicalize(draft: &Draft) -> Draft {
    Draft {
        title: draft.title.split_whitespace().collect::<Vec<_>>().join(" "),
        body: draft
            .body
            .trim()
            .lines()
            .map(str::trim)
            .collect::<Vec<_>>()
            .join("\n"),
        cta: draft.cta.trim().to_string(),
    }
}

/// Read a draft JSON document from `path`.
pub fn load_draft(path: &Path) -> CodexResult<Value> {
    let contents = std::fs::read_to_string(path)?;
    serde_json::from_str(&contents).map_err(|e| CodexError::Serialization {
        reason: format!("failed to parse draft '{}': {}", path.display(), e),
    })
}

impl ContentPolicy {
    /// Check the sections of `draft` and return its canonical form.
    ///
    /// Banned phrases are scanned over the raw title, body, and call to
    /// action joined by spaces.
    pub fn check_draft(&self, draft: &Value) -> CodexResult<Draft> {
        let sections = draft
            .as_object()
            .ok_or_else(|| invalid("Draft must be a JSON object"))?;

        let missing: Vec<&str> = REQUIRED_SECTIONS
            .iter()
            .copied()
            .filter(|key| !sections.contains_key(*key))
            .collect();
        if !missing.is_empty() {
            return Err(invalid(format!("Draft missing keys: {}", missing.join(", "))));
        }

        let draft: Draft = serde_json::from_value(draft.clone())
            .map_err(|e| invalid(format!("Draft sections must be strings: {}", e)))?;

        let combined = format!("{} {} {}", draft.title, draft.body, draft.cta);
        let violations = self.phrase_violations(&combined);
        if !violations.is_empty() {
            return Err(invalid(format!(
                "Draft violates banned phrases: {}",
                violations.join(", ")
            )));
        }

        Ok(canonicalize(&draft))
    }
}

/// Check the draft at `path` and report the outcome to `sink`.
///
/// On success the `draft-check` event carries the canonical draft and the
/// checksum of its key-sorted compact JSON.  On failure it carries the error
/// message and the checksum of the draft path.
pub fn check_draft_file(
    policy: &ContentPolicy,
    sink: &dyn LineageSink,
    job_id: &str,
    path: &Path,
) -> CodexResult<Draft> {
    let raw = load_draft(path)?;

    match policy.check_draft(&raw) {
        Ok(canonical) => {
            let payload = serde_json::to_value(&canonical).map_err(|e| CodexError::Serialization {
                reason: format!("failed to serialize draft: {}", e),
            })?;
            let sorted: BTreeMap<&String, &Value> = payload
                .as_object()
                .map(|map| map.iter().collect())
                .unwrap_or_default();
            let source = serde_json::to_string(&sorted).map_err(|e| CodexError::Serialization {
                reason: format!("failed to serialize draft: {}", e),
            })?;
            sink.emit(job_id, STAGE_DRAFT_CHECK, STATUS_SUCCESS, payload, Some(&source))?;
            info!(job_id = %job_id, "draft passed content policy");
            Ok(canonical)
        }
        Err(err) => {
            warn!(job_id = %job_id, error = %err, "draft rejected");
            let source = path.display().to_string();
            sink.emit(
                job_id,
                STAGE_DRAFT_CHECK,
                STATUS_ERROR,
                json!({ "error": err.to_string() }),
                Some(&source),
            )?;
            Err(err)
        }
    }
}
