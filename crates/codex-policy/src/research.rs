//! Research fact validation.
//!
//! A research fixture is a JSON list of facts, or an object whose `facts` key
//! holds that list.  Every fact must name its `statement`, `source_url`, and
//! `published_at`, be recent enough, come from an allowed domain, and avoid
//! banned phrases.  The first failing fact stops the run.

use std::path::Path;

use chrono::{DateTime, Duration, Utc};
use serde_json::{json, Map, Value};
use tracing::{info, warn};

use codex_contracts::{
    content::ValidatedFact,
    error::{CodexError, CodexResult},
    record::{STATUS_ERROR, STATUS_SUCCESS},
};
use codex_core::traits::LineageSink;

use crate::engine::ContentPolicy;

/// Lineage stage name for research validation.
pub const STAGE_VALIDATION: &str = "validation";

const REQUIRED_FIELDS: [&str; 3] = ["published_at", "source_url", "statement"];

fn invalid(reason: impl Into<String>) -> CodexError {
    CodexError::InvalidFact {
        reason: reason.into(),
    }
}

fn string_field<'a>(fact: &'a Map<String, Value>, field: &str) -> CodexResult<&'a str> {
    fact.get(field)
        .and_then(Value::as_str)
        .ok_or_else(|| invalid(format!("Fact field '{}' must be a string", field)))
}

/// Read the facts list out of the fixture at `path`.
pub fn load_facts(path: &Path) -> CodexResult<Vec<Value>> {
    let contents = std::fs::read_to_string(path)?;
    let data: Value = serde_json::from_str(&contents).map_err(|e| CodexError::Serialization {
        reason: format!("failed to parse research fixture '{}': {}", path.display(), e),
    })?;

    match data {
        Value::Array(facts) => Ok(facts),
        Value::Object(mut map) => match map.remove("facts") {
            Some(Value::Array(facts)) => Ok(facts),
            _ => Err(invalid("Fixture must be a list or contain a 'facts' list")),
        },
        _ => Err(invalid("Fixture must be a list or contain a 'facts' list")),
    }
}

impl ContentPolicy {
    /// Check one fact as of `now` and project it to its three core fields.
    pub fn validate_fact(&self, fact: &Value, now: DateTime<Utc>) -> CodexResult<ValidatedFact> {
        let fact = fact
            .as_object()
            .ok_or_else(|| invalid("Fact must be a JSON object"))?;

        let missing: Vec<&str> = REQUIRED_FIELDS
            .iter()
            .copied()
            .filter(|field| !fact.contains_key(*field))
            .collect();
        if !missing.is_empty() {
            return Err(invalid(format!("Fact missing fields: {}", missing.join(", "))));
        }

        let statement = string_field(fact, "statement")?;
        let source_url = string_field(fact, "source_url")?;
        let published_at = string_field(fact, "published_at")?;

        // Recency.
        let published = DateTime::parse_from_rfc3339(published_at).map_err(|e| {
            invalid(format!(
                "Fact '{}' has unparsable published_at '{}': {}",
                statement, published_at, e
            ))
        })?;
        let max_age_days = self.config().max_age_days;
        let age = now.signed_duration_since(published.with_timezone(&Utc));
        if age > Duration::days(i64::from(max_age_days)) {
            return Err(invalid(format!(
                "Fact '{}' is older than {} days",
                statement, max_age_days
            )));
        }

        if let Some(domain) = self.banned_domain_in(source_url) {
            return Err(invalid(format!(
                "Source {} uses banned domain {}",
                source_url, domain
            )));
        }

        let violations = self.phrase_violations(statement);
        if !violations.is_empty() {
            return Err(invalid(format!(
                "Statement uses banned phrases: {}",
                violations.join(", ")
            )));
        }

        Ok(ValidatedFact {
            statement: statement.to_string(),
            source_url: source_url.to_string(),
            published_at: published_at.to_string(),
        })
    }

    /// Check every fact in order, stopping at the first failure.
    pub fn validate_facts(
        &self,
        facts: &[Value],
        now: DateTime<Utc>,
    ) -> CodexResult<Vec<ValidatedFact>> {
        facts.iter().map(|fact| self.validate_fact(fact, now)).collect()
    }
}

/// Validate the fixture at `fixture` and report the outcome to `sink`.
///
/// A fixture that cannot be loaded is returned as an error without a lineage
/// event.  Once loaded, exactly one `validation` event is emitted: `success`
/// with the validated facts, or `error` with the failure message.  Both carry
/// the checksum of the fixture path.
pub fn validate_research(
    policy: &ContentPolicy,
    sink: &dyn LineageSink,
    job_id: &str,
    fixture: &Path,
    now: DateTime<Utc>,
) -> CodexResult<Vec<ValidatedFact>> {
    let source = fixture.display().to_string();
    let facts = load_facts(fixture)?;

    match policy.validate_facts(&facts, now) {
        Ok(validated) => {
            let facts_json =
                serde_json::to_value(&validated).map_err(|e| CodexError::Serialization {
                    reason: format!("failed to serialize validated facts: {}", e),
                })?;
            sink.emit(
                job_id,
                STAGE_VALIDATION,
                STATUS_SUCCESS,
                json!({ "facts": facts_json }),
                Some(&source),
            )?;
            info!(job_id = %job_id, facts = validated.len(), "research fixture validated");
            Ok(validated)
        }
        Err(err) => {
            warn!(job_id = %job_id, error = %err, "research fixture rejected");
            sink.emit(
                job_id,
                STAGE_VALIDATION,
                STATUS_ERROR,
                json!({ "error": err.to_string() }),
                Some(&source),
            )?;
            Err(err)
        }
    }
}
