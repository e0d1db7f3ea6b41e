//! # codex-policy
//!
//! A TOML-driven content policy for the Codex pipeline.
//!
//! ## Overview
//!
//! This crate provides [`ContentPolicy`], loaded from a TOML file or built
//! from defaults.  It backs two pipeline stages:
//!
//! - **Research validation**: facts must carry a statement, source URL, and
//!   publication time, be recent, avoid banned domains, and avoid banned
//!   phrases.
//! - **Draft checks**: drafts must carry a title, body, and call to action,
//!   avoid banned phrases, and are returned in canonical whitespace form.
//!
//! Each stage reports its outcome through a
//! [`LineageSink`](codex_core::traits::LineageSink).
//!
//! ## Quick start
//!
//! ```rust,ignore
//! use std::path::Path;
//! use codex_lineage::LineageLogger;
//! use codex_policy::{research::validate_research, ContentPolicy};
//!
//! let policy = ContentPolicy::from_file(Path::new("policies/content.toml"))?;
//! let log = LineageLogger::new("scrolls/latest.ndjson");
//! let facts = validate_research(&policy, &log, "job-7", Path::new("facts.json"), chrono::Utc::now())?;
//! ```
//!
//! ## Phrase matching
//!
//! Banned phrases match case-insensitively as substrings, and every match is
//! reported rather than only the first.

pub mod config;
pub mod draft;
pub mod engine;
pub mod phrases;
pub mod research;

pub use config::PolicyConfig;
pub use engine::ContentPolicy;
pub use phrases::PhraseFilter;

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use std::fs;

    use chrono::{DateTime, Duration, TimeZone, Utc};
    use serde_json::{json, Value};
    use tempfile::TempDir;

    use codex_contracts::{content::Draft, error::CodexError};
    use codex_lineage::InMemoryLineageSink;

    use crate::{
        draft::{canonicalize, check_draft_file, STAGE_DRAFT_CHECK},
        research::{load_facts, validate_research, STAGE_VALIDATION},
        ContentPolicy, PhraseFilter,
    };

    const CONTENT_POLICY: &str = include_str!("../../../policies/content.toml");

    // ── Helpers ───────────────────────────────────────────────────────────────

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 10, 19, 12, 0, 0).unwrap()
    }

    fn days_ago(days: i64) -> String {
        (now() - Duration::days(days)).to_rfc3339_opts(chrono::SecondsFormat::Secs, true)
    }

    fn fact(statement: &str, url: &str, days: i64) -> Value {
        json!({
            "statement": statement,
            "source_url": url,
            "published_at": days_ago(days),
            "confidence": 0.9,
        })
    }

    fn expect_invalid_fact(result: Result<impl std::fmt::Debug, CodexError>) -> String {
        match result {
            Err(CodexError::InvalidFact { reason }) => reason,
            other => panic!("expected InvalidFact, got {:?}", other),
        }
    }

    // ── 1. phrase filter ──────────────────────────────────────────────────────

    /// Every banned phrase present is reported, regardless of case.
    #[test]
    fn test_phrase_filter_reports_every_match() {
        let filter = PhraseFilter::new(["game changer", "Synergy", "AI revolution"]);
        let found = filter.violations("Pure SYNERGY: this ai Revolution is a Game Changer");

        assert_eq!(found, ["game changer", "synergy", "ai revolution"]);
    }

    /// Clean text and empty phrases produce no violations.
    #[test]
    fn test_phrase_filter_clean_text() {
        let filter = PhraseFilter::new(["", "synergy", "synergy"]);
        assert_eq!(filter.phrases(), ["synergy"]);
        assert!(filter.violations("a plain release note").is_empty());
    }

    // ── 2. TOML config ────────────────────────────────────────────────────────

    /// The shipped policy file parses and matches the built-in defaults.
    #[test]
    fn test_shipped_policy_file() {
        let policy = ContentPolicy::from_toml_str(CONTENT_POLICY).unwrap();
        assert_eq!(policy.config(), ContentPolicy::default().config());
        assert_eq!(policy.phrase_violations("the AI Revolution"), ["ai revolution"]);
    }

    /// Keys absent from the TOML fall back to the defaults.
    #[test]
    fn test_toml_defaults() {
        let policy = ContentPolicy::from_toml_str("banned_domains = [\"spam.example\"]").unwrap();

        assert_eq!(policy.config().max_age_days, 365);
        assert_eq!(policy.config().banned_domains, ["spam.example"]);
        assert_eq!(policy.phrase_violations("what a game changer"), ["game changer"]);
    }

    /// Configured phrases replace the defaults.
    #[test]
    fn test_toml_overrides_phrases() {
        let policy = ContentPolicy::from_toml_str(
            r#"
            banned_phrases = ["disrupt"]
            max_age_days = 30
            "#,
        )
        .unwrap();

        assert!(policy.phrase_violations("a game changer").is_empty());
        assert_eq!(policy.phrase_violations("we Disrupt"), ["disrupt"]);
        assert_eq!(policy.config().max_age_days, 30);
    }

    /// Malformed TOML is a `ConfigError`.
    #[test]
    fn test_toml_parse_error() {
        match ContentPolicy::from_toml_str("this is not valid toml ][[[") {
            Err(CodexError::ConfigError { reason }) => {
                assert!(reason.contains("failed to parse policy TOML"), "got: {reason}");
            }
            other => panic!("expected ConfigError, got {:?}", other),
        }
    }

    /// A missing policy file is a `ConfigError` naming the path.
    #[test]
    fn test_policy_file_missing() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("content.toml");
        match ContentPolicy::from_file(&path) {
            Err(CodexError::ConfigError { reason }) => assert!(reason.contains("content.toml")),
            other => panic!("expected ConfigError, got {:?}", other),
        }
    }

    // ── 3. fact validation ────────────────────────────────────────────────────

    /// A well-formed recent fact is projected to its three core fields.
    #[test]
    fn test_valid_fact_projection() {
        let policy = ContentPolicy::default();
        let validated = policy
            .validate_fact(&fact("Rust 1.0 shipped in 2015", "https://blog.rust-lang.org", 10), now())
            .unwrap();

        assert_eq!(validated.statement, "Rust 1.0 shipped in 2015");
        assert_eq!(validated.source_url, "https://blog.rust-lang.org");
        assert_eq!(validated.published_at, days_ago(10));
    }

    /// Missing fields are listed in sorted order.
    #[test]
    fn test_fact_missing_fields() {
        let policy = ContentPolicy::default();
        let reason = expect_invalid_fact(policy.validate_fact(&json!({ "statement": "x" }), now()));
        assert_eq!(reason, "Fact missing fields: published_at, source_url");
    }

    /// Facts older than the configured window are rejected.
    #[test]
    fn test_fact_too_old() {
        let policy = ContentPolicy::from_toml_str("max_age_days = 30").unwrap();

        assert!(policy.validate_fact(&fact("fresh", "https://a.example", 29), now()).is_ok());
        let reason =
            expect_invalid_fact(policy.validate_fact(&fact("stale", "https://a.example", 31), now()));
        assert_eq!(reason, "Fact 'stale' is older than 30 days");
    }

    /// A source URL on a banned domain is rejected; empty domains never match.
    #[test]
    fn test_fact_banned_domain() {
        let policy = ContentPolicy::default()
            .with_extra_banned_domains(["".to_string(), "content-farm.example".to_string()]);

        let reason = expect_invalid_fact(
            policy.validate_fact(&fact("x", "https://content-farm.example/p/1", 1), now()),
        );
        assert!(reason.contains("uses banned domain content-farm.example"), "got: {reason}");
        assert!(policy.validate_fact(&fact("x", "https://ok.example", 1), now()).is_ok());
    }

    /// Banned phrases in the statement are rejected with every match listed.
    #[test]
    fn test_fact_banned_phrases() {
        let policy = ContentPolicy::default();
        let reason = expect_invalid_fact(policy.validate_fact(
            &fact("A game changer with real synergy", "https://a.example", 1),
            now(),
        ));
        assert_eq!(reason, "Statement uses banned phrases: game changer, synergy");
    }

    /// An unparsable publication time is rejected, not panicked on.
    #[test]
    fn test_fact_bad_timestamp() {
        let policy = ContentPolicy::default();
        let bad = json!({ "statement": "s", "source_url": "u", "published_at": "last week" });
        let reason = expect_invalid_fact(policy.validate_fact(&bad, now()));
        assert!(reason.contains("unparsable published_at"), "got: {reason}");
    }

    // ── 4. research fixtures + lineage ────────────────────────────────────────

    /// Both fixture shapes load; anything else is rejected.
    #[test]
    fn test_load_facts_shapes() {
        let dir = TempDir::new().unwrap();
        let list = dir.path().join("list.json");
        let wrapped = dir.path().join("wrapped.json");
        let scalar = dir.path().join("scalar.json");
        fs::write(&list, "[{}, {}]").unwrap();
        fs::write(&wrapped, r#"{"facts": [{}]}"#).unwrap();
        fs::write(&scalar, "42").unwrap();

        assert_eq!(load_facts(&list).unwrap().len(), 2);
        assert_eq!(load_facts(&wrapped).unwrap().len(), 1);
        expect_invalid_fact(load_facts(&scalar));
    }

    /// A passing fixture emits one success event with the validated facts.
    #[test]
    fn test_validate_research_success_emits_lineage() {
        let dir = TempDir::new().unwrap();
        let fixture = dir.path().join("facts.json");
        let facts = json!({ "facts": [fact("one", "https://a.example", 3), fact("two", "https://b.example", 4)] });
        fs::write(&fixture, facts.to_string()).unwrap();

        let sink = InMemoryLineageSink::new();
        let validated =
            validate_research(&ContentPolicy::default(), &sink, "job-9", &fixture, now()).unwrap();
        assert_eq!(validated.len(), 2);

        let records = sink.replay("job-9");
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].stage, STAGE_VALIDATION);
        assert_eq!(records[0].status, "success");
        assert_eq!(records[0].payload["facts"][1]["statement"], "two");
        assert!(records[0].payload["facts"][0].get("confidence").is_none());
        assert_eq!(
            records[0].checksum.as_deref(),
            Some(codex_core::sha256_hex_str(&fixture.display().to_string()).as_str())
        );
    }

    /// A failing fixture emits one error event and returns the error.
    #[test]
    fn test_validate_research_failure_emits_lineage() {
        let dir = TempDir::new().unwrap();
        let fixture = dir.path().join("facts.json");
        let facts = json!([fact("ok", "https://a.example", 1), fact("old", "https://a.example", 900)]);
        fs::write(&fixture, facts.to_string()).unwrap();

        let sink = InMemoryLineageSink::new();
        let reason = expect_invalid_fact(validate_research(
            &ContentPolicy::default(),
            &sink,
            "job-10",
            &fixture,
            now(),
        ));
        assert!(reason.contains("'old'"));

        let records = sink.records();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].status, "error");
        assert!(records[0].payload["error"].as_str().unwrap().contains("older than 365 days"));
    }

    /// An unreadable fixture fails before anything is emitted.
    #[test]
    fn test_validate_research_missing_fixture() {
        let dir = TempDir::new().unwrap();
        let sink = InMemoryLineageSink::new();
        let result = validate_research(
            &ContentPolicy::default(),
            &sink,
            "job",
            &dir.path().join("absent.json"),
            now(),
        );

        assert!(matches!(result, Err(CodexError::Io(_))));
        assert!(sink.records().is_empty());
    }

    // ── 5. drafts ─────────────────────────────────────────────────────────────

    /// Canonicalization trims and collapses whitespace per section.
    #[test]
    fn test_canonicalize_trim() {
        let draft = Draft {
            title: "  Title  with   spaces ".to_string(),
            body: " Line one \n Line two ".to_string(),
            cta: " Respond now ".to_string(),
        };
        let canonical = canonicalize(&draft);

        assert_eq!(canonical.title, "Title with spaces");
        assert_eq!(canonical.body, "Line one\nLine two");
        assert_eq!(canonical.cta, "Respond now");
    }

    /// Missing sections are listed in sorted order.
    #[test]
    fn test_draft_missing_keys() {
        match ContentPolicy::default().check_draft(&json!({ "body": "b" })) {
            Err(CodexError::InvalidDraft { reason }) => {
                assert_eq!(reason, "Draft missing keys: cta, title");
            }
            other => panic!("expected InvalidDraft, got {:?}", other),
        }
    }

    /// Banned phrases anywhere in the draft are rejected.
    #[test]
    fn test_draft_banned_phrases() {
        let draft = json!({ "title": "News", "body": "This is a game changer", "cta": "Join" });
        match ContentPolicy::default().check_draft(&draft) {
            Err(CodexError::InvalidDraft { reason }) => {
                assert_eq!(reason, "Draft violates banned phrases: game changer");
            }
            other => panic!("expected InvalidDraft, got {:?}", other),
        }
    }

    /// A clean draft file emits a success event carrying the canonical draft.
    #[test]
    fn test_check_draft_file_success() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("draft.json");
        fs::write(&path, json!({ "title": " Hello   world ", "body": " hi ", "cta": " go " }).to_string())
            .unwrap();

        let sink = InMemoryLineageSink::new();
        let canonical = check_draft_file(&ContentPolicy::default(), &sink, "job-d", &path).unwrap();
        assert_eq!(canonical.title, "Hello world");

        let records = sink.replay("job-d");
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].stage, STAGE_DRAFT_CHECK);
        assert_eq!(records[0].payload["cta"], "go");
        assert_eq!(records[0].payload.keys().collect::<Vec<_>>(), ["title", "body", "cta"]);
        let expected = codex_core::sha256_hex_str(r#"{"body":"hi","cta":"go","title":"Hello world"}"#);
        assert_eq!(records[0].checksum.as_deref(), Some(expected.as_str()));
    }

    /// A rejected draft file emits an error event keyed to its path.
    #[test]
    fn test_check_draft_file_failure() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("draft.json");
        fs::write(&path, json!({ "title": "Synergy", "body": "b", "cta": "c" }).to_string()).unwrap();

        let sink = InMemoryLineageSink::new();
        let result = check_draft_file(&ContentPolicy::default(), &sink, "job-d", &path);
        assert!(matches!(result, Err(CodexError::InvalidDraft { .. })));

        let records = sink.records();
        assert_eq!(records[0].status, "error");
        assert_eq!(
            records[0].checksum.as_deref(),
            Some(codex_core::sha256_hex_str(&path.display().to_string()).as_str())
        );
    }
}
