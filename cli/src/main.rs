//! Codex lineage toolkit CLI.
//!
//! Emits and replays lineage events, verifies scroll checksums against the
//! scroll index, and runs the content policy over research fixtures and
//! drafts.  Machine-readable JSON goes to stdout; diagnostics and tracing go
//! to stderr.
//!
//! Usage:
//!   codex emit --job-id job-7 --stage ingress --payload '{"items":3}'
//!   codex replay job-7
//!   codex verify --scroll scrolls/stellar-integrity-audit.md
//!   codex validate-research --fixture facts.json --job-id job-7
//!   codex check-draft --draft draft.json --job-id job-7
//!
//! Exit codes: 0 on success or a verified scroll, 1 on a checksum mismatch
//! or a failed command, 2 when `verify` cannot run (missing index, unknown
//! scroll, missing artifact).

use std::path::{Path, PathBuf};

use chrono::Utc;
use clap::{Parser, Subcommand};
use serde_json::{json, Value};
use tracing_subscriber::EnvFilter;

use codex_contracts::{
    error::{CodexError, CodexResult},
    record::{StoredRecord, STATUS_SUCCESS},
};
use codex_core::traits::LineageSink;
use codex_integrity::ScrollVerifier;
use codex_lineage::LineageLogger;
use codex_policy::{draft::check_draft_file, research::validate_research, ContentPolicy};

const EXIT_OK: i32 = 0;
const EXIT_FAILED: i32 = 1;
const EXIT_FATAL: i32 = 2;

// ── CLI definition ────────────────────────────────────────────────────────────

/// Codex lineage toolkit.
///
/// Every pipeline stage appends to one shared NDJSON lineage log; these
/// subcommands write to it, read it back, and audit scroll integrity.
#[derive(Parser)]
#[command(
    name = "codex",
    about = "Codex lineage log, scroll integrity, and content policy toolkit",
    long_about = "Appends and replays job lineage events, verifies scroll checksums\n\
                  against the scroll index, and checks research and drafts against\n\
                  the content policy."
)]
struct Cli {
    /// Lineage log file (NDJSON, append-only).
    #[arg(long, global = true, env = "CODEX_LINEAGE_LOG", default_value = LineageLogger::DEFAULT_PATH)]
    log: PathBuf,

    /// Content policy TOML file.  Built-in defaults apply when omitted.
    #[arg(long, global = true, env = "CODEX_POLICY")]
    policy: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Append one lineage event.
    Emit {
        #[arg(long)]
        job_id: String,
        #[arg(long)]
        stage: String,
        #[arg(long, default_value = STATUS_SUCCESS)]
        status: String,
        /// Payload as a JSON object.
        #[arg(long, default_value = "{}")]
        payload: String,
        /// String whose SHA-256 is recorded as the event checksum.
        #[arg(long)]
        checksum_source: Option<String>,
    },
    /// Print every lineage event recorded for a job.
    Replay {
        job_id: String,
    },
    /// Verify a scroll's normalized checksum against the scroll index.
    Verify {
        #[arg(long, default_value = "scrolls/stellar-integrity-audit.md")]
        scroll: PathBuf,
        #[arg(long, default_value = "scrolls/scroll_index.json")]
        index: PathBuf,
        /// Entry name in the index.
        #[arg(long, default_value = "stellar_integrity_audit")]
        name: String,
        #[arg(long, default_value = ScrollVerifier::DEFAULT_JOB_ID)]
        job_id: String,
    },
    /// Validate research facts for recency, source domains, and banned phrases.
    ValidateResearch {
        /// Research JSON: a list of facts or an object with a `facts` list.
        #[arg(long)]
        fixture: PathBuf,
        #[arg(long, default_value = "local-job")]
        job_id: String,
        /// Override the policy's maximum fact age.
        #[arg(long)]
        max_age_days: Option<u32>,
        /// Additional banned source domain (repeatable).
        #[arg(long = "banned-domain")]
        banned_domains: Vec<String>,
    },
    /// Check a draft (title/body/cta) against the content policy.
    CheckDraft {
        #[arg(long)]
        draft: PathBuf,
        #[arg(long, default_value = "local-job")]
        job_id: String,
    },
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() {
    // Initialize structured logging on stderr.  Set RUST_LOG=debug for detail.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();

    let cli = Cli::parse();
    let logger = LineageLogger::new(&cli.log);

    let code = match cli.command {
        Command::Verify {
            scroll,
            index,
            name,
            job_id,
        } => run_verify(&scroll, &index, &name, &job_id),
        Command::Emit {
            job_id,
            stage,
            status,
            payload,
            checksum_source,
        } => report(run_emit(
            &logger,
            &job_id,
            &stage,
            &status,
            &payload,
            checksum_source.as_deref(),
        )),
        Command::Replay { job_id } => report(run_replay(&logger, &job_id)),
        Command::ValidateResearch {
            fixture,
            job_id,
            max_age_days,
            banned_domains,
        } => report(load_policy(cli.policy.as_deref()).and_then(|policy| {
            let mut policy = policy.with_extra_banned_domains(banned_domains);
            if let Some(days) = max_age_days {
                policy = policy.with_max_age_days(days);
            }
            run_validate_research(&policy, &logger, &job_id, &fixture)
        })),
        Command::CheckDraft { draft, job_id } => report(
            load_policy(cli.policy.as_deref())
                .and_then(|policy| run_check_draft(&policy, &logger, &job_id, &draft)),
        ),
    };

    std::process::exit(code);
}

/// Map a command result to an exit code, printing any error.
fn report(result: CodexResult<()>) -> i32 {
    match result {
        Ok(()) => EXIT_OK,
        Err(e) => {
            eprintln!("codex: {}", e);
            EXIT_FAILED
        }
    }
}

fn load_policy(path: Option<&Path>) -> CodexResult<ContentPolicy> {
    match path {
        Some(path) => ContentPolicy::from_file(path),
        None => Ok(ContentPolicy::default()),
    }
}

fn print_json(value: &impl serde::Serialize) -> CodexResult<()> {
    let text = serde_json::to_string_pretty(value).map_err(|e| CodexError::Serialization {
        reason: format!("failed to render output: {}", e),
    })?;
    println!("{}", text);
    Ok(())
}

// ── Commands ──────────────────────────────────────────────────────────────────

fn run_verify(scroll: &Path, index: &Path, name: &str, job_id: &str) -> i32 {
    let verifier = ScrollVerifier::new().with_job_id(job_id);

    let report = match verifier.verify(scroll, index, name) {
        Ok(report) => report,
        Err(e) => {
            eprintln!("codex: {}", e);
            return EXIT_FATAL;
        }
    };

    if let Err(e) = print_json(&report) {
        eprintln!("codex: {}", e);
        return EXIT_FATAL;
    }

    if report.is_verified() {
        EXIT_OK
    } else {
        EXIT_FAILED
    }
}

fn run_emit(
    logger: &LineageLogger,
    job_id: &str,
    stage: &str,
    status: &str,
    payload: &str,
    checksum_source: Option<&str>,
) -> CodexResult<()> {
    let payload: Value = serde_json::from_str(payload).map_err(|e| CodexError::Serialization {
        reason: format!("--payload is not valid JSON: {}", e),
    })?;
    logger.emit(job_id, stage, status, payload, checksum_source)
}

fn run_replay(logger: &LineageLogger, job_id: &str) -> CodexResult<()> {
    let events: Vec<StoredRecord> = logger.replay(job_id)?.collect();

    if events.is_empty() {
        println!("{}", json!({ "jobId": job_id, "events": [] }));
        return Ok(());
    }

    print_json(&json!({ "jobId": job_id, "events": events }))
}

fn run_validate_research(
    policy: &ContentPolicy,
    logger: &LineageLogger,
    job_id: &str,
    fixture: &Path,
) -> CodexResult<()> {
    let facts = validate_research(policy, logger, job_id, fixture, Utc::now())?;
    print_json(&json!({ "facts": facts }))
}

fn run_check_draft(
    policy: &ContentPolicy,
    logger: &LineageLogger,
    job_id: &str,
    draft: &Path,
) -> CodexResult<()> {
    let canonical = check_draft_file(policy, logger, job_id, draft)?;
    print_json(&canonical)
}
