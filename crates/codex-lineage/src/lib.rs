//! # codex-lineage
//!
//! Append-only, newline-delimited JSON lineage log for the Codex pipeline.
//!
//! ## Overview
//!
//! Every pipeline stage reports a `LogRecord` through a `LineageSink`.  The
//! file-backed `LineageLogger` appends one JSON object per line and never
//! rewrites earlier lines; `LineageLogger::replay` lazily reads the log back
//! and yields the records of a single job, as stored, in the order they were
//! written.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use codex_core::traits::LineageSink;
//! use codex_lineage::LineageLogger;
//! use serde_json::json;
//!
//! let logger = LineageLogger::new("scrolls/latest.ndjson");
//! logger.emit("job-7", "ingress", "success", json!({ "items": 12 }), Some("rust async"))?;
//!
//! for record in logger.replay("job-7")? {
//!     println!("{} {}", record["stage"], record["status"]);
//! }
//! ```

pub mod file;
pub mod memory;
pub mod record;
pub mod replay;

pub use file::LineageLogger;
pub use memory::InMemoryLineageSink;
pub use record::{build_record, payload_size};
pub use replay::Replay;

// ── Tests ─────────────────────────────────────────────────────────────────────
