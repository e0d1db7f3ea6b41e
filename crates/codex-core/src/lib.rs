//! # codex-core
//!
//! The seams shared by every Codex component.
//!
//! This crate provides:
//! - The `LineageSink` trait that pipeline stages report through
//! - SHA-256 hex digest helpers used by both the lineage log and the
//!   integrity verifier
//! - The second-precision UTC timestamp format every record carries
//!
//! ## Usage
//!
//! ```rust,ignore
//! use codex_core::{digest::sha256_hex, traits::LineageSink};
//! ```

pub mod digest;
pub mod time;
pub mod traits;

pub use digest::{sha256_hex, sha256_hex_str};
pub use time::{utc_now, utc_timestamp};
pub use traits::LineageSink;

// ── Tests ─────────────────────────────────────────────────────────────────────
