//! # codex-integrity
//!
//! Content-integrity checks for Codex scrolls.
//!
//! This crate provides [`normalize::Normalizer`], which strips the
//! self-referential checksum row from a scroll before hashing, and
//! [`verifier::ScrollVerifier`], which compares the normalized SHA-256 of a
//! scroll against the externally maintained scroll index.
//!
//! ## Quick start
//!
//! ```rust,ignore
//! use std::path::Path;
//! use codex_integrity::ScrollVerifier;
//!
//! let report = ScrollVerifier::new().verify(
//!     Path::new("scrolls/stellar-integrity-audit.md"),
//!     Path::new("scrolls/scroll_index.json"),
//!     "stellar_integrity_audit",
//! )?;
//! std::process::exit(if report.is_verified() { 0 } else { 1 });
//! ```

pub mod index;
pub mod normalize;
pub mod verifier;

pub use index::ScrollIndex;
pub use normalize::{split_lines, Normalizer, CHECKSUM_MARKER};
pub use verifier::ScrollVerifier;

// ── Tests ─────────────────────────────────────────────────────────────────────
