//! Error types for the Codex lineage toolkit.
//!
//! All fallible operations return `CodexResult<T>`.  Variants carry the path
//! or name that caused the failure so the CLI can print an actionable message
//! without extra context.

use thiserror::Error;

/// The unified error type for every Codex crate.
#[derive(Debug, Error)]
pub enum CodexError {
    /// The checksum index could not be read or is not a JSON array of entries.
    #[error("missing scroll index at {path}: {reason}")]
    MissingIndex { path: String, reason: String },

    /// The index was loaded but holds no entry with the requested name.
    ///
    /// Fatal: this is never reported as a checksum mismatch.
    #[error("scroll named '{name}' not found in index {index}")]
    UnknownScroll { name: String, index: String },

    /// The artifact to normalize does not exist.
    #[error("missing scroll file at {path}")]
    MissingArtifact { path: String },

    /// Any other I/O failure, including lineage log writes.  Never retried.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A value could not be serialized or a JSON document could not be parsed.
    #[error("serialization error: {reason}")]
    Serialization { reason: String },

    /// A policy file or CLI setting is missing or malformed.
    #[error("configuration error: {reason}")]
    ConfigError { reason: String },

    /// A research fact failed a recency, domain, phrase, or shape check.
    #[error("invalid fact: {reason}")]
    InvalidFact { reason: String },

    /// A content draft is missing sections or uses banned phrases.
    #[error("invalid draft: {reason}")]
    InvalidDraft { reason: String },
}

/// Convenience alias used throughout the Codex crates.
pub type CodexResult<T> = Result<T, CodexError>;
