//! Scroll index entries.
//!
//! The index is a JSON array maintained outside this toolkit.  It is only
//! ever read.

use serde::{Deserialize, Serialize};

/// The hash algorithm assumed when an entry does not name one.
pub const DEFAULT_HASH_ALGORITHM: &str = "sha256";

fn default_hash_algorithm() -> String {
    DEFAULT_HASH_ALGORITHM.to_string()
}

/// The expected checksum of one named scroll.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexEntry {
    /// Unique scroll name, e.g. "stellar_integrity_audit".
    pub name: String,

    /// Expected lowercase hex SHA-256 of the normalized scroll.
    pub checksum_sha256: String,

    #[serde(default = "default_hash_algorithm")]
    pub hash_algorithm: String,
}
