//! SHA-256 helpers.
//!
//! Every checksum in the toolkit is a lowercase 64-character hex string.

use sha2::{Digest, Sha256};

/// SHA-256 of `bytes` as lowercase hex.
pub fn sha256_hex(bytes: &[u8]) -> String {
    hex::encode(Sha256::digest(bytes))
}

/// SHA-256 of the UTF-8 encoding of `value` as lowercase hex.
pub fn sha256_hex_str(value: &str) -> String {
    sha256_hex(value.as_bytes())
}
