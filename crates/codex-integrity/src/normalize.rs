//! Checksum normalization for scroll artifacts.
//!
//! A scroll records its own checksum in a markdown table row.  Hashing the
//! raw file would make the checksum depend on its previous value, so that row
//! is removed before hashing and the remaining lines are rejoined in a single
//! canonical form.

use std::{fs, io::ErrorKind, path::Path};

use tracing::warn;

use codex_contracts::error::{CodexError, CodexResult};
use codex_core::sha256_hex;

/// Lines whose trimmed text starts with this token are dropped.
pub const CHECKSUM_MARKER: &str = "| checksumSha256";

/// Characters that end a line, besides the `\r\n` pair.
const LINE_BREAKS: &[char] = &[
    '\n', '\r', '\x0b', '\x0c', '\x1c', '\x1d', '\x1e', '\u{85}', '\u{2028}', '\u{2029}',
];

/// Strips checksum-marker lines and canonicalizes line endings.
#[derive(Debug, Clone)]
pub struct Normalizer {
    marker: String,
}

impl Normalizer {
    /// A normalizer using [`CHECKSUM_MARKER`].
    pub fn new() -> Self {
        Self::with_marker(CHECKSUM_MARKER)
    }

    /// A normalizer that drops lines starting with `marker` instead.
    ///
    /// A marker that is empty after trimming would match every line, so it
    /// falls back to [`CHECKSUM_MARKER`].
    pub fn with_marker(marker: impl Into<String>) -> Self {
        let marker = marker.into();
        if marker.trim().is_empty() {
            warn!("empty checksum marker ignored; using {:?}", CHECKSUM_MARKER);
            return Self::new();
        }
        Self { marker }
    }

    pub fn marker(&self) -> &str {
        &self.marker
    }

    /// Canonical bytes for `content`.
    ///
    /// Lines are split on every break in [`split_lines`], marker lines
    /// removed, and the rest joined with `\n` plus one trailing `\n`.  Empty
    /// content becomes `"\n"`.
    pub fn normalize_str(&self, content: &str) -> Vec<u8> {
        let kept: Vec<&str> = split_lines(content)
            .filter(|line| !line.trim().starts_with(self.marker.as_str()))
            .collect();

        let mut out = kept.join("\n");
        out.push('\n');
        out.into_bytes()
    }

    /// Read the file at `path` and normalize it.
    ///
    /// Returns `CodexError::MissingArtifact` if the file does not exist.
    pub fn normalize_file(&self, path: &Path) -> CodexResult<Vec<u8>> {
        let content = fs::read_to_string(path).map_err(|e| match e.kind() {
            ErrorKind::NotFound => CodexError::MissingArtifact {
                path: path.display().to_string(),
            },
            _ => CodexError::Io(e),
        })?;
        Ok(self.normalize_str(&content))
    }

    /// SHA-256 hex of the normalized file at `path`.
    pub fn checksum_file(&self, path: &Path) -> CodexResult<String> {
        Ok(sha256_hex(&self.normalize_file(path)?))
    }
}

/// Split `content` into lines on `\r\n` and each of the single-character
/// breaks `\n \r \x0b \x0c \x1c \x1d \x1e U+0085 U+2028 U+2029`.
///
/// A break at the very end does not produce a trailing empty line.
pub fn split_lines(content: &str) -> impl Iterator<Item = &str> {
    let mut rest = content;
    std::iter::from_fn(move || {
        if rest.is_empty() {
            return None;
        }
        match rest.find(LINE_BREAKS) {
            Some(at) => {
                let line = &rest[..at];
                let width = if rest[at..].starts_with("\r\n") {
                    2
                } else {
                    rest[at..].chars().next().map_or(1, char::len_utf8)
                };
                rest = &rest[at + width..];
                Some(line)
            }
            None => {
                let line = rest;
                rest = "";
                Some(line)
            }
        }
    })
}

impl Default for Normalizer {
    fn default() -> Self {
        Self::new()
    }
}
