//! Loading the externally maintained scroll index.

use std::{fs, path::Path};

use codex_contracts::{
    error::{CodexError, CodexResult},
    index::IndexEntry,
};

/// The parsed contents of a scroll index file.
#[derive(Debug, Clone)]
pub struct ScrollIndex {
    path: String,
    entries: Vec<IndexEntry>,
}

impl ScrollIndex {
    /// Read and parse the JSON array at `path`.
    ///
    /// A missing file, an unreadable file, and content that is not an array
    /// of entries all map to `CodexError::MissingIndex`.
    pub fn load(path: &Path) -> CodexResult<Self> {
        let display = path.display().to_string();

        let contents = fs::read_to_string(path).map_err(|e| CodexError::MissingIndex {
            path: display.clone(),
            reason: e.to_string(),
        })?;
        let entries: Vec<IndexEntry> =
            serde_json::from_str(&contents).map_err(|e| CodexError::MissingIndex {
                path: display.clone(),
                reason: format!("failed to parse scroll index: {}", e),
            })?;

        Ok(Self {
            path: display,
            entries,
        })
    }

    /// The entry named `name`, or `CodexError::UnknownScroll`.
    ///
    /// With duplicate names the first entry wins.
    pub fn entry(&self, name: &str) -> CodexResult<&IndexEntry> {
        self.entries
            .iter()
            .find(|entry| entry.name == name)
            .ok_or_else(|| CodexError::UnknownScroll {
                name: name.to_string(),
                index: self.path.clone(),
            })
    }

    pub fn entries(&self) -> &[IndexEntry] {
        &self.entries
    }
}
