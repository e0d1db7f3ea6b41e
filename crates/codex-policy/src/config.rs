//! Content policy configuration schema.
//!
//! A `PolicyConfig` is deserialized from TOML.  Every key is optional; a
//! missing key falls back to the built-in default.
//!
//! Example:
//! ```toml
//! banned_phrases = ["game changer", "synergy"]
//! banned_domains = ["content-farm.example"]
//! max_age_days = 180
//! ```

use serde::{Deserialize, Serialize};

/// Phrases rejected when no policy file overrides them.
pub const DEFAULT_BANNED_PHRASES: [&str; 4] = [
    "unlocking potential",
    "game changer",
    "synergy",
    "AI revolution",
];

/// Oldest research fact accepted when no policy file overrides it.
pub const DEFAULT_MAX_AGE_DAYS: u32 = 365;

fn default_banned_phrases() -> Vec<String> {
    DEFAULT_BANNED_PHRASES.iter().map(|p| p.to_string()).collect()
}

fn default_max_age_days() -> u32 {
    DEFAULT_MAX_AGE_DAYS
}

/// The top-level structure of a content policy file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PolicyConfig {
    /// Matched case-insensitively as substrings of drafts and fact statements.
    #[serde(default = "default_banned_phrases")]
    pub banned_phrases: Vec<String>,

    /// A fact whose `source_url` contains any of these is rejected.
    /// Empty strings are ignored.
    #[serde(default)]
    pub banned_domains: Vec<String>,

    /// Facts published longer ago than this are rejected.
    #[serde(default = "default_max_age_days")]
    pub max_age_days: u32,
}

impl Default for PolicyConfig {
    fn default() -> Self {
        Self {
            banned_phrases: default_banned_phrases(),
            banned_domains: Vec::new(),
            max_age_days: DEFAULT_MAX_AGE_DAYS,
        }
    }
}
