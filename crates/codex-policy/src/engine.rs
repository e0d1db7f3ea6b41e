//! TOML-driven content policy.
//!
//! `ContentPolicy` loads a `PolicyConfig` from a TOML string or file and
//! exposes the checks the pipeline stages run before anything leaves the
//! machine: research fact validation (see `research`) and draft checks (see
//! `draft`).  Both share the phrase filter built here.

use std::path::Path;

use tracing::debug;

use codex_contracts::error::{CodexError, CodexResult};

use crate::{config::PolicyConfig, phrases::PhraseFilter};

/// The content policy every stage checks against.
///
/// ```rust,ignore
/// use codex_policy::ContentPolicy;
///
/// let policy = ContentPolicy::from_file(Path::new("policies/content.toml"))?;
/// assert!(policy.phrase_violations("plain text").is_empty());
/// ```
#[derive(Debug, Clone)]
pub struct ContentPolicy {
    config: PolicyConfig,
    phrases: PhraseFilter,
}

impl ContentPolicy {
    pub fn new(config: PolicyConfig) -> Self {
        let phrases = PhraseFilter::new(&config.banned_phrases);
        Self { config, phrases }
    }

    /// Parse `s` as TOML and build a `ContentPolicy`.
    ///
    /// Returns `CodexError::ConfigError` if the TOML is malformed or does not
    /// match the `PolicyConfig` schema.
    pub fn from_toml_str(s: &str) -> CodexResult<Self> {
        let config: PolicyConfig = toml::from_str(s).map_err(|e| CodexError::ConfigError {
            reason: format!("failed to parse policy TOML: {}", e),
        })?;
        debug!(
            banned_phrases = config.banned_phrases.len(),
            banned_domains = config.banned_domains.len(),
            max_age_days = config.max_age_days,
            "content policy loaded"
        );
        Ok(Self::new(config))
    }

    /// Read the file at `path` and parse it as a TOML policy.
    pub fn from_file(path: &Path) -> CodexResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| CodexError::ConfigError {
            reason: format!("failed to read policy file '{}': {}", path.display(), e),
        })?;
        Self::from_toml_str(&contents)
    }

    /// Add banned domains on top of the configured ones.
    pub fn with_extra_banned_domains<I, S>(mut self, domains: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for domain in domains {
            let domain = domain.into();
            if !self.config.banned_domains.contains(&domain) {
                self.config.banned_domains.push(domain);
            }
        }
        self
    }

    /// Override the maximum accepted fact age.
    pub fn with_max_age_days(mut self, days: u32) -> Self {
        self.config.max_age_days = days;
        self
    }

    pub fn config(&self) -> &PolicyConfig {
        &self.config
    }

    /// Every banned phrase found in `text`, not just the first.
    pub fn phrase_violations(&self, text: &str) -> Vec<&str> {
        self.phrases.violations(text)
    }

    /// The first configured banned domain that `url` contains.
    pub fn banned_domain_in(&self, url: &str) -> Option<&str> {
        self.config
            .banned_domains
            .iter()
            .map(String::as_str)
            .find(|domain| !domain.is_empty() && url.contains(domain))
    }
}

impl Default for ContentPolicy {
    fn default() -> Self {
        Self::new(PolicyConfig::default())
    }
}
