//! Research facts and content drafts checked by the content policy.

use serde::{Deserialize, Serialize};

/// A research fact that passed every policy check, projected to the three
/// fields downstream stages rely on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidatedFact {
    pub statement: String,
    pub source_url: String,
    /// RFC 3339 publication instant exactly as it appeared in the fixture.
    pub published_at: String,
}

/// A social post draft split into its three sections.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Draft {
    pub title: String,
    pub body: String,
    pub cta: String,
}
