//! Case-insensitive banned-phrase scan.

/// A set of banned phrases, stored lowercase.
#[derive(Debug, Clone, Default)]
pub struct PhraseFilter {
    phrases: Vec<String>,
}

impl PhraseFilter {
    /// Build a filter from `phrases`.
    ///
    /// Phrases are lowercased so that mixed-case entries still match.  Empty
    /// and duplicate phrases are dropped; declaration order is kept.
    pub fn new<I, S>(phrases: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut lowered: Vec<String> = Vec::new();
        for phrase in phrases {
            let phrase = phrase.as_ref().to_lowercase();
            if !phrase.is_empty() && !lowered.contains(&phrase) {
                lowered.push(phrase);
            }
        }
        Self { phrases: lowered }
    }

    /// Every banned phrase that occurs in `text`, in declaration order.
    pub fn violations(&self, text: &str) -> Vec<&str> {
        let lowered = text.to_lowercase();
        self.phrases
            .iter()
            .filter(|phrase| lowered.contains(phrase.as_str()))
            .map(String::as_str)
            .collect()
    }

    pub fn phrases(&self) -> &[String] {
        &self.phrases
    }
}
