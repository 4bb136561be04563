/// A word proposed for sending, together with the topic it was fetched under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    pub word: String,
    pub topic: String,
}

/// A definition and an optional usage example for a word.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Definition {
    pub text: String,
    pub example: Option<String>,
}

impl Definition {
    pub fn new(text: impl Into<String>, example: Option<String>) -> Self {
        Self {
            text: text.into(),
            example,
        }
    }
}

/// Everything the notifier needs to announce one word.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WordRecord {
    pub word: String,
    pub topic: String,
    pub definition: String,
    pub example: Option<String>,
    /// Ordered, deduplicated, at most ten entries.
    pub synonyms: Vec<String>,
}
