use std::hash::{Hash, Hasher};

use indexmap::IndexSet;
use serde::{Deserialize, Serialize};

use crate::normalize::Pipeline;

/// A single document in the training set.
///
/// Immutable after construction. The original text is kept for traceability
/// and never consulted by scoring; only the normalized text feeds the TF-IDF
/// statistics, and it is computed once, here, and never again.
///
/// Identity is the id alone: two documents with the same id compare equal
/// regardless of text. Id uniqueness within a corpus is the caller's
/// responsibility.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
    id: String,
    original_text: String,
    normalized_text: String,
}

impl Document {
    /// Build a document with the shared default pipeline (Snowball English
    /// stemmer, English stopword set).
    pub fn new(id: impl Into<String>, text: impl Into<String>) -> Self {
        Self::with_pipeline(id, text, Pipeline::shared())
    }

    /// Build a document through a caller-supplied pipeline.
    pub fn with_pipeline(
        id: impl Into<String>,
        text: impl Into<String>,
        pipeline: &Pipeline,
    ) -> Self {
        let original_text = text.into();
        let normalized_text = pipeline.normalize(&original_text);
        Self {
            id: id.into(),
            original_text,
            normalized_text,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// The text as supplied, unmodified.
    pub fn original_text(&self) -> &str {
        &self.original_text
    }

    /// The preprocessed text scoring operates on.
    pub fn normalized_text(&self) -> &str {
        &self.normalized_text
    }

    /// Terms of the normalized text, in order, with repeats.
    pub fn terms(&self) -> impl Iterator<Item = &str> {
        self.normalized_text.split_whitespace()
    }

    /// Distinct terms in first-appearance order.
    pub fn term_set(&self) -> IndexSet<&str> {
        self.terms().collect()
    }
}

impl PartialEq for Document {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Document {}

impl Hash for Document {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalizes_at_construction() {
        let doc = Document::new("a", "The Cats and Dogs");
        assert_eq!(doc.original_text(), "The Cats and Dogs");
        assert_eq!(doc.normalized_text(), "cat dog");
    }

    #[test]
    fn identity_is_the_id() {
        let a = Document::new("a", "cat");
        let b = Document::new("a", "dog");
        let c = Document::new("c", "cat");
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn term_set_deduplicates_in_first_appearance_order() {
        let doc = Document::new("a", "dog cat dog bird cat");
        let terms: Vec<&str> = doc.term_set().into_iter().collect();
        assert_eq!(terms, vec!["dog", "cat", "bird"]);
    }

    #[test]
    fn empty_text_yields_no_terms() {
        let doc = Document::new("a", "");
        assert_eq!(doc.normalized_text(), "");
        assert_eq!(doc.terms().count(), 0);
    }
}
