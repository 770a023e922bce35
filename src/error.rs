use thiserror::Error;

/// Errors reported by the scoring engine.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// IDF was requested for a term that no document in the corpus contains.
    /// The formula divides by the document frequency, which is zero here.
    #[error("unknown term {term:?}: not present in any document")]
    UnknownTerm { term: String },
}
