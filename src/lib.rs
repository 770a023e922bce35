//! TF-IDF scoring and document similarity ranking.
//!
//! The engine preprocesses raw text into a normalized form (lowercasing,
//! whitespace tokenization, Snowball stemming, stopword removal), computes
//! memoized TF and IDF statistics over a document collection, and ranks every
//! document's neighbors by cosine similarity over the terms the pair shares.
//!
//! ```
//! use docsim::{Corpus, Document};
//!
//! let mut corpus = Corpus::with_documents([
//!     Document::new("x", "cat dog"),
//!     Document::new("y", "cat bird"),
//!     Document::new("z", "fish whale"),
//! ]);
//! let rankings = corpus.evaluate();
//! assert_eq!(rankings.neighbors("x").unwrap()[0].id, "y");
//! assert!(rankings.neighbors("z").unwrap().is_empty());
//! ```

pub mod corpus;
pub mod error;
pub mod normalize;

/// The document collection and scoring engine.
/// Owns the documents plus the memoized TF and IDF tables, and produces the
/// per-document neighbor rankings via [`Corpus::evaluate`].
pub use corpus::Corpus;

/// A single immutable document: an id, the original text, and the normalized
/// text derived once at construction. Only the normalized text feeds scoring.
pub use corpus::document::Document;

/// Neighbor rankings produced by [`Corpus::evaluate`]: every document id
/// mapped to its neighbors sorted by descending similarity, each carried as a
/// [`Hit`] of neighbor id and score.
pub use corpus::rank::{Hit, Rankings};

/// Engine errors. The one fallible core operation is [`Corpus::idf`] on a
/// term absent from every document.
pub use error::Error;

/// The preprocessing pipeline and the stemmer seam it consumes.
pub use normalize::{Pipeline, Stem};
