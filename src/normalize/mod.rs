//! Text preprocessing.
//!
//! Raw document text is normalized exactly once, at [`crate::Document`]
//! construction time: lowercase the whole text, split it on whitespace, stem
//! every token, drop stemmed tokens that sit in the stopword set, and rejoin
//! the survivors with single spaces. Scoring only ever sees the normalized
//! form.

pub mod stopwords;

use std::borrow::Cow;
use std::collections::HashSet;
use std::fmt;

use once_cell::sync::Lazy;
use rust_stemmers::{Algorithm, Stemmer};
use tracing::trace;

/// Stemming seam.
///
/// A stemmer is a pure function from token to token with no side effects.
/// The default pipeline plugs in the Snowball English stemmer; tests can
/// substitute their own (an identity stemmer keeps fixtures predictable).
pub trait Stem {
    fn stem<'t>(&self, token: &'t str) -> Cow<'t, str>;
}

impl Stem for Stemmer {
    fn stem<'t>(&self, token: &'t str) -> Cow<'t, str> {
        Stemmer::stem(self, token)
    }
}

static DEFAULT: Lazy<Pipeline> = Lazy::new(Pipeline::new);

/// Preprocessing pipeline: a stemmer plus a stopword set.
///
/// The pipeline is stateless with respect to the corpus; one instance can
/// normalize any number of documents.
pub struct Pipeline {
    stemmer: Box<dyn Stem + Send + Sync>,
    stopwords: HashSet<String>,
}

impl Pipeline {
    /// English defaults: Snowball stemmer, NLTK stopword list.
    pub fn new() -> Self {
        Self::with(
            Box::new(Stemmer::create(Algorithm::English)),
            stopwords::english().clone(),
        )
    }

    /// Pipeline with a caller-supplied stemmer and stopword set.
    pub fn with(stemmer: Box<dyn Stem + Send + Sync>, stopwords: HashSet<String>) -> Self {
        Self { stemmer, stopwords }
    }

    /// Shared instance of the default English pipeline.
    pub fn shared() -> &'static Pipeline {
        &DEFAULT
    }

    /// Produce the normalized form of `text`.
    ///
    /// Tokens are whatever whitespace splitting yields, so punctuation stays
    /// attached unless it is whitespace-separated. The stopword check runs on
    /// the stemmed token. Empty input normalizes to an empty string.
    pub fn normalize(&self, text: &str) -> String {
        let lowered = text.to_lowercase();
        let mut normalized = String::with_capacity(lowered.len());
        for token in lowered.split_whitespace() {
            let stemmed = self.stemmer.stem(token);
            if self.stopwords.contains(stemmed.as_ref()) {
                continue;
            }
            if !normalized.is_empty() {
                normalized.push(' ');
            }
            normalized.push_str(&stemmed);
        }
        trace!(input_len = text.len(), output_len = normalized.len(), "normalized text");
        normalized
    }
}

impl Default for Pipeline {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Pipeline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Pipeline")
            .field("stopwords", &self.stopwords.len())
            .finish_non_exhaustive()
    }
}
