//! The corpus and its scoring engine.
//!
//! [`Corpus`] owns the document collection together with two memoized
//! statistics tables:
//!
//! - a TF cache, filled lazily one document at a time (a single counting pass
//!   over a document serves every later term lookup against it), and
//! - an IDF cache, built for the whole vocabulary in one corpus scan, since a
//!   single term's document frequency costs the same scan as all of them.
//!
//! IDF depends on the total document count for every term, so any mutation of
//! the document set drops the entire IDF table. The TF cache is keyed per
//! document and survives unrelated additions.

pub mod document;
pub mod rank;

use indexmap::{IndexMap, IndexSet};
use tracing::{debug, trace};

use crate::error::Error;
pub use document::Document;

/// Document collection plus memoized TF/IDF state.
///
/// Every instance owns its caches; nothing is shared between corpora. All
/// operations are synchronous in-memory computation, and `&mut self` on the
/// mutating and cache-filling methods serializes them against each other.
#[derive(Debug, Clone, Default)]
pub struct Corpus {
    /// Insertion-ordered id -> document table.
    documents: IndexMap<String, Document>,
    /// Document id -> full term count map, filled on first TF request.
    tf_cache: IndexMap<String, IndexMap<String, u32>>,
    /// Term -> IDF over the current document set; `None` when stale.
    idf_cache: Option<IndexMap<String, f64>>,
}

impl Corpus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Equivalent to `new` followed by [`Corpus::add_documents`].
    pub fn with_documents(documents: impl IntoIterator<Item = Document>) -> Self {
        let mut corpus = Self::new();
        corpus.add_documents(documents);
        corpus
    }

    /// Append a document to the training set.
    ///
    /// The whole IDF table goes stale: the document count changed, and that
    /// count feeds every term's IDF, not only the new document's terms.
    /// Re-adding an existing id replaces that document in place and drops its
    /// cached term counts.
    pub fn add_document(&mut self, document: Document) {
        self.idf_cache = None;
        let id = document.id().to_string();
        if self.documents.insert(id.clone(), document).is_some() {
            self.tf_cache.swap_remove(&id);
        }
    }

    /// [`Corpus::add_document`] for each element, in order.
    pub fn add_documents(&mut self, documents: impl IntoIterator<Item = Document>) {
        for document in documents {
            self.add_document(document);
        }
    }

    /// Number of documents in the training set.
    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.documents.contains_key(id)
    }

    pub fn get(&self, id: &str) -> Option<&Document> {
        self.documents.get(id)
    }

    /// Documents in insertion order.
    pub fn documents(&self) -> impl Iterator<Item = &Document> {
        self.documents.values()
    }

    /// Number of distinct terms across all normalized texts.
    pub fn vocabulary_size(&self) -> usize {
        let mut vocabulary: IndexSet<&str> = IndexSet::new();
        for document in self.documents.values() {
            vocabulary.extend(document.terms());
        }
        vocabulary.len()
    }

    /// Raw count of `term` in the identified document's normalized text.
    ///
    /// Terms absent from the document, and ids absent from the corpus, both
    /// count 0. The first request against a document counts every term of
    /// that document and caches the whole map.
    pub fn tf(&mut self, term: &str, id: &str) -> u32 {
        self.fill_tf(id);
        self.tf_cache
            .get(id)
            .and_then(|counts| counts.get(term))
            .copied()
            .unwrap_or(0)
    }

    /// Number of documents whose normalized text contains `term` at least
    /// once (set membership, not raw count).
    pub fn df(&self, term: &str) -> usize {
        self.documents
            .values()
            .filter(|document| document.terms().any(|t| t == term))
            .count()
    }

    /// Inverse document frequency: `1 + log10(N / df(term))`.
    ///
    /// Fails with [`Error::UnknownTerm`] for a term no document contains,
    /// where the formula is undefined. Always `>= 1` otherwise, since
    /// `df <= N`.
    pub fn idf(&mut self, term: &str) -> Result<f64, Error> {
        self.ensure_idf();
        self.idf_cache
            .as_ref()
            .and_then(|table| table.get(term))
            .copied()
            .ok_or_else(|| Error::UnknownTerm {
                term: term.to_string(),
            })
    }

    /// Term -> `tf * idf` map for one document, lexicographically ordered.
    /// `None` for an id not in the corpus.
    pub fn tfidf_scores(&mut self, id: &str) -> Option<IndexMap<String, f64>> {
        if !self.documents.contains_key(id) {
            return None;
        }
        self.ensure_idf();
        self.fill_tf(id);
        Some(self.score_map(id))
    }

    /// Rebuild the IDF table if the document set changed since the last
    /// build. One pass over the corpus computes df for every term, then all
    /// IDF values are cached at once.
    fn ensure_idf(&mut self) {
        if self.idf_cache.is_some() {
            return;
        }
        let doc_num = self.documents.len() as f64;
        let mut document_frequency: IndexMap<String, usize> = IndexMap::new();
        for document in self.documents.values() {
            for term in document.term_set() {
                *document_frequency.entry(term.to_string()).or_insert(0) += 1;
            }
        }
        let table: IndexMap<String, f64> = document_frequency
            .into_iter()
            .map(|(term, df)| (term, 1.0 + (doc_num / df as f64).log10()))
            .collect();
        debug!(documents = self.documents.len(), terms = table.len(), "rebuilt idf table");
        self.idf_cache = Some(table);
    }

    /// Count the identified document's terms into the TF cache, once.
    /// Unknown ids cache nothing.
    fn fill_tf(&mut self, id: &str) {
        if self.tf_cache.contains_key(id) {
            return;
        }
        let Some(document) = self.documents.get(id) else {
            return;
        };
        let mut counts: IndexMap<String, u32> = IndexMap::new();
        for term in document.terms() {
            *counts.entry(term.to_string()).or_insert(0) += 1;
        }
        trace!(id, terms = counts.len(), "cached term counts");
        self.tf_cache.insert(id.to_string(), counts);
    }

    /// Project one document's cached counts against the IDF table.
    /// Both caches must be filled first; missing entries yield an empty map.
    fn score_map(&self, id: &str) -> IndexMap<String, f64> {
        let (Some(counts), Some(idf)) = (self.tf_cache.get(id), self.idf_cache.as_ref()) else {
            return IndexMap::new();
        };
        let mut scores: IndexMap<String, f64> = counts
            .iter()
            .filter_map(|(term, &count)| {
                idf.get(term)
                    .map(|&weight| (term.clone(), f64::from(count) * weight))
            })
            .collect();
        scores.sort_keys();
        scores
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f64 = 1e-9;

    fn zoo() -> Corpus {
        Corpus::with_documents([
            Document::new("x", "cat dog"),
            Document::new("y", "cat bird"),
            Document::new("z", "fish whale"),
        ])
    }

    #[test]
    fn tf_counts_raw_occurrences() {
        let mut corpus = Corpus::with_documents([Document::new("a", "cat cat dog")]);
        assert_eq!(corpus.tf("cat", "a"), 2);
        assert_eq!(corpus.tf("dog", "a"), 1);
    }

    #[test]
    fn tf_is_zero_for_absent_terms_and_unknown_ids() {
        let mut corpus = Corpus::with_documents([Document::new("a", "cat dog")]);
        assert_eq!(corpus.tf("bird", "a"), 0);
        assert_eq!(corpus.tf("cat", "nope"), 0);
    }

    #[test]
    fn idf_matches_the_formula() {
        let mut corpus = zoo();
        // "cat" sits in 2 of 3 documents, the singletons in 1 of 3.
        let expected_cat = 1.0 + (3.0_f64 / 2.0).log10();
        let expected_dog = 1.0 + 3.0_f64.log10();
        assert!((corpus.idf("cat").unwrap() - expected_cat).abs() < EPSILON);
        assert!((corpus.idf("dog").unwrap() - expected_dog).abs() < EPSILON);
    }

    #[test]
    fn idf_is_at_least_one_for_every_known_term() {
        let mut corpus = zoo();
        for term in ["cat", "dog", "bird", "fish", "whale"] {
            assert!(corpus.idf(term).unwrap() >= 1.0);
        }
    }

    #[test]
    fn idf_rejects_unknown_terms() {
        let mut corpus = zoo();
        assert_eq!(
            corpus.idf("unicorn"),
            Err(Error::UnknownTerm {
                term: "unicorn".to_string()
            })
        );
    }

    #[test]
    fn adding_a_document_invalidates_every_idf_entry() {
        let mut corpus = Corpus::with_documents([
            Document::new("a", "cat"),
            Document::new("b", "cat"),
        ]);
        // df == N, so idf is exactly 1.
        assert!((corpus.idf("cat").unwrap() - 1.0).abs() < EPSILON);

        // The new document never mentions "cat", yet N changed, so the
        // cached value for "cat" must change too.
        corpus.add_document(Document::new("c", "dog"));
        let expected = 1.0 + (3.0_f64 / 2.0).log10();
        assert!((corpus.idf("cat").unwrap() - expected).abs() < EPSILON);
    }

    #[test]
    fn df_counts_membership_not_occurrences() {
        let corpus = Corpus::with_documents([
            Document::new("a", "cat cat cat"),
            Document::new("b", "cat dog"),
        ]);
        assert_eq!(corpus.df("cat"), 2);
        assert_eq!(corpus.df("dog"), 1);
        assert_eq!(corpus.df("bird"), 0);
    }

    #[test]
    fn with_documents_matches_incremental_adds() {
        let mut incremental = Corpus::new();
        incremental.add_document(Document::new("x", "cat dog"));
        incremental.add_document(Document::new("y", "cat bird"));
        let batch = Corpus::with_documents([
            Document::new("x", "cat dog"),
            Document::new("y", "cat bird"),
        ]);
        let ids: Vec<&str> = batch.documents().map(Document::id).collect();
        let ids_incremental: Vec<&str> = incremental.documents().map(Document::id).collect();
        assert_eq!(ids, ids_incremental);
    }

    #[test]
    fn readding_an_id_replaces_the_document() {
        let mut corpus = Corpus::with_documents([Document::new("a", "cat")]);
        assert_eq!(corpus.tf("cat", "a"), 1);
        corpus.add_document(Document::new("a", "dog dog"));
        assert_eq!(corpus.len(), 1);
        assert_eq!(corpus.tf("cat", "a"), 0);
        assert_eq!(corpus.tf("dog", "a"), 2);
    }

    #[test]
    fn tfidf_scores_are_term_sorted() {
        let mut corpus = zoo();
        let scores = corpus.tfidf_scores("x").unwrap();
        let terms: Vec<&str> = scores.keys().map(String::as_str).collect();
        assert_eq!(terms, vec!["cat", "dog"]);
        assert_eq!(corpus.tfidf_scores("nope"), None);
    }

    #[test]
    fn vocabulary_spans_all_documents() {
        let corpus = zoo();
        assert_eq!(corpus.vocabulary_size(), 5);
    }
}
