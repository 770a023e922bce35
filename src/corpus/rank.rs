//! Similarity ranking over TF-IDF vectors.
//!
//! For every ordered pair of distinct documents the engine projects both
//! score maps onto one sorted ordering of their shared terms, scores the pair
//! by cosine similarity over those dimensions, and keeps the strictly
//! positive scores sorted descending.

use std::fmt;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::Corpus;

/// One ranked neighbor: the neighbor's document id and the similarity score
/// it earned against the target.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hit {
    pub id: String,
    pub score: f64,
}

/// Result of [`Corpus::evaluate`]: every document id mapped, in insertion
/// order, to its neighbors sorted by descending similarity. Documents with
/// no qualifying neighbor map to an empty list.
#[derive(Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Rankings {
    ranked: IndexMap<String, Vec<Hit>>,
}

impl Rankings {
    /// Ordered neighbors of one document; `None` for an unknown id.
    pub fn neighbors(&self, id: &str) -> Option<&[Hit]> {
        self.ranked.get(id).map(Vec::as_slice)
    }

    /// `(document id, ordered neighbors)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[Hit])> {
        self.ranked
            .iter()
            .map(|(id, hits)| (id.as_str(), hits.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.ranked.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ranked.is_empty()
    }
}

impl fmt::Debug for Rankings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if f.alternate() {
            writeln!(f, "Rankings [")?;
            for (id, hits) in &self.ranked {
                writeln!(f, "    {id:?}:")?;
                for hit in hits {
                    writeln!(f, "        {:?}: {:.6}", hit.id, hit.score)?;
                }
            }
            write!(f, "]")
        } else {
            f.debug_map().entries(self.ranked.iter()).finish()
        }
    }
}

impl Corpus {
    /// Rank, for every document, the other documents by similarity.
    ///
    /// Refreshes the IDF table, fills the TF cache, builds each document's
    /// term-sorted TF-IDF score map, then scores every ordered pair of
    /// distinct documents over their shared terms. Pairs with no shared term
    /// or a score of zero or less are excluded. Ties keep insertion order
    /// (the candidate walk is insertion-ordered and the sort is stable), so
    /// repeated evaluation of an unchanged corpus returns identical output.
    pub fn evaluate(&mut self) -> Rankings {
        self.ensure_idf();
        let ids: Vec<String> = self.documents.keys().cloned().collect();
        for id in &ids {
            self.fill_tf(id);
        }
        let score_maps: Vec<IndexMap<String, f64>> =
            ids.iter().map(|id| self.score_map(id)).collect();

        let mut ranked: IndexMap<String, Vec<Hit>> = IndexMap::with_capacity(ids.len());
        for (target_idx, target_id) in ids.iter().enumerate() {
            let mut hits: Vec<Hit> = Vec::new();
            for (neighbor_idx, neighbor_id) in ids.iter().enumerate() {
                if neighbor_idx == target_idx {
                    continue;
                }
                let Some(score) = pair_score(&score_maps[target_idx], &score_maps[neighbor_idx])
                else {
                    continue;
                };
                if score > 0.0 {
                    hits.push(Hit {
                        id: neighbor_id.clone(),
                        score,
                    });
                }
            }
            hits.sort_by(|a, b| b.score.total_cmp(&a.score));
            ranked.insert(target_id.clone(), hits);
        }
        debug!(documents = ids.len(), "ranked similarity neighbors");
        Rankings { ranked }
    }
}

/// Score one ordered document pair, or `None` when the documents share no
/// term.
///
/// Both score maps are term-sorted, so walking the target's map and probing
/// the neighbor's visits the shared terms in one canonical order; the two
/// projected vectors correspond position by position.
fn pair_score(target: &IndexMap<String, f64>, neighbor: &IndexMap<String, f64>) -> Option<f64> {
    let mut v1: Vec<f64> = Vec::new();
    let mut v2: Vec<f64> = Vec::new();
    for (term, &target_score) in target {
        if let Some(&neighbor_score) = neighbor.get(term) {
            v1.push(target_score);
            v2.push(neighbor_score);
        }
    }
    if v1.is_empty() {
        return None;
    }
    Some(1.0 - cosine_distance(&v1, &v2))
}

/// Cosine distance `1 - dot(a, b) / (|a| * |b|)` over paired vectors.
/// A zero magnitude short-circuits to the maximum distance of 1 before any
/// division happens.
fn cosine_distance(a: &[f64], b: &[f64]) -> f64 {
    let norm_a = magnitude(a);
    let norm_b = magnitude(b);
    if norm_a == 0.0 || norm_b == 0.0 {
        return 1.0;
    }
    let dot: f64 = a.iter().zip(b).map(|(x, y)| x * y).sum();
    1.0 - dot / (norm_a * norm_b)
}

fn magnitude(v: &[f64]) -> f64 {
    v.iter().map(|x| x * x).sum::<f64>().sqrt()
}
