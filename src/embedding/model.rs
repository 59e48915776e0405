//! In-memory cosine-similarity model
//!
//! Vectors are unit-normalized on construction, so similarity is a dot product.
//! Nearest-neighbor tables are computed against a candidate vocabulary, which
//! defaults to every word in the model.

use super::Embeddings;
use crate::core::{EmbeddingError, NearestTable};
use rayon::prelude::*;
use rustc_hash::FxHashMap;
use std::cmp::Ordering;
use thiserror::Error;

/// Problems building a model from raw vectors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModelError {
    #[error("model has no vectors")]
    Empty,

    #[error("vector for `{word}` has {found} dimensions, expected {expected}")]
    DimensionMismatch {
        word: String,
        expected: usize,
        found: usize,
    },

    #[error("vector for `{0}` has zero length")]
    ZeroVector(String),

    #[error("word `{0}` appears more than once")]
    DuplicateWord(String),
}

/// Word vectors held in one flat buffer
#[derive(Debug, Clone)]
pub struct VectorModel {
    words: Vec<String>,
    index: FxHashMap<String, usize>,
    vectors: Vec<f32>,
    dim: usize,
    candidates: Vec<usize>,
}

impl VectorModel {
    /// Build a model from `(word, vector)` pairs
    ///
    /// # Errors
    /// Fails on an empty input, mismatched dimensions, zero vectors or
    /// duplicate words.
    pub fn from_entries(entries: Vec<(String, Vec<f32>)>) -> Result<Self, ModelError> {
        let dim = entries.first().map(|(_, v)| v.len()).ok_or(ModelError::Empty)?;

        let mut words = Vec::with_capacity(entries.len());
        let mut index = FxHashMap::default();
        let mut vectors = Vec::with_capacity(entries.len() * dim);

        for (word, vector) in entries {
            if vector.len() != dim {
                return Err(ModelError::DimensionMismatch {
                    word,
                    expected: dim,
                    found: vector.len(),
                });
            }
            let norm = vector.iter().map(|x| x * x).sum::<f32>().sqrt();
            if norm == 0.0 || !norm.is_finite() {
                return Err(ModelError::ZeroVector(word));
            }
            if index.contains_key(&word) {
                return Err(ModelError::DuplicateWord(word));
            }

            index.insert(word.clone(), words.len());
            words.push(word);
            vectors.extend(vector.iter().map(|x| x / norm));
        }

        let candidates = (0..words.len()).collect();
        Ok(Self {
            words,
            index,
            vectors,
            dim,
            candidates,
        })
    }

    /// Restrict nearest-neighbor candidates to the given words
    ///
    /// Words missing from the model are skipped. Returns how many were kept.
    pub fn restrict_candidates<I, S>(&mut self, words: I) -> usize
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut seen = vec![false; self.words.len()];
        let mut candidates = Vec::new();
        let mut missing = 0usize;

        for word in words {
            match self.index.get(word.as_ref()) {
                Some(&i) if !seen[i] => {
                    seen[i] = true;
                    candidates.push(i);
                }
                Some(_) => {}
                None => missing += 1,
            }
        }

        if missing > 0 {
            tracing::warn!(missing, "candidate words missing from the embedding vocabulary");
        }
        candidates.sort_unstable();
        self.candidates = candidates;
        self.candidates.len()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.words.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    #[must_use]
    pub const fn dimensions(&self) -> usize {
        self.dim
    }

    #[must_use]
    pub fn candidate_count(&self) -> usize {
        self.candidates.len()
    }

    #[must_use]
    pub fn contains(&self, word: &str) -> bool {
        self.index.contains_key(word)
    }

    fn vector(&self, i: usize) -> &[f32] {
        &self.vectors[i * self.dim..(i + 1) * self.dim]
    }

    fn lookup(&self, word: &str) -> Result<usize, EmbeddingError> {
        self.index
            .get(word)
            .copied()
            .ok_or_else(|| EmbeddingError::OutOfVocabulary(word.to_string()))
    }

    fn cosine(&self, a: usize, b: usize) -> f64 {
        let dot: f32 = self
            .vector(a)
            .iter()
            .zip(self.vector(b))
            .map(|(x, y)| x * y)
            .sum();
        f64::from(dot).clamp(-1.0, 1.0)
    }
}

/// Descending similarity, ties broken by vocabulary position
fn by_similarity(a: &(usize, f64), b: &(usize, f64)) -> Ordering {
    b.1.total_cmp(&a.1).then(a.0.cmp(&b.0))
}

impl Embeddings for VectorModel {
    fn similarity(&self, a: &str, b: &str) -> Result<f64, EmbeddingError> {
        let ia = self.lookup(a)?;
        let ib = self.lookup(b)?;
        Ok(self.cosine(ia, ib))
    }

    fn nearest(&self, secret: &str, k: usize) -> Result<NearestTable, EmbeddingError> {
        let target = self.lookup(secret)?;

        let mut scored: Vec<(usize, f64)> = self
            .candidates
            .par_iter()
            .filter(|&&i| i != target)
            .map(|&i| (i, self.cosine(target, i)))
            .collect();

        if scored.len() > k {
            if k > 0 {
                scored.select_nth_unstable_by(k - 1, by_similarity);
            }
            scored.truncate(k);
        }
        scored.sort_unstable_by(by_similarity);

        let neighbors = scored
            .into_iter()
            .map(|(i, sim)| (self.words[i].clone(), sim))
            .collect();
        Ok(NearestTable::from_sorted(secret, neighbors))
    }
}
