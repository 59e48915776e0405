//! Word embedding backends
//!
//! The engine only talks to embeddings through the [`Embeddings`] trait:
//! pairwise similarity for fallback scoring, and ranked nearest-neighbor tables
//! for precomputing a day's window entry.

pub mod loader;
mod model;

pub use model::{ModelError, VectorModel};

use crate::core::{EmbeddingError, NearestTable};

/// Source of semantic similarity scores
pub trait Embeddings: Send + Sync {
    /// Cosine similarity of two words, symmetric, in `[-1, 1]`
    ///
    /// # Errors
    /// `OutOfVocabulary` if either word is unknown, `Unavailable` if the
    /// backend cannot answer right now.
    fn similarity(&self, a: &str, b: &str) -> Result<f64, EmbeddingError>;

    /// The `k` candidate words most similar to `secret`, plus the secret
    /// itself at rank 0
    ///
    /// Ordering must be deterministic so rank numbers are reproducible.
    ///
    /// # Errors
    /// `OutOfVocabulary` if the secret is unknown, `Unavailable` if the
    /// backend cannot answer right now.
    fn nearest(&self, secret: &str, k: usize) -> Result<NearestTable, EmbeddingError>;
}
