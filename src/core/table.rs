//! Precomputed nearest-neighbor tables
//!
//! A `NearestTable` holds the top-K most similar words to one secret, with the
//! secret itself at rank 0 and similarity 1.0. Tables are built once and never
//! modified afterwards.

use rustc_hash::FxHashMap;
use serde::Serialize;
use std::fmt;

/// Similarity of the secret word to itself
pub const SELF_SIMILARITY: f64 = 1.0;

/// Rank of a guess relative to the secret
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rank {
    /// Exact position in the precomputed table (0 is the secret itself)
    Ranked(u32),
    /// The word scored, but falls outside the precomputed top-K
    BeyondTopK,
}

impl Rank {
    /// Numeric rank, if the word was inside the table
    #[must_use]
    pub const fn position(self) -> Option<u32> {
        match self {
            Self::Ranked(n) => Some(n),
            Self::BeyondTopK => None,
        }
    }

    #[must_use]
    pub const fn is_secret(self) -> bool {
        matches!(self, Self::Ranked(0))
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ranked(n) => write!(f, "{n}"),
            Self::BeyondTopK => write!(f, "beyond top-K"),
        }
    }
}

/// One word's position and score in a nearest table
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedEntry {
    pub word: String,
    pub rank: u32,
    pub similarity: f64,
}

/// Top-K most similar words to a secret, keyed by word
///
/// Entries are stored in rank order; the secret is always entry 0 unless the
/// table is empty (a degraded day).
#[derive(Debug, Clone, Default)]
pub struct NearestTable {
    entries: Vec<RankedEntry>,
    index: FxHashMap<String, usize>,
}

impl NearestTable {
    /// An empty table, used for degraded days
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build a table from the secret and its neighbors
    ///
    /// `neighbors` must already be sorted by descending similarity; they get
    /// ranks `1..=neighbors.len()` in the given order. Any neighbor equal to
    /// the secret is dropped so the secret only appears once, at rank 0.
    #[must_use]
    pub fn from_sorted(secret: &str, neighbors: Vec<(String, f64)>) -> Self {
        let mut entries = Vec::with_capacity(neighbors.len() + 1);
        entries.push(RankedEntry {
            word: secret.to_string(),
            rank: 0,
            similarity: SELF_SIMILARITY,
        });

        let mut rank = 0;
        for (word, similarity) in neighbors {
            if word == secret {
                continue;
            }
            rank += 1;
            entries.push(RankedEntry {
                word,
                rank,
                similarity,
            });
        }

        let index = entries
            .iter()
            .enumerate()
            .map(|(i, entry)| (entry.word.clone(), i))
            .collect();

        Self { entries, index }
    }

    /// Look up a word's entry
    #[must_use]
    pub fn get(&self, word: &str) -> Option<&RankedEntry> {
        self.index.get(word).map(|&i| &self.entries[i])
    }

    #[must_use]
    pub fn contains(&self, word: &str) -> bool {
        self.index.contains_key(word)
    }

    /// Number of entries, including the secret
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in rank order, secret first
    pub fn iter(&self) -> impl Iterator<Item = &RankedEntry> {
        self.entries.iter()
    }

    /// Entries in rank order, excluding the secret
    pub fn neighbors(&self) -> impl Iterator<Item = &RankedEntry> {
        self.entries.iter().skip(1)
    }

    /// All similarity values, sorted ascending
    #[must_use]
    pub fn sorted_similarities(&self) -> Vec<f64> {
        let mut sims: Vec<f64> = self.entries.iter().map(|e| e.similarity).collect();
        sims.sort_by(f64::total_cmp);
        sims
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> NearestTable {
        NearestTable::from_sorted(
            "가을",
            vec![
                ("겨울".to_string(), 0.72),
                ("봄".to_string(), 0.65),
                ("낙엽".to_string(), 0.51),
            ],
        )
    }

    #[test]
    fn secret_is_rank_zero() {
        let table = sample();
        let secret = table.get("가을").unwrap();
        assert_eq!(secret.rank, 0);
        assert!((secret.similarity - SELF_SIMILARITY).abs() < f64::EPSILON);
    }

    #[test]
    fn neighbors_ranked_in_order() {
        let table = sample();
        assert_eq!(table.get("겨울").unwrap().rank, 1);
        assert_eq!(table.get("봄").unwrap().rank, 2);
        assert_eq!(table.get("낙엽").unwrap().rank, 3);
        assert_eq!(table.len(), 4);

        let words: Vec<&str> = table.neighbors().map(|e| e.word.as_str()).collect();
        assert_eq!(words, ["겨울", "봄", "낙엽"]);
    }

    #[test]
    fn duplicate_secret_dropped() {
        let table = NearestTable::from_sorted(
            "가을",
            vec![("가을".to_string(), 1.0), ("겨울".to_string(), 0.7)],
        );
        assert_eq!(table.len(), 2);
        assert_eq!(table.get("겨울").unwrap().rank, 1);
        let neighbors: Vec<&str> = table.neighbors().map(|e| e.word.as_str()).collect();
        assert_eq!(neighbors, ["겨울"]);
    }

    #[test]
    fn missing_word() {
        let table = sample();
        assert!(table.get("여름").is_none());
        assert!(!table.contains("여름"));
    }

    #[test]
    fn empty_table() {
        let table = NearestTable::empty();
        assert!(table.is_empty());
        assert!(table.sorted_similarities().is_empty());
    }

    #[test]
    fn similarities_sorted_ascending() {
        let sims = sample().sorted_similarities();
        assert_eq!(sims, vec![0.51, 0.65, 0.72, 1.0]);
    }

    #[test]
    fn rank_helpers() {
        assert!(Rank::Ranked(0).is_secret());
        assert!(!Rank::Ranked(3).is_secret());
        assert_eq!(Rank::Ranked(3).position(), Some(3));
        assert_eq!(Rank::BeyondTopK.position(), None);
    }
}
