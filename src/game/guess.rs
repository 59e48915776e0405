//! Guess evaluation
//!
//! A guess is answered from the day's precomputed table when possible. Words
//! outside the table are scored live against the secret and get
//! [`Rank::BeyondTopK`].

use crate::core::{EmbeddingError, EngineError, PuzzleDay, PuzzleDayEntry, Rank};
use crate::embedding::Embeddings;

/// Score of one guess against a day's secret
#[derive(Debug, Clone, PartialEq)]
pub struct GuessResult {
    /// The guess as matched; secret matches are exact string equality
    pub guess: String,
    pub similarity: f64,
    pub rank: Rank,
}

impl GuessResult {
    #[must_use]
    pub const fn is_correct(&self) -> bool {
        self.rank.is_secret()
    }
}

/// Evaluate `word` against the entry for `day`
///
/// `entry` is the window's entry for the day, or `None` if the day is outside
/// the window.
///
/// # Errors
///
/// - `UnknownDay` if the day is outside the window or degraded
/// - `UnknownWord` if the word is neither in the table nor the vocabulary
/// - `UpstreamUnavailable` if live scoring fails transiently
pub fn evaluate<E: Embeddings>(
    embeddings: &E,
    day: PuzzleDay,
    entry: Option<&PuzzleDayEntry>,
    word: &str,
) -> Result<GuessResult, EngineError> {
    let entry = entry
        .filter(|e| !e.is_degraded())
        .ok_or_else(|| EngineError::unknown_day(day))?;

    if let Some(ranked) = entry.table().get(word) {
        return Ok(GuessResult {
            guess: ranked.word.clone(),
            similarity: ranked.similarity,
            rank: Rank::Ranked(ranked.rank),
        });
    }

    tracing::debug!(day = %day, word, "guess outside top-K, scoring live");
    let similarity = embeddings
        .similarity(entry.secret(), word)
        .map_err(|err| match err {
            EmbeddingError::OutOfVocabulary(_) => EngineError::UnknownWord(word.to_string()),
            EmbeddingError::Unavailable(reason) => EngineError::UpstreamUnavailable(reason),
        })?;

    Ok(GuessResult {
        guess: word.to_string(),
        similarity,
        rank: Rank::BeyondTopK,
    })
}
