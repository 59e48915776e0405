//! Game queries answered from the puzzle window
//!
//! [`Game`] is what a transport layer talks to: guesses, similarity
//! summaries, yesterday's answer, the top list and giving up.

mod guess;
mod stats;

pub use guess::{GuessResult, evaluate};
pub use stats::{MIN_NEIGHBORS, SimilaritySummary, summarize};

use crate::core::{EngineError, PuzzleDay, RankedEntry};
use crate::embedding::Embeddings;
use crate::secrets::SecretProvider;
use crate::window::PuzzleWindow;
use std::sync::Arc;

/// Read-side facade over a shared puzzle window
pub struct Game<E, P> {
    window: Arc<PuzzleWindow<E, P>>,
}

impl<E, P> Clone for Game<E, P> {
    fn clone(&self) -> Self {
        Self {
            window: Arc::clone(&self.window),
        }
    }
}

impl<E: Embeddings, P: SecretProvider> Game<E, P> {
    #[must_use]
    pub const fn new(window: Arc<PuzzleWindow<E, P>>) -> Self {
        Self { window }
    }

    #[must_use]
    pub fn window(&self) -> &Arc<PuzzleWindow<E, P>> {
        &self.window
    }

    /// Score a guess for a day
    ///
    /// # Errors
    /// `UnknownDay`, `UnknownWord` or `UpstreamUnavailable`; see [`evaluate`].
    pub fn guess(&self, day: PuzzleDay, word: &str) -> Result<GuessResult, EngineError> {
        let entry = self.window.lookup(day);
        evaluate(self.window.embeddings(), day, entry.as_deref(), word)
    }

    /// Similarity thresholds for a day
    ///
    /// # Errors
    /// `UnknownDay` if the day is not in the window.
    pub fn similarity_summary(&self, day: PuzzleDay) -> Result<SimilaritySummary, EngineError> {
        let entry = self.window.lookup(day);
        summarize(day, entry.as_deref())
    }

    /// Secret of the day before `today`, if that day is still in the window
    #[must_use]
    pub fn yesterdays_secret(&self, today: PuzzleDay) -> Option<String> {
        let yesterday = today.offset(-1, self.window.settings().catalog_size);
        self.window
            .lookup(yesterday)
            .map(|entry| entry.secret().to_string())
    }

    /// The day's nearest words in rank order, without the secret
    ///
    /// # Errors
    /// `UnknownDay` if the day is not in the window or has no table.
    pub fn top_list(&self, day: PuzzleDay) -> Result<(String, Vec<RankedEntry>), EngineError> {
        let entry = self
            .window
            .lookup(day)
            .filter(|e| !e.is_degraded())
            .ok_or_else(|| EngineError::unknown_day(day))?;

        let words = entry.table().neighbors().cloned().collect();
        Ok((entry.secret().to_string(), words))
    }

    /// The day's secret word
    ///
    /// # Errors
    /// `UnknownDay` if the day is not in the window.
    pub fn reveal_secret(&self, day: PuzzleDay) -> Result<String, EngineError> {
        self.window
            .lookup(day)
            .map(|entry| entry.secret().to_string())
            .ok_or_else(|| EngineError::unknown_day(day))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Rank, SENTINEL_SECRET};
    use crate::test_support::{self, TEST_CATALOG_SIZE, TEST_TOP_K, filler, secret};

    fn day(i: i64) -> PuzzleDay {
        PuzzleDay::wrapping(i, TEST_CATALOG_SIZE)
    }

    fn game_at(anchor: u32) -> Game<test_support::FakeEmbeddings, crate::secrets::SecretCatalog> {
        let (window, _) = test_support::window_at(anchor);
        Game::new(window)
    }

    #[test]
    fn guess_secret() {
        let game = game_at(4);
        let result = game.guess(day(4), &secret(4)).unwrap();
        assert_eq!(result.rank, Rank::Ranked(0));
    }

    #[test]
    fn guess_outside_window() {
        let game = game_at(4);
        assert_eq!(game.guess(day(7), &secret(7)), Err(EngineError::UnknownDay(7)));
    }

    #[test]
    fn guess_after_rotation_uses_new_day() {
        let game = game_at(4);
        assert!(game.guess(day(6), &filler(1)).is_err());
        game.window().rotate();
        assert!(game.guess(day(6), &filler(1)).is_ok());
        assert_eq!(game.guess(day(2), &filler(1)), Err(EngineError::UnknownDay(2)));
    }

    #[test]
    fn summary_for_window_day() {
        let game = game_at(4);
        let summary = game.similarity_summary(day(3)).unwrap();
        assert!(summary.rest <= summary.top10 && summary.top10 <= summary.top);
        assert_eq!(
            game.similarity_summary(day(8)),
            Err(EngineError::UnknownDay(8))
        );
    }

    #[test]
    fn yesterday_inside_window() {
        let game = game_at(4);
        assert_eq!(game.yesterdays_secret(day(4)), Some(secret(3)));
        // day 1 is outside the window {2, 3, 4, 5}
        assert_eq!(game.yesterdays_secret(day(2)), None);
    }

    #[test]
    fn yesterday_wraps_at_zero() {
        let game = game_at(0);
        assert_eq!(game.yesterdays_secret(day(0)), Some(secret(9)));
    }

    #[test]
    fn top_list_excludes_secret() {
        let game = game_at(4);
        let (secret_word, words) = game.top_list(day(4)).unwrap();
        assert_eq!(secret_word, secret(4));
        assert_eq!(words.len(), TEST_TOP_K);
        assert!(words.iter().all(|e| e.word != secret_word));
        let ranks: Vec<u32> = words.iter().map(|e| e.rank).collect();
        assert_eq!(ranks, (1..=TEST_TOP_K as u32).collect::<Vec<_>>());
    }

    #[test]
    fn top_list_unknown_day() {
        let game = game_at(4);
        assert_eq!(game.top_list(day(9)), Err(EngineError::UnknownDay(9)));
    }

    #[test]
    fn reveal() {
        let game = game_at(4);
        assert_eq!(game.reveal_secret(day(5)), Ok(secret(5)));
        assert_eq!(game.reveal_secret(day(6)), Err(EngineError::UnknownDay(6)));
    }

    #[test]
    fn reveal_degraded_day_gives_sentinel() {
        let (window, embeddings) = test_support::window_at(4);
        embeddings.fail_nearest(3);
        window.rotate();
        let game = Game::new(window);
        assert_eq!(game.reveal_secret(day(6)).as_deref(), Ok(SENTINEL_SECRET));
        assert_eq!(game.guess(day(6), &secret(6)), Err(EngineError::UnknownDay(6)));
    }
}
