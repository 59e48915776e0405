//! Similarity thresholds for a day's table
//!
//! Clients use these to calibrate the similarity scale shown to players.

use crate::core::{EngineError, PuzzleDay, PuzzleDayEntry};
use serde::Serialize;

/// Non-secret entries needed to compute a summary
pub const MIN_NEIGHBORS: usize = 11;

/// Summary of one day's similarity distribution
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SimilaritySummary {
    /// Best similarity a guess can reach short of the secret
    pub top: f64,
    /// Similarity of the tenth-best non-secret word
    pub top10: f64,
    /// Lowest similarity still inside the table
    pub rest: f64,
}

/// Compute the summary for the entry of `day`
///
/// With the table's similarities sorted ascending, `top` is the second from
/// the end (the secret's own 1.0 is last), `top10` the eleventh from the end
/// and `rest` the first.
///
/// # Errors
///
/// `UnknownDay` if the day is outside the window or degraded, `TableTooSmall`
/// if the table has fewer than [`MIN_NEIGHBORS`] non-secret entries.
pub fn summarize(
    day: PuzzleDay,
    entry: Option<&PuzzleDayEntry>,
) -> Result<SimilaritySummary, EngineError> {
    let entry = entry
        .filter(|e| !e.is_degraded())
        .ok_or_else(|| EngineError::unknown_day(day))?;

    let sims = entry.table().sorted_similarities();
    let len = sims.len();
    if len < MIN_NEIGHBORS + 1 {
        return Err(EngineError::TableTooSmall {
            day,
            len,
            required: MIN_NEIGHBORS + 1,
        });
    }

    Ok(SimilaritySummary {
        top: sims[len - 2],
        top10: sims[len - 11],
        rest: sims[0],
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::NearestTable;
    use crate::test_support::{self, TEST_CATALOG_SIZE};

    fn day(i: i64) -> PuzzleDay {
        PuzzleDay::wrapping(i, 4650)
    }

    fn autumn_entry() -> PuzzleDayEntry {
        let ascending = [
            0.10, 0.21, 0.29, 0.36, 0.44, 0.50, 0.58, 0.66, 0.73, 0.81, 0.88, 0.95,
        ];
        let neighbors = ascending
            .iter()
            .rev()
            .enumerate()
            .map(|(i, &sim)| (format!("이웃{i}"), sim))
            .collect();
        PuzzleDayEntry::new(day(4), "가을".to_string(), NearestTable::from_sorted("가을", neighbors))
    }

    #[test]
    fn autumn_scenario() {
        let summary = summarize(day(4), Some(&autumn_entry())).unwrap();
        assert!((summary.top - 0.95).abs() < f64::EPSILON);
        assert!((summary.top10 - 0.29).abs() < f64::EPSILON);
        assert!((summary.rest - 0.10).abs() < f64::EPSILON);
    }

    #[test]
    fn thresholds_are_ordered() {
        let (window, _) = test_support::window_at(4);
        for d in window.days() {
            let entry = window.lookup(d).unwrap();
            let s = summarize(d, Some(&*entry)).unwrap();
            assert!(s.rest <= s.top10);
            assert!(s.top10 <= s.top);
            assert!(s.top < 1.0);
        }
    }

    #[test]
    fn outside_window() {
        let d = PuzzleDay::wrapping(9, TEST_CATALOG_SIZE);
        assert_eq!(summarize(d, None), Err(EngineError::UnknownDay(9)));
    }

    #[test]
    fn degraded_day() {
        let entry = PuzzleDayEntry::degraded(day(4));
        assert_eq!(summarize(day(4), Some(&entry)), Err(EngineError::UnknownDay(4)));
    }

    #[test]
    fn too_few_neighbors() {
        let neighbors = (0..10).map(|i| (format!("w{i}"), 0.5)).collect();
        let entry = PuzzleDayEntry::new(
            day(4),
            "가을".to_string(),
            NearestTable::from_sorted("가을", neighbors),
        );
        assert_eq!(
            summarize(day(4), Some(&entry)),
            Err(EngineError::TableTooSmall {
                day: day(4),
                len: 11,
                required: 12,
            })
        );
    }

    #[test]
    fn exactly_eleven_neighbors() {
        let neighbors = (0..11)
            .map(|i| (format!("w{i}"), 0.9 - f64::from(i) * 0.05))
            .collect();
        let entry = PuzzleDayEntry::new(
            day(4),
            "가을".to_string(),
            NearestTable::from_sorted("가을", neighbors),
        );
        let s = summarize(day(4), Some(&entry)).unwrap();
        assert!((s.top - 0.9).abs() < 1e-9);
        assert!((s.top10 - 0.45).abs() < 1e-9);
        assert!((s.rest - 0.4).abs() < 1e-9);
    }
}
