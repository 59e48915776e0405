//! One puzzle day's cached data

use super::day::PuzzleDay;
use super::table::NearestTable;

/// Secret word used when a day cannot be resolved or scored
pub const SENTINEL_SECRET: &str = "default";

/// A puzzle day, its secret and its precomputed table
///
/// Never mutated after construction; rotation replaces whole entries.
#[derive(Debug, Clone)]
pub struct PuzzleDayEntry {
    day: PuzzleDay,
    secret: String,
    table: NearestTable,
}

impl PuzzleDayEntry {
    #[must_use]
    pub const fn new(day: PuzzleDay, secret: String, table: NearestTable) -> Self {
        Self { day, secret, table }
    }

    /// Placeholder for a day whose secret could not be scored
    #[must_use]
    pub fn degraded(day: PuzzleDay) -> Self {
        Self::new(day, SENTINEL_SECRET.to_string(), NearestTable::empty())
    }

    #[inline]
    #[must_use]
    pub const fn day(&self) -> PuzzleDay {
        self.day
    }

    #[inline]
    #[must_use]
    pub fn secret(&self) -> &str {
        &self.secret
    }

    #[inline]
    #[must_use]
    pub const fn table(&self) -> &NearestTable {
        &self.table
    }

    /// True when the day carries no usable table
    #[must_use]
    pub fn is_degraded(&self) -> bool {
        self.table.is_empty()
    }
}
