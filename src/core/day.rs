//! Puzzle day indices and the calendar that produces them
//!
//! A puzzle day is a modular index into the secret catalog. All arithmetic on
//! it wraps at the catalog size instead of growing without bound.

use chrono::{DateTime, FixedOffset, NaiveDate, Utc};
use serde::Serialize;
use std::fmt;

/// Index of one day's puzzle, always in `[0, catalog_size)`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct PuzzleDay(u32);

impl PuzzleDay {
    /// Wrap an arbitrary (possibly negative) day count into the catalog
    ///
    /// # Panics
    /// Panics if `catalog_size` is zero.
    #[must_use]
    pub fn wrapping(days: i64, catalog_size: u32) -> Self {
        assert!(catalog_size > 0, "catalog size must be positive");
        Self(days.rem_euclid(i64::from(catalog_size)) as u32)
    }

    /// Raw index value
    #[inline]
    #[must_use]
    pub const fn index(self) -> u32 {
        self.0
    }

    /// Move `delta` days forward (or backward) modulo the catalog size
    #[must_use]
    pub fn offset(self, delta: i64, catalog_size: u32) -> Self {
        Self::wrapping(i64::from(self.0) + delta, catalog_size)
    }
}

impl fmt::Display for PuzzleDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Maps wall-clock dates onto puzzle days
///
/// The puzzle day for a date is `(date - epoch).days mod catalog_size`, where
/// the date is taken in the calendar's fixed UTC offset rather than the
/// server's local zone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Calendar {
    epoch: NaiveDate,
    catalog_size: u32,
    utc_offset: FixedOffset,
}

impl Calendar {
    /// Create a calendar
    ///
    /// # Panics
    /// Panics if `catalog_size` is zero.
    #[must_use]
    pub fn new(epoch: NaiveDate, catalog_size: u32, utc_offset: FixedOffset) -> Self {
        assert!(catalog_size > 0, "catalog size must be positive");
        Self {
            epoch,
            catalog_size,
            utc_offset,
        }
    }

    #[inline]
    #[must_use]
    pub const fn catalog_size(&self) -> u32 {
        self.catalog_size
    }

    #[inline]
    #[must_use]
    pub const fn epoch(&self) -> NaiveDate {
        self.epoch
    }

    #[inline]
    #[must_use]
    pub const fn utc_offset(&self) -> FixedOffset {
        self.utc_offset
    }

    /// Puzzle day for a calendar date
    #[must_use]
    pub fn day_for_date(&self, date: NaiveDate) -> PuzzleDay {
        let elapsed = date.signed_duration_since(self.epoch).num_days();
        PuzzleDay::wrapping(elapsed, self.catalog_size)
    }

    /// Puzzle day at a given instant, judged in the calendar's offset
    #[must_use]
    pub fn day_at(&self, instant: DateTime<Utc>) -> PuzzleDay {
        let local_date = instant.with_timezone(&self.utc_offset).date_naive();
        self.day_for_date(local_date)
    }

    /// Today's puzzle day
    #[must_use]
    pub fn today(&self) -> PuzzleDay {
        self.day_at(Utc::now())
    }

    /// Interpret a caller-supplied day number, wrapping it into the catalog
    #[must_use]
    pub fn day(&self, raw: i64) -> PuzzleDay {
        PuzzleDay::wrapping(raw, self.catalog_size)
    }

    /// Accept a caller-supplied day number only if it is a valid index
    #[must_use]
    pub fn checked_day(&self, raw: i64) -> Option<PuzzleDay> {
        (0..i64::from(self.catalog_size))
            .contains(&raw)
            .then(|| PuzzleDay::wrapping(raw, self.catalog_size))
    }

    /// Shift a puzzle day, wrapping at the catalog size
    #[must_use]
    pub fn shift(&self, day: PuzzleDay, delta: i64) -> PuzzleDay {
        day.offset(delta, self.catalog_size)
    }
}
