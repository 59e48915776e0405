//! The puzzle window cache
//!
//! Holds a precomputed entry for each day in a contiguous run around the
//! anchor day. Readers take an `Arc` snapshot of the whole window; rotation
//! builds the next window off to the side and publishes it with one pointer
//! swap, so a reader sees either the old window or the new one and never a
//! mix of the two.

use super::retry::RetryPolicy;
use super::settings::WindowSettings;
use crate::core::{
    Calendar, EmbeddingError, EngineError, PuzzleDay, PuzzleDayEntry, SENTINEL_SECRET,
};
use chrono::{DateTime, Utc};
use crate::embedding::Embeddings;
use crate::secrets::SecretProvider;
use parking_lot::{Mutex, RwLock};
use rayon::prelude::*;
use rustc_hash::FxHashMap;
use std::sync::Arc;

/// Immutable view of the window at one point in time
#[derive(Debug, Clone)]
pub struct WindowSnapshot {
    anchor: PuzzleDay,
    days: Vec<PuzzleDay>,
    entries: FxHashMap<PuzzleDay, Arc<PuzzleDayEntry>>,
}

impl WindowSnapshot {
    /// Today's puzzle day as far as this window is concerned
    #[must_use]
    pub const fn anchor(&self) -> PuzzleDay {
        self.anchor
    }

    /// Days held, oldest first
    #[must_use]
    pub fn days(&self) -> &[PuzzleDay] {
        &self.days
    }

    #[must_use]
    pub fn get(&self, day: PuzzleDay) -> Option<&Arc<PuzzleDayEntry>> {
        self.entries.get(&day)
    }

    #[must_use]
    pub fn contains(&self, day: PuzzleDay) -> bool {
        self.entries.contains_key(&day)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries oldest first
    pub fn entries(&self) -> impl Iterator<Item = &Arc<PuzzleDayEntry>> {
        self.days.iter().filter_map(|day| self.entries.get(day))
    }
}

/// Outcome of one rotation step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RotationReport {
    /// Anchor after rotating
    pub anchor: PuzzleDay,
    /// Day added at the leading edge
    pub inserted: PuzzleDay,
    /// Day dropped from the trailing edge, if it was present
    pub evicted: Option<PuzzleDay>,
    /// Whether the inserted day fell back to the sentinel entry
    pub degraded: bool,
}

/// Sliding window of precomputed puzzle days
pub struct PuzzleWindow<E, P> {
    embeddings: Arc<E>,
    secrets: Arc<P>,
    settings: WindowSettings,
    current: RwLock<Arc<WindowSnapshot>>,
    rotation: Mutex<()>,
}

impl<E: Embeddings, P: SecretProvider> PuzzleWindow<E, P> {
    /// Fill the window around `anchor` and return it ready for reads
    ///
    /// Days whose secret cannot be scored get a sentinel entry instead of
    /// failing the whole fill.
    pub fn initialize(
        embeddings: Arc<E>,
        secrets: Arc<P>,
        settings: WindowSettings,
        anchor: PuzzleDay,
    ) -> Self {
        let builder = EntryBuilder {
            embeddings: embeddings.as_ref(),
            secrets: secrets.as_ref(),
            top_k: settings.top_k,
            retry: settings.retry,
        };

        let days = window_days(anchor, &settings);
        let entries: FxHashMap<PuzzleDay, Arc<PuzzleDayEntry>> = days
            .par_iter()
            .map(|&day| (day, Arc::new(builder.build(day))))
            .collect();

        let degraded = entries.values().filter(|e| e.is_degraded()).count();
        tracing::info!(
            anchor = %anchor,
            days = ?days.iter().map(|d| d.index()).collect::<Vec<_>>(),
            degraded,
            "puzzle window initialized"
        );

        let snapshot = WindowSnapshot {
            anchor,
            days,
            entries,
        };
        Self {
            embeddings,
            secrets,
            settings,
            current: RwLock::new(Arc::new(snapshot)),
            rotation: Mutex::new(()),
        }
    }

    /// Current window contents
    ///
    /// The snapshot stays valid and unchanged even if a rotation happens
    /// while the caller holds it.
    #[must_use]
    pub fn snapshot(&self) -> Arc<WindowSnapshot> {
        Arc::clone(&self.current.read())
    }

    /// Entry for a day, if the day is inside the window
    #[must_use]
    pub fn lookup(&self, day: PuzzleDay) -> Option<Arc<PuzzleDayEntry>> {
        self.snapshot().get(day).cloned()
    }

    #[must_use]
    pub fn anchor(&self) -> PuzzleDay {
        self.snapshot().anchor()
    }

    /// Days currently held, oldest first
    #[must_use]
    pub fn days(&self) -> Vec<PuzzleDay> {
        self.snapshot().days().to_vec()
    }

    #[must_use]
    pub fn embeddings(&self) -> &E {
        &self.embeddings
    }

    #[must_use]
    pub const fn settings(&self) -> &WindowSettings {
        &self.settings
    }

    /// Advance the window by one day
    ///
    /// The anchor moves forward one day, the day `last` offsets past the new
    /// anchor is built and inserted, and the day `WINDOW_SIZE` before it is
    /// evicted. Building happens before the swap, so readers keep the old
    /// window until the new one is complete. Concurrent rotations are
    /// serialized.
    ///
    /// This steps from the current anchor whatever the date; scheduled
    /// rotation goes through [`catch_up`](Self::catch_up).
    pub fn rotate(&self) -> RotationReport {
        let _rotating = self.rotation.lock();
        let previous = self.snapshot();
        let n = self.settings.catalog_size;

        let anchor = previous.anchor().offset(1, n);
        let inserted = anchor.offset(self.settings.offsets.last(), n);
        let evict = inserted.offset(-(self.settings.offsets.size() as i64), n);

        let builder = EntryBuilder {
            embeddings: self.embeddings.as_ref(),
            secrets: self.secrets.as_ref(),
            top_k: self.settings.top_k,
            retry: self.settings.retry,
        };
        let entry = Arc::new(builder.build(inserted));
        let degraded = entry.is_degraded();

        let mut entries = previous.entries.clone();
        let evicted = entries.remove(&evict).map(|e| e.day());
        entries.insert(inserted, entry);

        let next = WindowSnapshot {
            anchor,
            days: window_days(anchor, &self.settings),
            entries,
        };
        *self.current.write() = Arc::new(next);

        tracing::info!(
            anchor = %anchor,
            inserted = %inserted,
            evicted = ?evicted.map(PuzzleDay::index),
            degraded,
            "puzzle window rotated"
        );

        RotationReport {
            anchor,
            inserted,
            evicted,
            degraded,
        }
    }

    /// Move the window so it is anchored on `target`
    ///
    /// Days already held keep their entries; days new to the window are
    /// built in parallel and days that fall out are evicted, all published
    /// in one swap. Returns one report per inserted day, oldest first, and
    /// nothing when the window is already anchored on `target`.
    pub fn rotate_to(&self, target: PuzzleDay) -> Vec<RotationReport> {
        let _rotating = self.rotation.lock();
        let previous = self.snapshot();
        if previous.anchor() == target {
            tracing::debug!(anchor = %target, "puzzle window already current");
            return Vec::new();
        }

        let days = window_days(target, &self.settings);
        let builder = EntryBuilder {
            embeddings: self.embeddings.as_ref(),
            secrets: self.secrets.as_ref(),
            top_k: self.settings.top_k,
            retry: self.settings.retry,
        };
        let built: Vec<(PuzzleDay, Arc<PuzzleDayEntry>)> = days
            .par_iter()
            .filter(|&&day| !previous.contains(day))
            .map(|&day| (day, Arc::new(builder.build(day))))
            .collect();
        let evicted: Vec<PuzzleDay> = previous
            .days()
            .iter()
            .copied()
            .filter(|day| !days.contains(day))
            .collect();

        let mut entries = previous.entries.clone();
        for day in &evicted {
            entries.remove(day);
        }
        let reports: Vec<RotationReport> = built
            .iter()
            .enumerate()
            .map(|(i, (day, entry))| RotationReport {
                anchor: target,
                inserted: *day,
                evicted: evicted.get(i).copied(),
                degraded: entry.is_degraded(),
            })
            .collect();
        entries.extend(built);

        *self.current.write() = Arc::new(WindowSnapshot {
            anchor: target,
            days,
            entries,
        });

        tracing::info!(
            from = %previous.anchor(),
            anchor = %target,
            inserted = reports.len(),
            evicted = evicted.len(),
            "puzzle window moved"
        );
        reports
    }

    /// Anchor the window on the calendar day at `now`
    ///
    /// This is the scheduled rotation: the target comes from the clock, not
    /// from the previous anchor, so an early or repeated fire cannot push the
    /// window ahead of today.
    pub fn catch_up(&self, calendar: &Calendar, now: DateTime<Utc>) -> Vec<RotationReport> {
        self.rotate_to(calendar.day_at(now))
    }
}

fn window_days(anchor: PuzzleDay, settings: &WindowSettings) -> Vec<PuzzleDay> {
    settings
        .offsets
        .iter()
        .map(|offset| anchor.offset(offset, settings.catalog_size))
        .collect()
}

/// Resolves a day's secret and asks the embeddings for its table
struct EntryBuilder<'a, E, P> {
    embeddings: &'a E,
    secrets: &'a P,
    top_k: usize,
    retry: RetryPolicy,
}

impl<E: Embeddings, P: SecretProvider> EntryBuilder<'_, E, P> {
    fn build(&self, day: PuzzleDay) -> PuzzleDayEntry {
        let secret = self.secrets.resolve_secret(day).unwrap_or_else(|| {
            tracing::warn!(day = %day, "no secret for day, using sentinel");
            SENTINEL_SECRET.to_string()
        });

        match self.try_build(day, &secret) {
            Ok(entry) => entry,
            Err(err) => {
                tracing::error!(
                    day = %day,
                    secret = %secret,
                    error = %err,
                    "cannot precompute nearest table, day degraded to sentinel"
                );
                PuzzleDayEntry::degraded(day)
            }
        }
    }

    fn try_build(&self, day: PuzzleDay, secret: &str) -> Result<PuzzleDayEntry, EngineError> {
        let table = self
            .retry
            .run("nearest", || self.embeddings.nearest(secret, self.top_k))
            .map_err(|err| match err {
                EmbeddingError::OutOfVocabulary(word) => EngineError::UnknownWord(word),
                EmbeddingError::Unavailable(reason) => EngineError::UpstreamUnavailable(reason),
            })?;

        tracing::debug!(day = %day, secret, entries = table.len(), "nearest table built");
        Ok(PuzzleDayEntry::new(day, secret.to_string(), table))
    }
}
