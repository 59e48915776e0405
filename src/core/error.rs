//! Error types shared across the engine

use super::day::PuzzleDay;
use std::path::PathBuf;
use thiserror::Error;

/// Failures reported by an embedding backend
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EmbeddingError {
    #[error("word `{0}` is not in the embedding vocabulary")]
    OutOfVocabulary(String),

    #[error("embedding service unavailable: {0}")]
    Unavailable(String),
}

impl EmbeddingError {
    /// Whether retrying the same call could succeed
    #[must_use]
    pub const fn is_transient(&self) -> bool {
        matches!(self, Self::Unavailable(_))
    }
}

/// Errors surfaced by guess evaluation and statistics
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    #[error("puzzle day {0} is not in the current window")]
    UnknownDay(i64),

    #[error("word `{0}` is not recognized")]
    UnknownWord(String),

    #[error("upstream unavailable: {0}")]
    UpstreamUnavailable(String),

    #[error("table for day {day} has {len} entries, at least {required} needed")]
    TableTooSmall {
        day: PuzzleDay,
        len: usize,
        required: usize,
    },
}

impl EngineError {
    #[must_use]
    pub fn unknown_day(day: PuzzleDay) -> Self {
        Self::UnknownDay(i64::from(day.index()))
    }

    /// Expected, per-request conditions that map to a not-found response
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::UnknownDay(_) | Self::UnknownWord(_))
    }
}

/// Failures loading vectors or secret lists from disk
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{path}:{line}: {reason}")]
    Parse {
        path: PathBuf,
        line: usize,
        reason: String,
    },

    #[error("{path} contains no usable entries")]
    Empty { path: PathBuf },
}
