//! Core domain types
//!
//! Puzzle days, ranked tables, cached day entries and the error enums. Pure
//! data with no I/O and no locking.

mod day;
mod entry;
mod error;
mod table;

pub use day::{Calendar, PuzzleDay};
pub use entry::{PuzzleDayEntry, SENTINEL_SECRET};
pub use error::{EmbeddingError, EngineError, LoadError};
pub use table::{NearestTable, Rank, RankedEntry, SELF_SIMILARITY};
