//! Secret word catalog
//!
//! Maps puzzle days to secret words. The catalog is loaded once at startup
//! and is read-only afterwards.

mod catalog;

pub use catalog::{SecretCatalog, TODAY_WORD_DIRECTIVE};

use crate::core::PuzzleDay;

/// Deterministic source of each puzzle day's secret word
pub trait SecretProvider: Send + Sync {
    /// Secret for a day, or `None` if the catalog has no word at that index
    fn resolve_secret(&self, day: PuzzleDay) -> Option<String>;
}
