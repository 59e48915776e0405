//! Secrets file parsing and the one-time daily override
//!
//! File format: one secret per line, in puzzle-day order. Lines starting with
//! `#` are comments, except that the first `# today_word: <word>` line names
//! an override word for this run.

use super::SecretProvider;
use crate::core::{LoadError, PuzzleDay};
use std::path::Path;

/// Comment prefix that configures the override word
pub const TODAY_WORD_DIRECTIVE: &str = "# today_word:";

/// Ordered list of secret words indexed by puzzle day
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SecretCatalog {
    words: Vec<String>,
    today_word: Option<String>,
}

impl SecretCatalog {
    /// Catalog from an explicit list, with no override configured
    #[must_use]
    pub fn new(words: Vec<String>) -> Self {
        Self {
            words,
            today_word: None,
        }
    }

    /// Parse secrets file contents
    ///
    /// # Examples
    /// ```
    /// use semantle_window::secrets::SecretCatalog;
    ///
    /// let catalog = SecretCatalog::parse("# today_word: 하늘\n가을\n겨울\n");
    /// assert_eq!(catalog.today_word(), Some("하늘"));
    /// assert_eq!(catalog.len(), 2);
    /// ```
    #[must_use]
    pub fn parse(content: &str) -> Self {
        let mut words = Vec::new();
        let mut today_word = None;

        for line in content.lines().map(str::trim) {
            if let Some(rest) = line.strip_prefix(TODAY_WORD_DIRECTIVE) {
                let word = rest.trim();
                if today_word.is_none() && !word.is_empty() {
                    today_word = Some(word.to_string());
                }
                continue;
            }
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            words.push(line.to_string());
        }

        Self { words, today_word }
    }

    /// Load and parse a secrets file
    ///
    /// # Errors
    ///
    /// Returns a `LoadError` if the file cannot be read or holds no secrets.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, LoadError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| LoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let catalog = Self::parse(&content);
        if catalog.is_empty() {
            return Err(LoadError::Empty {
                path: path.to_path_buf(),
            });
        }
        Ok(catalog)
    }

    /// Override word named in the file, if any
    #[must_use]
    pub fn today_word(&self) -> Option<&str> {
        self.today_word.as_deref()
    }

    /// Replace the configured override word
    #[must_use]
    pub fn with_today_word(mut self, word: Option<String>) -> Self {
        if word.is_some() {
            self.today_word = word;
        }
        self
    }

    /// Apply the override: move the word to index 0
    ///
    /// The word is removed from its old position first, so it appears once.
    /// Without an override the catalog is returned unchanged.
    #[must_use]
    pub fn resolve_override(mut self) -> Self {
        if let Some(word) = self.today_word.take() {
            self.words.retain(|w| *w != word);
            tracing::info!(word = %word, "today's word override placed at day 0");
            self.words.insert(0, word);
        }
        self
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.words.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    #[must_use]
    pub fn words(&self) -> &[String] {
        &self.words
    }
}

impl SecretProvider for SecretCatalog {
    fn resolve_secret(&self, day: PuzzleDay) -> Option<String> {
        self.words.get(day.index() as usize).cloned()
    }
}
