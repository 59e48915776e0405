//! Shared fixtures for unit tests

use crate::core::{EmbeddingError, NearestTable};
use crate::embedding::Embeddings;
use crate::secrets::SecretCatalog;
use crate::window::{PuzzleWindow, RetryPolicy, WindowOffsets, WindowSettings};
use rustc_hash::FxHashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicU32, AtomicUsize, Ordering};

pub(crate) const TEST_CATALOG_SIZE: u32 = 10;
pub(crate) const TEST_TOP_K: usize = 12;
const FILLER_WORDS: usize = 20;

/// Deterministic embeddings over a fixed vocabulary
///
/// Similarity between two words falls off linearly with their distance in
/// vocabulary order, so every pair is known in advance.
pub(crate) struct FakeEmbeddings {
    vocab: Vec<String>,
    position: FxHashMap<String, usize>,
    pending_failures: AtomicU32,
    nearest_calls: AtomicUsize,
    similarity_calls: AtomicUsize,
}

impl FakeEmbeddings {
    pub(crate) fn new<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let vocab: Vec<String> = words.into_iter().map(Into::into).collect();
        let position = vocab.iter().enumerate().map(|(i, w)| (w.clone(), i)).collect();
        Self {
            vocab,
            position,
            pending_failures: AtomicU32::new(0),
            nearest_calls: AtomicUsize::new(0),
            similarity_calls: AtomicUsize::new(0),
        }
    }

    /// Make the next `times` nearest calls fail as unavailable
    pub(crate) fn fail_nearest(&self, times: u32) {
        self.pending_failures.store(times, Ordering::SeqCst);
    }

    pub(crate) fn nearest_calls(&self) -> usize {
        self.nearest_calls.load(Ordering::SeqCst)
    }

    pub(crate) fn similarity_calls(&self) -> usize {
        self.similarity_calls.load(Ordering::SeqCst)
    }

    fn index(&self, word: &str) -> Result<usize, EmbeddingError> {
        self.position
            .get(word)
            .copied()
            .ok_or_else(|| EmbeddingError::OutOfVocabulary(word.to_string()))
    }

    fn score(&self, a: usize, b: usize) -> f64 {
        1.0 - a.abs_diff(b) as f64 / self.vocab.len() as f64
    }
}

impl Embeddings for FakeEmbeddings {
    fn similarity(&self, a: &str, b: &str) -> Result<f64, EmbeddingError> {
        self.similarity_calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.score(self.index(a)?, self.index(b)?))
    }

    fn nearest(&self, secret: &str, k: usize) -> Result<NearestTable, EmbeddingError> {
        self.nearest_calls.fetch_add(1, Ordering::SeqCst);
        let failing = self
            .pending_failures
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_ok();
        if failing {
            return Err(EmbeddingError::Unavailable("injected failure".into()));
        }

        let target = self.index(secret)?;
        let mut scored: Vec<(usize, f64)> = (0..self.vocab.len())
            .filter(|&i| i != target)
            .map(|i| (i, self.score(target, i)))
            .collect();
        scored.sort_by(|a, b| b.1.total_cmp(&a.1).then(a.0.cmp(&b.0)));
        scored.truncate(k);

        let neighbors = scored
            .into_iter()
            .map(|(i, sim)| (self.vocab[i].clone(), sim))
            .collect();
        Ok(NearestTable::from_sorted(secret, neighbors))
    }
}

/// Secret for day `i` in the fixture catalog
pub(crate) fn secret(i: u32) -> String {
    format!("secret{i}")
}

/// Filler word `i`, never a secret
pub(crate) fn filler(i: usize) -> String {
    format!("word{i}")
}

pub(crate) fn catalog() -> SecretCatalog {
    SecretCatalog::new((0..TEST_CATALOG_SIZE).map(secret).collect())
}

/// Vocabulary with secrets and filler words interleaved
pub(crate) fn embeddings() -> FakeEmbeddings {
    let mut words = Vec::new();
    for i in 0..FILLER_WORDS {
        words.push(filler(i));
        if let Ok(i) = u32::try_from(i)
            && i < TEST_CATALOG_SIZE
        {
            words.push(secret(i));
        }
    }
    FakeEmbeddings::new(words)
}

pub(crate) fn settings() -> WindowSettings {
    WindowSettings {
        catalog_size: TEST_CATALOG_SIZE,
        offsets: WindowOffsets::default(),
        top_k: TEST_TOP_K,
        retry: RetryPolicy::immediate(3),
    }
}

pub(crate) fn window_at(
    anchor: u32,
) -> (
    Arc<PuzzleWindow<FakeEmbeddings, SecretCatalog>>,
    Arc<FakeEmbeddings>,
) {
    let embeddings = Arc::new(embeddings());
    let window = PuzzleWindow::initialize(
        Arc::clone(&embeddings),
        Arc::new(catalog()),
        settings(),
        crate::core::PuzzleDay::wrapping(i64::from(anchor), TEST_CATALOG_SIZE),
    );
    (Arc::new(window), embeddings)
}
