//! Shape of the sliding window

use super::retry::RetryPolicy;
use thiserror::Error;

/// Invalid window shape
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OffsetsError {
    #[error("window offsets are empty")]
    Empty,

    #[error("window offsets must be a contiguous run, got {0:?}")]
    NotContiguous(Vec<i64>),

    #[error("window offsets must include today (0), got {0:?}")]
    MissingToday(Vec<i64>),
}

/// Contiguous run of day offsets around the anchor, `first..=last`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowOffsets {
    first: i64,
    last: i64,
}

impl Default for WindowOffsets {
    /// Two days back through tomorrow
    fn default() -> Self {
        Self { first: -2, last: 1 }
    }
}

impl WindowOffsets {
    /// Validate a list of offsets
    ///
    /// Order does not matter, but the values must form a gap-free run that
    /// includes 0.
    ///
    /// # Errors
    /// Returns an `OffsetsError` if the list is empty, has gaps or duplicates,
    /// or leaves out today.
    pub fn from_offsets(offsets: &[i64]) -> Result<Self, OffsetsError> {
        let mut sorted = offsets.to_vec();
        sorted.sort_unstable();

        let (&first, &last) = sorted
            .first()
            .zip(sorted.last())
            .ok_or(OffsetsError::Empty)?;

        if sorted.windows(2).any(|w| w[1] != w[0] + 1) {
            return Err(OffsetsError::NotContiguous(offsets.to_vec()));
        }
        if first > 0 || last < 0 {
            return Err(OffsetsError::MissingToday(offsets.to_vec()));
        }
        Ok(Self { first, last })
    }

    #[inline]
    #[must_use]
    pub const fn first(&self) -> i64 {
        self.first
    }

    #[inline]
    #[must_use]
    pub const fn last(&self) -> i64 {
        self.last
    }

    /// Number of days held, `WINDOW_SIZE`
    #[must_use]
    pub const fn size(&self) -> usize {
        (self.last - self.first + 1) as usize
    }

    /// Offsets in ascending order
    pub fn iter(&self) -> impl Iterator<Item = i64> {
        self.first..=self.last
    }
}

/// Everything the window needs besides its collaborators
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowSettings {
    pub catalog_size: u32,
    pub offsets: WindowOffsets,
    pub top_k: usize,
    pub retry: RetryPolicy,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_offsets() {
        let offsets = WindowOffsets::default();
        assert_eq!(offsets.iter().collect::<Vec<_>>(), [-2, -1, 0, 1]);
        assert_eq!(offsets.size(), 4);
    }

    #[test]
    fn unordered_offsets_accepted() {
        let offsets = WindowOffsets::from_offsets(&[1, -2, 0, -1]).unwrap();
        assert_eq!(offsets, WindowOffsets::default());
    }

    #[test]
    fn single_day_window() {
        let offsets = WindowOffsets::from_offsets(&[0]).unwrap();
        assert_eq!(offsets.size(), 1);
    }

    #[test]
    fn rejects_bad_offsets() {
        assert_eq!(WindowOffsets::from_offsets(&[]), Err(OffsetsError::Empty));
        assert!(matches!(
            WindowOffsets::from_offsets(&[-2, 0, 1]),
            Err(OffsetsError::NotContiguous(_))
        ));
        assert!(matches!(
            WindowOffsets::from_offsets(&[0, 0, 1]),
            Err(OffsetsError::NotContiguous(_))
        ));
        assert!(matches!(
            WindowOffsets::from_offsets(&[1, 2]),
            Err(OffsetsError::MissingToday(_))
        ));
    }
}
