//! Runtime configuration
//!
//! Defaults reproduce the live game: a 4650-word catalog starting 2022-04-01,
//! days counted in Korea Standard Time, rotation at 01:00, top 1000 words
//! precomputed for two days back through tomorrow.

use crate::core::Calendar;
use crate::game::MIN_NEIGHBORS;
use crate::window::{
    OffsetsError, RetryPolicy, RotationSchedule, WindowOffsets, WindowSettings,
};
use chrono::{FixedOffset, NaiveDate, NaiveTime};
use std::time::Duration;
use thiserror::Error;

pub const DEFAULT_CATALOG_SIZE: u32 = 4650;
pub const DEFAULT_TOP_K: usize = 1000;
pub const DEFAULT_UTC_OFFSET_HOURS: i32 = 9;
pub const DEFAULT_ROTATION_HOUR: u32 = 1;
pub const DEFAULT_ROTATION_MINUTE: u32 = 0;

/// Problems found while validating a `Config`
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("catalog size must be at least the window size ({window}), got {catalog}")]
    CatalogTooSmall { catalog: u32, window: usize },

    #[error("top-k must be at least 11 for similarity summaries, got {0}")]
    TopKTooSmall(usize),

    #[error("retry attempts must be at least 1")]
    NoRetryAttempts,

    #[error("invalid UTC offset: {0} hours")]
    UtcOffset(i32),

    #[error("invalid rotation time {hour:02}:{minute:02}")]
    RotationTime { hour: u32, minute: u32 },

    #[error("invalid date `{0}`")]
    Epoch(String),

    #[error(transparent)]
    Offsets(#[from] OffsetsError),
}

/// All tunables for the engine
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub catalog_size: u32,
    pub epoch: NaiveDate,
    pub utc_offset: FixedOffset,
    pub rotation_time: NaiveTime,
    pub top_k: usize,
    pub window: WindowOffsets,
    pub retry: RetryPolicy,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            catalog_size: DEFAULT_CATALOG_SIZE,
            epoch: NaiveDate::from_ymd_opt(2022, 4, 1).expect("valid epoch date"),
            utc_offset: FixedOffset::east_opt(DEFAULT_UTC_OFFSET_HOURS * 3600)
                .expect("valid offset"),
            rotation_time: NaiveTime::from_hms_opt(DEFAULT_ROTATION_HOUR, DEFAULT_ROTATION_MINUTE, 0)
                .expect("valid rotation time"),
            top_k: DEFAULT_TOP_K,
            window: WindowOffsets::default(),
            retry: RetryPolicy::default(),
        }
    }
}

impl Config {
    /// Parse an epoch date in `YYYY-MM-DD` form
    ///
    /// # Errors
    /// Returns `ConfigError::Epoch` if the text is not a valid date.
    pub fn parse_epoch(text: &str) -> Result<NaiveDate, ConfigError> {
        NaiveDate::parse_from_str(text, "%Y-%m-%d").map_err(|_| ConfigError::Epoch(text.to_string()))
    }

    /// Whole-hour UTC offset
    ///
    /// # Errors
    /// Returns `ConfigError::UtcOffset` outside `-23..=23`.
    pub fn offset_from_hours(hours: i32) -> Result<FixedOffset, ConfigError> {
        hours
            .checked_mul(3600)
            .and_then(FixedOffset::east_opt)
            .ok_or(ConfigError::UtcOffset(hours))
    }

    /// Rotation clock time
    ///
    /// # Errors
    /// Returns `ConfigError::RotationTime` for an impossible time of day.
    pub fn rotation_at(hour: u32, minute: u32) -> Result<NaiveTime, ConfigError> {
        NaiveTime::from_hms_opt(hour, minute, 0).ok_or(ConfigError::RotationTime { hour, minute })
    }

    /// Retry policy from an attempt count and initial backoff
    #[must_use]
    pub const fn retry_policy(max_attempts: u32, initial_backoff_ms: u64) -> RetryPolicy {
        RetryPolicy {
            max_attempts,
            initial_backoff: Duration::from_millis(initial_backoff_ms),
        }
    }

    /// Check cross-field constraints
    ///
    /// # Errors
    /// Returns the first violated constraint.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if (self.catalog_size as usize) < self.window.size() {
            return Err(ConfigError::CatalogTooSmall {
                catalog: self.catalog_size,
                window: self.window.size(),
            });
        }
        if self.top_k < MIN_NEIGHBORS {
            return Err(ConfigError::TopKTooSmall(self.top_k));
        }
        if self.retry.max_attempts == 0 {
            return Err(ConfigError::NoRetryAttempts);
        }
        Ok(())
    }

    #[must_use]
    pub fn calendar(&self) -> Calendar {
        Calendar::new(self.epoch, self.catalog_size, self.utc_offset)
    }

    #[must_use]
    pub const fn schedule(&self) -> RotationSchedule {
        RotationSchedule::new(self.rotation_time, self.utc_offset)
    }

    #[must_use]
    pub const fn window_settings(&self) -> WindowSettings {
        WindowSettings {
            catalog_size: self.catalog_size,
            offsets: self.window,
            top_k: self.top_k,
            retry: self.retry,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.window.size(), 4);
        assert_eq!(config.utc_offset.local_minus_utc(), 9 * 3600);
    }

    #[test]
    fn default_calendar_scenario() {
        let calendar = Config::default().calendar();
        let day = calendar.day_for_date(NaiveDate::from_ymd_opt(2022, 4, 5).unwrap());
        assert_eq!(day.index(), 4);
    }

    #[test]
    fn rejects_small_top_k() {
        let config = Config {
            top_k: 10,
            ..Config::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::TopKTooSmall(10)));
    }

    #[test]
    fn rejects_catalog_smaller_than_window() {
        let config = Config {
            catalog_size: 3,
            ..Config::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::CatalogTooSmall { catalog: 3, window: 4 })
        ));
    }

    #[test]
    fn rejects_zero_retries() {
        let config = Config {
            retry: Config::retry_policy(0, 10),
            ..Config::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::NoRetryAttempts));
    }

    #[test]
    fn parses_inputs() {
        assert_eq!(
            Config::parse_epoch("2022-04-01").unwrap(),
            NaiveDate::from_ymd_opt(2022, 4, 1).unwrap()
        );
        assert!(Config::parse_epoch("2022-13-01").is_err());
        assert!(Config::offset_from_hours(-5).is_ok());
        assert_eq!(Config::offset_from_hours(30), Err(ConfigError::UtcOffset(30)));
        assert!(Config::rotation_at(1, 0).is_ok());
        assert!(Config::rotation_at(24, 0).is_err());
    }

    #[test]
    fn bad_offsets_surface_as_config_error() {
        let err: ConfigError = WindowOffsets::from_offsets(&[2, 3]).unwrap_err().into();
        assert!(matches!(err, ConfigError::Offsets(OffsetsError::MissingToday(_))));
    }
}
