//! Study configuration.
//!
//! A `StudyConfig` can be loaded from TOML; command-line flags are applied on
//! top of it by the CLI. Every field has a default, so an empty file is a
//! valid configuration.

use std::path::{Path, PathBuf};

use chrono::{Datelike, Days, NaiveDate};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use discerner_core::rng::EventRng;
use discerner_core::{DataType, EventSelection};

pub const DEFAULT_INTERVAL: usize = 14;
pub const DEFAULT_PROBABILITY: f64 = 0.9;
pub const DEFAULT_DAYS: u32 = 7;
pub const DEFAULT_RANDOM_EVENTS: usize = 10;
/// Days of page-view history behind a RECENT study's outlier quantile.
pub const RECENT_LOOKBACK_DAYS: u32 = 365;

/// Errors from loading or validating a configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("interval must be at least one day")]
    ZeroInterval,

    #[error("probability must lie strictly between 0 and 1, got {0}")]
    ProbabilityOutOfRange(f64),

    #[error("days must be at least one")]
    ZeroDays,

    #[error("random_events_per_symbol must be at least one")]
    ZeroRandomEvents,

    #[error("year {year} has not started yet (today is {today})")]
    FutureYear { year: i32, today: NaiveDate },
}

/// Parameters of one study run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StudyConfig {
    /// Which selection policy feeds the study.
    pub data_type: DataType,
    /// Window length in days on either side of an event.
    pub interval: usize,
    /// Quantile above which a day's views count as an outlier.
    pub probability: f64,
    /// Recency window for RECENT studies, in days.
    pub days: u32,
    /// Random event days drawn per symbol in RANDOM studies.
    pub random_events_per_symbol: usize,
    /// Seed for RANDOM studies. Unseeded runs draw from entropy.
    pub seed: Option<u64>,
    /// Calendar year under study. Defaults to the current year.
    pub year: Option<i32>,
}

impl Default for StudyConfig {
    fn default() -> Self {
        Self {
            data_type: DataType::Historical,
            interval: DEFAULT_INTERVAL,
            probability: DEFAULT_PROBABILITY,
            days: DEFAULT_DAYS,
            random_events_per_symbol: DEFAULT_RANDOM_EVENTS,
            seed: None,
            year: None,
        }
    }
}

impl StudyConfig {
    /// Load a configuration from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&content)
    }

    /// Parse a configuration from a TOML string.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.interval == 0 {
            return Err(ConfigError::ZeroInterval);
        }
        if !(self.probability > 0.0 && self.probability < 1.0) {
            return Err(ConfigError::ProbabilityOutOfRange(self.probability));
        }
        if self.days == 0 {
            return Err(ConfigError::ZeroDays);
        }
        if self.random_events_per_symbol == 0 {
            return Err(ConfigError::ZeroRandomEvents);
        }
        Ok(())
    }

    /// First and last day of the study.
    ///
    /// RANDOM and HISTORICAL studies cover 1 January of the study year through
    /// the earlier of 31 December and `today`, since day offsets count from
    /// 1 January. RECENT studies ignore `year` and look back a rolling
    /// `RECENT_LOOKBACK_DAYS` (or `days`, if longer) ending `today`, so the
    /// recency window never gets cut at New Year.
    pub fn study_range(&self, today: NaiveDate) -> Result<(NaiveDate, NaiveDate), ConfigError> {
        if self.data_type == DataType::Recent {
            let lookback = RECENT_LOOKBACK_DAYS.max(self.days);
            let start = today
                .checked_sub_days(Days::new(u64::from(lookback)))
                .unwrap_or(NaiveDate::MIN);
            return Ok((start, today));
        }

        let year = self.year.unwrap_or_else(|| today.year());
        let future = || ConfigError::FutureYear { year, today };

        let start = NaiveDate::from_ymd_opt(year, 1, 1).ok_or_else(future)?;
        if start > today {
            return Err(future());
        }
        let end = NaiveDate::from_ymd_opt(year, 12, 31).ok_or_else(future)?;
        Ok((start, end.min(today)))
    }

    /// The selection policy this configuration describes.
    pub fn selection(&self) -> EventSelection {
        EventSelection::for_data_type(
            self.data_type,
            self.random_events_per_symbol,
            self.days,
            EventRng::new(self.seed),
        )
    }
}
