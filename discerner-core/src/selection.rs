//! Event selection policies.
//!
//! A policy decides which days of a symbol's price series get evaluated.
//! `RandomDays` and `HistoricalOutliers` feed the window extractor;
//! `RecentOutliers` never touches prices and only reports fresh spikes.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::calendar::{day_offset, timestamp_at};
use crate::domain::{OutlierSet, PriceSeries};
use crate::rng::EventRng;

/// Hour used to stamp an outlier day when judging recency.
pub const END_OF_DAY_HOUR: u32 = 23;

/// Which kind of study to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DataType {
    Random,
    Recent,
    Historical,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown data type '{0}' (expected RANDOM, RECENT or HISTORICAL)")]
pub struct UnknownDataType(pub String);

impl FromStr for DataType {
    type Err = UnknownDataType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "RANDOM" => Ok(Self::Random),
            "RECENT" => Ok(Self::Recent),
            "HISTORICAL" => Ok(Self::Historical),
            _ => Err(UnknownDataType(s.to_string())),
        }
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Random => "RANDOM",
            Self::Recent => "RECENT",
            Self::Historical => "HISTORICAL",
        };
        f.write_str(name)
    }
}

/// An outlier that landed inside the recency window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecentOutlier {
    pub symbol: String,
    pub date: NaiveDate,
    pub views: f64,
    pub quantile: f64,
}

impl fmt::Display for RecentOutlier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} {}",
            self.symbol, self.date, self.views, self.quantile
        )
    }
}

/// Everything a policy may look at for one symbol.
#[derive(Debug, Clone, Copy)]
pub struct SelectionInput<'a> {
    pub symbol: &'a str,
    pub prices: Option<&'a PriceSeries>,
    pub outliers: Option<&'a OutlierSet>,
    pub interval: usize,
    pub now: DateTime<Utc>,
}

/// What to do with a symbol once the policy has looked at it.
#[derive(Debug, Clone, PartialEq)]
pub enum SelectionPlan {
    /// Evaluate return windows around these day offsets.
    Evaluate(Vec<usize>),
    /// Report these outliers directly.
    Report(Vec<RecentOutlier>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventSelection {
    RandomDays { count: usize, rng: EventRng },
    HistoricalOutliers,
    RecentOutliers { days_back: u32 },
}

impl EventSelection {
    /// Build the policy for a data type. Selected once at startup.
    pub fn for_data_type(data_type: DataType, count: usize, days_back: u32, rng: EventRng) -> Self {
        match data_type {
            DataType::Random => Self::RandomDays { count, rng },
            DataType::Historical => Self::HistoricalOutliers,
            DataType::Recent => Self::RecentOutliers { days_back },
        }
    }

    pub fn data_type(&self) -> DataType {
        match self {
            Self::RandomDays { .. } => DataType::Random,
            Self::HistoricalOutliers => DataType::Historical,
            Self::RecentOutliers { .. } => DataType::Recent,
        }
    }

    pub fn needs_prices(&self) -> bool {
        !matches!(self, Self::RecentOutliers { .. })
    }

    pub fn needs_views(&self) -> bool {
        !matches!(self, Self::RandomDays { .. })
    }

    pub fn plan(&self, input: SelectionInput<'_>) -> SelectionPlan {
        match self {
            Self::RandomDays { count, rng } => {
                let days = input
                    .prices
                    .map(|series| {
                        let mut rng = rng.rng_for(input.symbol);
                        random_days(series.len(), input.interval, *count, &mut rng)
                    })
                    .unwrap_or_default();
                SelectionPlan::Evaluate(days)
            }
            Self::HistoricalOutliers => {
                let days = match (input.prices, input.outliers) {
                    (Some(series), Some(outliers)) => historical_days(series.start(), outliers),
                    _ => Vec::new(),
                };
                SelectionPlan::Evaluate(days)
            }
            Self::RecentOutliers { days_back } => {
                let recent = input
                    .outliers
                    .map(|outliers| {
                        recent_outliers(input.symbol, outliers, *days_back, input.now)
                    })
                    .unwrap_or_default();
                SelectionPlan::Report(recent)
            }
        }
    }
}

/// Draw `count` days uniformly from `[interval, len - interval]`.
///
/// A series shorter than two intervals has no admissible days.
pub fn random_days<R: Rng>(
    len: usize,
    interval: usize,
    count: usize,
    rng: &mut R,
) -> Vec<usize> {
    let Some(upper) = len.checked_sub(interval) else {
        return Vec::new();
    };
    if upper < interval {
        return Vec::new();
    }
    (0..count).map(|_| rng.gen_range(interval..=upper)).collect()
}

/// Offsets of each outlier date from the series start. Dates before the start
/// are dropped.
pub fn historical_days(series_start: NaiveDate, outliers: &OutlierSet) -> Vec<usize> {
    outliers
        .outliers
        .iter()
        .filter_map(|o| day_offset(series_start, o.date))
        .collect()
}

/// Outliers whose end-of-day timestamp lies within `days_back` days of `now`.
pub fn recent_outliers(
    symbol: &str,
    outliers: &OutlierSet,
    days_back: u32,
    now: DateTime<Utc>,
) -> Vec<RecentOutlier> {
    let window_secs = i64::from(days_back) * 24 * 60 * 60;
    let now_ts = now.timestamp();

    outliers
        .outliers
        .iter()
        .filter(|o| {
            timestamp_at(o.date, END_OF_DAY_HOUR)
                .map(|ts| now_ts - ts <= window_secs)
                .unwrap_or(false)
        })
        .map(|o| RecentOutlier {
            symbol: symbol.to_string(),
            date: o.date,
            views: o.views,
            quantile: outliers.quantile,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Outlier;
    use chrono::TimeZone;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn outliers(dates: &[NaiveDate]) -> OutlierSet {
        OutlierSet {
            outliers: dates
                .iter()
                .map(|&date| Outlier {
                    date,
                    views: 1000.0,
                })
                .collect(),
            quantile: 250.0,
        }
    }

    fn flat_series(len: usize) -> PriceSeries {
        PriceSeries::new(d(2024, 1, 1), vec![Some(10.0); len])
    }

    #[test]
    fn data_type_parses_case_insensitively() {
        assert_eq!("random".parse::<DataType>().unwrap(), DataType::Random);
        assert_eq!("HISTORICAL".parse::<DataType>().unwrap(), DataType::Historical);
        assert!("SOMETIMES".parse::<DataType>().is_err());
        assert_eq!(DataType::Recent.to_string(), "RECENT");
    }

    #[test]
    fn random_days_stay_in_bounds() {
        let mut rng = EventRng::seeded(1).rng_for("SPY");
        let days = random_days(100, 14, 500, &mut rng);
        assert_eq!(days.len(), 500);
        assert!(days.iter().all(|&d| (14..=86).contains(&d)));
    }

    #[test]
    fn random_days_on_short_series_is_empty() {
        let mut rng = EventRng::seeded(1).rng_for("SPY");
        assert!(random_days(20, 14, 10, &mut rng).is_empty());
        assert!(random_days(5, 14, 10, &mut rng).is_empty());
    }

    #[test]
    fn random_plan_is_reproducible_with_seed() {
        let policy = EventSelection::for_data_type(DataType::Random, 10, 7, EventRng::seeded(9));
        let series = flat_series(365);
        let input = SelectionInput {
            symbol: "MSFT",
            prices: Some(&series),
            outliers: None,
            interval: 14,
            now: Utc::now(),
        };
        assert_eq!(policy.plan(input), policy.plan(input));
    }

    #[test]
    fn historical_maps_dates_to_offsets() {
        let set = outliers(&[d(2023, 12, 30), d(2024, 1, 1), d(2024, 2, 1)]);
        assert_eq!(historical_days(d(2024, 1, 1), &set), vec![0, 31]);
    }

    #[test]
    fn historical_plan_needs_both_inputs() {
        let policy = EventSelection::HistoricalOutliers;
        let series = flat_series(60);
        let set = outliers(&[d(2024, 1, 20)]);
        let mut input = SelectionInput {
            symbol: "AAPL",
            prices: Some(&series),
            outliers: Some(&set),
            interval: 5,
            now: Utc::now(),
        };
        assert_eq!(policy.plan(input), SelectionPlan::Evaluate(vec![19]));

        input.outliers = None;
        assert_eq!(policy.plan(input), SelectionPlan::Evaluate(vec![]));
    }

    #[test]
    fn recent_filters_by_window() {
        let now = Utc.with_ymd_and_hms(2024, 3, 10, 12, 0, 0).unwrap();
        let set = outliers(&[d(2024, 3, 1), d(2024, 3, 6), d(2024, 3, 9)]);

        let recent = recent_outliers("GOOG", &set, 3, now);
        let dates: Vec<NaiveDate> = recent.iter().map(|r| r.date).collect();
        // 2024-03-06T23:00 is 3d13h before now: outside a 3 day window.
        assert_eq!(dates, vec![d(2024, 3, 9)]);
        assert_eq!(recent[0].quantile, 250.0);

        let recent = recent_outliers("GOOG", &set, 4, now);
        assert_eq!(recent.len(), 2);
    }

    #[test]
    fn recent_window_includes_its_exact_edge() {
        let now = Utc.with_ymd_and_hms(2024, 3, 10, 23, 0, 0).unwrap();
        let set = outliers(&[d(2024, 3, 6), d(2024, 3, 7)]);

        // 2024-03-07T23:00 is exactly 3 * 24h before now.
        let recent = recent_outliers("GOOG", &set, 3, now);
        let dates: Vec<NaiveDate> = recent.iter().map(|r| r.date).collect();
        assert_eq!(dates, vec![d(2024, 3, 7)]);

        let one_second_later = now + chrono::Duration::seconds(1);
        assert!(recent_outliers("GOOG", &set, 3, one_second_later).is_empty());
    }

    #[test]
    fn recent_line_format() {
        let line = RecentOutlier {
            symbol: "AAPL".into(),
            date: d(2024, 3, 9),
            views: 1200.0,
            quantile: 310.5,
        }
        .to_string();
        assert_eq!(line, "AAPL 2024-03-09 1200 310.5");
    }

    #[test]
    fn policies_declare_their_inputs() {
        let rng = EventRng::entropy();
        let random = EventSelection::for_data_type(DataType::Random, 5, 7, rng);
        let recent = EventSelection::for_data_type(DataType::Recent, 5, 7, rng);
        let historical = EventSelection::for_data_type(DataType::Historical, 5, 7, rng);

        assert!(random.needs_prices() && !random.needs_views());
        assert!(!recent.needs_prices() && recent.needs_views());
        assert!(historical.needs_prices() && historical.needs_views());
        assert_eq!(historical.data_type(), DataType::Historical);
    }
}
