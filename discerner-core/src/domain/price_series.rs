//! PriceSeries: calendar-daily adjusted closes with explicit gap markers.

use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};

/// Daily price series laid out on a calendar grid.
///
/// Position `i` is the calendar day `start + i`. A `None` entry is a gap
/// marker: a weekend, a holiday, or a missing quote. Non-finite prices are
/// stored as gaps so the rest of the pipeline never sees a NaN.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceSeries {
    start: NaiveDate,
    prices: Vec<Option<f64>>,
}

impl PriceSeries {
    pub fn new(start: NaiveDate, prices: Vec<Option<f64>>) -> Self {
        let prices = prices
            .into_iter()
            .map(|p| p.filter(|v| v.is_finite()))
            .collect();
        Self { start, prices }
    }

    /// Lay dated observations onto the calendar grid `start..=end`.
    ///
    /// Days without an observation become gaps. Observations outside the
    /// range are ignored; a later duplicate for the same day wins.
    pub fn from_observations(
        start: NaiveDate,
        end: NaiveDate,
        observations: impl IntoIterator<Item = (NaiveDate, f64)>,
    ) -> Self {
        let len = if end < start {
            0
        } else {
            (end - start).num_days() as usize + 1
        };
        let mut prices = vec![None; len];
        for (date, price) in observations {
            if date < start || date > end {
                continue;
            }
            let idx = (date - start).num_days() as usize;
            prices[idx] = Some(price).filter(|v| v.is_finite());
        }
        Self { start, prices }
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn len(&self) -> usize {
        self.prices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.prices.is_empty()
    }

    /// Price at `index`, or `None` for a gap or an out-of-range index.
    pub fn price(&self, index: usize) -> Option<f64> {
        self.prices.get(index).copied().flatten()
    }

    /// True when `index` holds a gap marker. Out-of-range indices are not gaps.
    pub fn is_gap(&self, index: usize) -> bool {
        matches!(self.prices.get(index), Some(None))
    }

    /// Calendar date of position `index`.
    pub fn date_at(&self, index: usize) -> NaiveDate {
        self.start + Duration::days(index as i64)
    }

    /// Number of non-gap positions.
    pub fn observation_count(&self) -> usize {
        self.prices.iter().filter(|p| p.is_some()).count()
    }
}
