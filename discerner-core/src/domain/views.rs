//! Page-view observations and the outliers flagged among them.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Views of one page on one day.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DailyViews {
    pub date: NaiveDate,
    pub views: f64,
}

/// A day whose view count sits above the quantile threshold.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Outlier {
    pub date: NaiveDate,
    pub views: f64,
}

/// Outliers for one page together with the threshold that produced them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutlierSet {
    pub outliers: Vec<Outlier>,
    pub quantile: f64,
}
