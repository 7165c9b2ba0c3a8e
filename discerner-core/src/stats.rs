//! Quantile-based outlier detection over page-view series.

use crate::domain::{DailyViews, Outlier, OutlierSet};

/// Sample quantile with linear interpolation between order statistics
/// (Hyndman & Fan type 7, the default of R's `quantile`).
///
/// Returns `None` for an empty sample or a probability outside `[0, 1]`.
pub fn quantile(values: &[f64], prob: f64) -> Option<f64> {
    if values.is_empty() || !(0.0..=1.0).contains(&prob) {
        return None;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);

    let h = (sorted.len() - 1) as f64 * prob;
    let lo = h.floor() as usize;
    let hi = h.ceil() as usize;
    Some(sorted[lo] + (h - lo as f64) * (sorted[hi] - sorted[lo]))
}

/// Days whose views lie strictly above the `prob` quantile, in date order.
///
/// An empty series yields no outliers and a NaN threshold.
pub fn find_highest_outliers(views: &[DailyViews], prob: f64) -> OutlierSet {
    let values: Vec<f64> = views.iter().map(|v| v.views).collect();
    let Some(threshold) = quantile(&values, prob) else {
        return OutlierSet {
            outliers: Vec::new(),
            quantile: f64::NAN,
        };
    };

    let mut outliers: Vec<Outlier> = views
        .iter()
        .filter(|v| v.views > threshold)
        .map(|v| Outlier {
            date: v.date,
            views: v.views,
        })
        .collect();
    outliers.sort_by_key(|o| o.date);

    OutlierSet {
        outliers,
        quantile: threshold,
    }
}
