//! Inflection statistics over a run's return pairs.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::ReturnPair;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClassifyError {
    #[error("no return pairs to classify")]
    EmptyReturnSet,
}

/// How many pairs reversed sign, out of how many.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct InflectionStats {
    pub count: usize,
    pub total: usize,
    pub rate: f64,
}

/// Count sign reversals. An empty collection has no rate and is rejected.
pub fn count_inflections(pairs: &[ReturnPair]) -> Result<InflectionStats, ClassifyError> {
    if pairs.is_empty() {
        return Err(ClassifyError::EmptyReturnSet);
    }
    let count = pairs.iter().filter(|p| p.is_inflection()).count();
    Ok(InflectionStats {
        count,
        total: pairs.len(),
        rate: count as f64 / pairs.len() as f64,
    })
}

/// Order pairs for presentation: non-inflections first, then by `pre - post`
/// ascending. The secondary key applies to both groups, so non-inflections
/// are not left in insertion order. The sort is stable.
pub fn rank_for_display(pairs: &[ReturnPair]) -> Vec<ReturnPair> {
    let mut ranked = pairs.to_vec();
    ranked.sort_by(|a, b| {
        a.is_inflection()
            .cmp(&b.is_inflection())
            .then_with(|| a.spread().total_cmp(&b.spread()))
    });
    ranked
}

/// Ranked pairs plus the value bounds a scatter plot needs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReturnsChart {
    pub ranked: Vec<ReturnPair>,
    pub min: f64,
    pub max: f64,
}

impl ReturnsChart {
    pub fn from_pairs(pairs: &[ReturnPair]) -> Result<Self, ClassifyError> {
        if pairs.is_empty() {
            return Err(ClassifyError::EmptyReturnSet);
        }
        let values = pairs.iter().flat_map(|p| [p.pre_return, p.post_return]);
        let (min, max) = values.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
            (lo.min(v), hi.max(v))
        });
        Ok(Self {
            ranked: rank_for_display(pairs),
            min,
            max,
        })
    }

    pub fn pre_returns(&self) -> impl Iterator<Item = f64> + '_ {
        self.ranked.iter().map(|p| p.pre_return)
    }

    pub fn post_returns(&self) -> impl Iterator<Item = f64> + '_ {
        self.ranked.iter().map(|p| p.post_return)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pairs(raw: &[(f64, f64)]) -> Vec<ReturnPair> {
        raw.iter().map(|&(a, b)| ReturnPair::new(a, b)).collect()
    }

    #[test]
    fn counts_sign_reversals() {
        let p = pairs(&[(1.0, -1.0), (-1.0, 1.0), (1.0, 1.0), (-1.0, -1.0), (0.0, 5.0)]);
        let stats = count_inflections(&p).unwrap();
        assert_eq!(stats.count, 2);
        assert_eq!(stats.total, 5);
        assert!((stats.rate - 0.4).abs() < 1e-12);
    }

    #[test]
    fn empty_is_rejected() {
        assert_eq!(count_inflections(&[]), Err(ClassifyError::EmptyReturnSet));
    }

    #[test]
    fn ranking_puts_non_inflections_first() {
        let p = pairs(&[(0.3, -0.1), (0.2, 0.1), (-0.2, 0.4), (-0.5, -0.1)]);
        let ranked = rank_for_display(&p);

        assert!(!ranked[0].is_inflection());
        assert!(!ranked[1].is_inflection());
        assert!(ranked[2].is_inflection());
        assert!(ranked[3].is_inflection());

        // Non-inflections by spread: -0.4 then 0.1.
        assert_eq!(ranked[0], ReturnPair::new(-0.5, -0.1));
        assert_eq!(ranked[1], ReturnPair::new(0.2, 0.1));
        // Inflections by spread: -0.6 then 0.4.
        assert_eq!(ranked[2], ReturnPair::new(-0.2, 0.4));
        assert_eq!(ranked[3], ReturnPair::new(0.3, -0.1));
    }

    #[test]
    fn ranking_is_stable_for_equal_keys() {
        let p = pairs(&[(0.5, 0.25), (0.75, 0.5)]);
        let ranked = rank_for_display(&p);
        assert_eq!(ranked, p);
    }

    #[test]
    fn chart_bounds_cover_both_series() {
        let p = pairs(&[(0.05, -0.2), (0.3, 0.1)]);
        let chart = ReturnsChart::from_pairs(&p).unwrap();
        assert_eq!(chart.min, -0.2);
        assert_eq!(chart.max, 0.3);
        assert_eq!(chart.pre_returns().count(), 2);
    }
}
