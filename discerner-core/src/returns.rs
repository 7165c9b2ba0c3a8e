//! Run-scoped return accumulation.
//!
//! A [`ReturnSet`] is owned by one study run and handed by `&mut` to whoever
//! records events. Nothing else writes to it, and the pre/post sequences it
//! exposes always have the same length.

use serde::{Deserialize, Serialize};

use crate::domain::{simple_return, PriceSeries, ResolvedWindow, ReturnPair};

/// One evaluated event: where it came from and what it returned.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventReturn {
    pub symbol: String,
    pub window: ResolvedWindow,
    pub pair: ReturnPair,
}

/// Ordered collection of evaluated events for a single run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReturnSet {
    events: Vec<EventReturn>,
}

impl ReturnSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Read the four window prices and append the resulting pair.
    ///
    /// Returns the recorded pair, or `None` when a start price of zero makes
    /// the return non-finite; such events are dropped.
    pub fn record(
        &mut self,
        symbol: &str,
        series: &PriceSeries,
        window: ResolvedWindow,
    ) -> Option<ReturnPair> {
        let price = |i: usize| series.price(i);
        let pre = simple_return(price(window.pre_start)?, price(window.pre_end)?);
        let post = simple_return(price(window.post_start)?, price(window.post_end)?);

        if !pre.is_finite() || !post.is_finite() {
            tracing::debug!(
                symbol,
                event_day = window.event_day,
                "dropping event with non-finite return"
            );
            return None;
        }

        let pair = ReturnPair::new(pre, post);
        self.events.push(EventReturn {
            symbol: symbol.to_string(),
            window,
            pair,
        });
        Some(pair)
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn events(&self) -> &[EventReturn] {
        &self.events
    }

    pub fn pairs(&self) -> Vec<ReturnPair> {
        self.events.iter().map(|e| e.pair).collect()
    }

    /// Pre-event returns in recording order.
    pub fn pre_returns(&self) -> Vec<f64> {
        self.events.iter().map(|e| e.pair.pre_return).collect()
    }

    /// Post-event returns in recording order.
    pub fn post_returns(&self) -> Vec<f64> {
        self.events.iter().map(|e| e.pair.post_return).collect()
    }

    /// Append every event of `other`, preserving order.
    pub fn merge(&mut self, other: ReturnSet) {
        self.events.extend(other.events);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::window::build_window;
    use chrono::NaiveDate;

    fn series(values: &[Option<f64>]) -> PriceSeries {
        PriceSeries::new(NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(), values.to_vec())
    }

    #[test]
    fn record_computes_simple_returns() {
        let s = series(&[
            Some(100.0),
            Some(105.0),
            Some(110.0),
            Some(111.0),
            Some(99.0),
            Some(88.0),
        ]);
        let window = build_window(&s, 3, 2).unwrap();
        let mut set = ReturnSet::new();

        let pair = set.record("AAPL", &s, window).unwrap();

        // pre: 105 -> 110, post: 99 -> 88
        assert!((pair.pre_return - (5.0 / 105.0)).abs() < 1e-12);
        assert!((pair.post_return - (-11.0 / 99.0)).abs() < 1e-12);
        assert_eq!(set.len(), 1);
        assert_eq!(set.events()[0].symbol, "AAPL");
    }

    #[test]
    fn zero_start_price_is_dropped() {
        let s = series(&[Some(0.0), Some(1.0), Some(2.0), Some(3.0), Some(4.0)]);
        let window = build_window(&s, 2, 2).unwrap();
        let mut set = ReturnSet::new();

        assert!(set.record("X", &s, window).is_none());
        assert!(set.is_empty());
    }

    #[test]
    fn parallel_sequences_stay_aligned() {
        let s = series(&(1..=20).map(|v| Some(v as f64)).collect::<Vec<_>>());
        let mut set = ReturnSet::new();
        for day in [5, 8, 11] {
            let w = build_window(&s, day, 3).unwrap();
            set.record("SPY", &s, w);
        }

        assert_eq!(set.pre_returns().len(), 3);
        assert_eq!(set.pre_returns().len(), set.post_returns().len());
        assert_eq!(set.pairs()[1].pre_return, set.pre_returns()[1]);
    }

    #[test]
    fn merge_preserves_order() {
        let s = series(&(1..=20).map(|v| Some(v as f64)).collect::<Vec<_>>());
        let mut a = ReturnSet::new();
        let mut b = ReturnSet::new();
        a.record("A", &s, build_window(&s, 5, 2).unwrap());
        b.record("B", &s, build_window(&s, 9, 2).unwrap());

        a.merge(b);
        let symbols: Vec<&str> = a.events().iter().map(|e| e.symbol.as_str()).collect();
        assert_eq!(symbols, vec!["A", "B"]);
    }
}
