//! Return pairs measured around a single event.

use serde::{Deserialize, Serialize};

/// Simple fractional returns over the pre-event and post-event windows.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ReturnPair {
    pub pre_return: f64,
    pub post_return: f64,
}

impl ReturnPair {
    pub fn new(pre_return: f64, post_return: f64) -> Self {
        Self {
            pre_return,
            post_return,
        }
    }

    /// Strict sign reversal between the two windows. Zero never counts.
    pub fn is_inflection(&self) -> bool {
        (self.pre_return > 0.0 && self.post_return < 0.0)
            || (self.pre_return < 0.0 && self.post_return > 0.0)
    }

    /// `pre - post`, the secondary display key.
    pub fn spread(&self) -> f64 {
        self.pre_return - self.post_return
    }
}

/// `(end - start) / start`.
pub fn simple_return(start_price: f64, end_price: f64) -> f64 {
    (end_price - start_price) / start_price
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sign_reversal_is_inflection() {
        assert!(ReturnPair::new(0.1, -0.2).is_inflection());
        assert!(ReturnPair::new(-0.1, 0.2).is_inflection());
        assert!(!ReturnPair::new(0.1, 0.2).is_inflection());
        assert!(!ReturnPair::new(-0.1, -0.2).is_inflection());
    }

    #[test]
    fn zero_is_never_inflection() {
        assert!(!ReturnPair::new(0.0, 5.0).is_inflection());
        assert!(!ReturnPair::new(-3.0, 0.0).is_inflection());
    }

    #[test]
    fn simple_return_is_fractional() {
        assert!((simple_return(100.0, 110.0) - 0.1).abs() < 1e-12);
        assert!((simple_return(50.0, 25.0) + 0.5).abs() < 1e-12);
    }
}
