//! Event windows: logical bounds and resolved indices.

use serde::{Deserialize, Serialize};

/// Interval length and event day. Logical boundaries may land on gaps or
/// outside the series; resolution turns them into concrete indices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowSpec {
    pub interval: usize,
    pub event_day: usize,
}

impl WindowSpec {
    pub fn new(interval: usize, event_day: usize) -> Self {
        Self {
            interval,
            event_day,
        }
    }

    /// `(pre_start, pre_end, post_start, post_end)` before gap resolution.
    pub fn logical_bounds(&self) -> (i64, i64, i64, i64) {
        let d = self.event_day as i64;
        let i = self.interval as i64;
        (d - i, d - 1, d + 1, d + i)
    }
}

/// Four non-gap, in-bounds indices around an event day.
///
/// Invariant: `pre_start <= pre_end < event_day < post_start <= post_end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedWindow {
    pub event_day: usize,
    pub pre_start: usize,
    pub pre_end: usize,
    pub post_start: usize,
    pub post_end: usize,
}

impl ResolvedWindow {
    pub fn is_ordered(&self) -> bool {
        self.pre_start <= self.pre_end
            && self.pre_end < self.event_day
            && self.event_day < self.post_start
            && self.post_start <= self.post_end
    }
}
