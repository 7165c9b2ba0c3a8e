//! Nearest non-gap index search.

use super::WindowError;
use crate::domain::PriceSeries;

/// Search direction along the series.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Toward the end of the series.
    Forward,
    /// Toward the start of the series.
    Reverse,
}

/// Find the nearest non-gap position starting at `index` (inclusive).
///
/// `Forward` scans `index..len`, `Reverse` scans `index..=0`. A reverse scan
/// from past the end starts at the last position instead.
pub fn resolve_non_gap(
    series: &PriceSeries,
    index: usize,
    direction: Direction,
) -> Result<usize, WindowError> {
    if series.is_empty() {
        return Err(WindowError::unsatisfiable("empty price series"));
    }

    let found = match direction {
        Direction::Forward => (index..series.len()).find(|&i| !series.is_gap(i)),
        Direction::Reverse => {
            let from = index.min(series.len() - 1);
            (0..=from).rev().find(|&i| !series.is_gap(i))
        }
    };

    found.ok_or_else(|| {
        WindowError::unsatisfiable(format!(
            "no price observation {} index {index}",
            match direction {
                Direction::Forward => "at or after",
                Direction::Reverse => "at or before",
            }
        ))
    })
}
