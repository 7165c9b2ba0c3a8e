//! Window boundary computation around an event day.
//!
//! `pre_end` and `post_end` are measured from the already-resolved
//! `pre_start` / `post_start`, so a gap near the event shifts a whole window
//! instead of producing overlapping or inverted windows.

use super::resolver::{resolve_non_gap, Direction};
use super::WindowError;
use crate::domain::{PriceSeries, ResolvedWindow};

/// Resolve the end-side boundary `start + offset`.
///
/// Past the end of the series the window is truncated to the last observation,
/// provided that observation still lies after `start`. A gap at the target is
/// resolved backward. A positive offset never yields an index at or before
/// `start`.
pub fn get_end_index(
    series: &PriceSeries,
    start: usize,
    offset: i64,
) -> Result<usize, WindowError> {
    let target = start as i64 + offset;
    if target < 0 {
        return Err(WindowError::unsatisfiable(format!(
            "index {start}{offset:+} falls before the series start"
        )));
    }

    let last = series.len() as i64 - 1;
    if target > last {
        let end = resolve_non_gap(series, series.len().saturating_sub(1), Direction::Reverse)?;
        if end <= start {
            return Err(WindowError::unsatisfiable(format!(
                "last observation {end} does not lie after {start}"
            )));
        }
        return Ok(end);
    }

    let target = target as usize;
    let end = if series.is_gap(target) {
        resolve_non_gap(series, target, Direction::Reverse)?
    } else {
        target
    };

    if offset > 0 && end <= start {
        return Err(WindowError::unsatisfiable(format!(
            "window from {start} collapses: no observation in {}..={target}",
            start + 1
        )));
    }
    Ok(end)
}

/// Resolve the start-side boundary `day + offset`.
///
/// The target must lie inside the series. A gap at the target is resolved
/// forward.
pub fn get_start_index(
    series: &PriceSeries,
    day: usize,
    offset: i64,
) -> Result<usize, WindowError> {
    let target = day as i64 + offset;
    if target < 0 || target > series.len() as i64 - 1 {
        return Err(WindowError::unsatisfiable(format!(
            "index {day}{offset:+} lies outside the series (len {})",
            series.len()
        )));
    }

    let target = target as usize;
    if series.is_gap(target) {
        resolve_non_gap(series, target, Direction::Forward)
    } else {
        Ok(target)
    }
}

/// Resolve the pre-event and post-event windows of `interval` days around
/// `event_day`.
pub fn build_window(
    series: &PriceSeries,
    event_day: usize,
    interval: usize,
) -> Result<ResolvedWindow, WindowError> {
    if interval == 0 {
        return Err(WindowError::unsatisfiable("interval must be at least one day"));
    }
    let span = interval as i64;

    let pre_start = get_end_index(series, event_day, -span)?;
    let pre_end = get_end_index(series, pre_start, span - 1)?;
    let post_start = get_start_index(series, event_day, 1)?;
    let post_end = get_end_index(series, post_start, span - 1)?;

    let window = ResolvedWindow {
        event_day,
        pre_start,
        pre_end,
        post_start,
        post_end,
    };
    debug_assert!(window.is_ordered(), "unordered window {window:?}");
    Ok(window)
}
