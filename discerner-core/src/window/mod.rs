//! Gap-aware event window resolution.
//!
//! Events are placed on a calendar-daily [`PriceSeries`](crate::domain::PriceSeries)
//! that contains gap markers for weekends, holidays and missing quotes. The
//! resolver walks past those gaps without crossing the series boundaries, and
//! the extractor composes four resolutions into a [`ResolvedWindow`].
//!
//! A window that cannot be placed is not an error worth surfacing: callers log
//! it at debug level and move on to the next event.

pub mod extractor;
pub mod resolver;

pub use extractor::{build_window, get_end_index, get_start_index};
pub use resolver::{resolve_non_gap, Direction};

pub use crate::domain::ResolvedWindow;

use thiserror::Error;

/// Window resolution failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WindowError {
    #[error("the given day and price data do not support a valid evaluation: {reason}")]
    Unsatisfiable { reason: String },
}

impl WindowError {
    pub(crate) fn unsatisfiable(reason: impl Into<String>) -> Self {
        Self::Unsatisfiable {
            reason: reason.into(),
        }
    }
}
