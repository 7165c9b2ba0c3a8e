//! Provider traits and structured error types.
//!
//! The traits abstract over data sources (Yahoo Finance, Wikimedia pageviews,
//! the Wikipedia S&P 500 table) so the study loop can be driven by in-memory
//! fakes in tests.

use chrono::NaiveDate;
use thiserror::Error;

use crate::domain::{DailyViews, PriceSeries};
use crate::pages::PagePair;

/// Structured error types for provider operations.
///
/// Displayable in the CLI; the study loop logs them via `Display` and skips
/// the affected symbol.
#[derive(Debug, Error)]
pub enum DataError {
    #[error("network unreachable: {0}")]
    NetworkUnreachable(String),

    #[error("HTTP {status} from {provider} for '{subject}'")]
    HttpStatus {
        provider: &'static str,
        status: u16,
        subject: String,
    },

    #[error("response format changed: {0}")]
    ResponseFormatChanged(String),

    #[error("symbol not found: {symbol}")]
    SymbolNotFound { symbol: String },

    #[error("no page views for topic '{topic}'")]
    TopicNotFound { topic: String },

    #[error("failed to build HTTP client: {0}")]
    Client(String),
}

impl DataError {
    pub(crate) fn from_reqwest(err: reqwest::Error) -> Self {
        Self::NetworkUnreachable(err.to_string())
    }
}

/// Daily adjusted-close prices for a ticker.
pub trait PriceProvider {
    fn name(&self) -> &str;

    /// Calendar-daily series over `start..=end`, gaps for days without a quote.
    fn fetch_prices(
        &self,
        symbol: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<PriceSeries, DataError>;
}

/// Daily page views for a wiki topic.
pub trait ViewProvider {
    fn name(&self) -> &str;

    /// Views per day over `start..=end`, oldest first.
    fn fetch_views(
        &self,
        topic: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<DailyViews>, DataError>;
}

/// A remotely sourced list of (symbol, topic) pairs.
pub trait PageSetProvider {
    fn name(&self) -> &str;

    fn fetch_pages(&self) -> Result<Vec<PagePair>, DataError>;
}
