//! Data providers: prices, page views and page sets

pub mod pageviews;
pub mod provider;
pub mod sp500;
pub mod yahoo;

pub use pageviews::WikimediaViews;
pub use provider::{DataError, PageSetProvider, PriceProvider, ViewProvider};
pub use sp500::{parse_constituents, WikipediaSp500};
pub use yahoo::YahooProvider;
