//! Domain types for event studies

pub mod price_series;
pub mod returns;
pub mod views;
pub mod window;

pub use price_series::PriceSeries;
pub use returns::{simple_return, ReturnPair};
pub use views::{DailyViews, Outlier, OutlierSet};
pub use window::{ResolvedWindow, WindowSpec};
