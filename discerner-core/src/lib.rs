//! Discerner Core: event-window resolution and inflection statistics.
//!
//! This crate contains the heart of the event study:
//! - Domain types (calendar-daily price series with gap markers, windows, return pairs)
//! - Gap-aware index resolution and window extraction
//! - Run-scoped return accumulation
//! - Inflection classification and display ranking
//! - Event selection policies (random, historical outliers, recent outliers)
//! - Calendar conversion, quantile outlier detection, page sets
//! - Provider traits with Yahoo Finance, Wikimedia and Wikipedia implementations

pub mod calendar;
pub mod data;
pub mod domain;
pub mod inflection;
pub mod pages;
pub mod returns;
pub mod rng;
pub mod selection;
pub mod stats;
pub mod window;

pub use inflection::{count_inflections, rank_for_display, ClassifyError, InflectionStats, ReturnsChart};
pub use returns::{EventReturn, ReturnSet};
pub use selection::{DataType, EventSelection, RecentOutlier, SelectionInput, SelectionPlan};
pub use window::{build_window, WindowError};
