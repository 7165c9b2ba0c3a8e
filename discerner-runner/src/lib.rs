//! Discerner Runner: study orchestration, configuration, reporting.
//!
//! This crate builds on `discerner-core` to provide:
//! - TOML-loadable study configuration with validation
//! - Page-set resolution into priced targets
//! - The per-symbol event loop that feeds the run's `ReturnSet`
//! - Text summaries and CSV artifacts

pub mod config;
pub mod export;
pub mod report;
pub mod study;

pub use config::{ConfigError, StudyConfig};
pub use export::{export_chart_csv, export_events_csv, save_artifacts};
pub use report::{format_summary, inflection_line};
pub use study::{resolve_targets, run_study, RunError, StudyReport, SymbolFailure};
