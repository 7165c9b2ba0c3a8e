//! Study runner: the per-symbol event loop.
//!
//! For each page target the runner fetches what the selection policy needs,
//! asks the policy for a plan, and either evaluates return windows into the
//! run's `ReturnSet` or collects recent outliers for reporting. Provider
//! failures cost one symbol; unsatisfiable windows cost one event.

use std::collections::HashMap;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use discerner_core::data::{DataError, PageSetProvider, PriceProvider, ViewProvider};
use discerner_core::domain::{OutlierSet, PriceSeries, WindowSpec};
use discerner_core::pages::{
    financial_pages, NamedPages, PageError, PageSource, PageTarget, FINANCIALS_BENCHMARK,
};
use discerner_core::stats::find_highest_outliers;
use discerner_core::{
    build_window, count_inflections, ClassifyError, DataType, EventSelection, InflectionStats,
    RecentOutlier, ReturnSet, ReturnsChart, SelectionInput, SelectionPlan,
};

use crate::config::{ConfigError, StudyConfig};

/// Errors that stop a study before any symbol is analyzed.
#[derive(Debug, Error)]
pub enum RunError {
    #[error("config error: {0}")]
    Config(#[from] ConfigError),
    #[error("page set error: {0}")]
    Pages(#[from] PageError),
    #[error("page set provider failed: {0}")]
    PageProvider(#[from] DataError),
}

/// A symbol whose data could not be fetched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SymbolFailure {
    pub symbol: String,
    pub reason: String,
}

/// Everything a finished study produced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StudyReport {
    pub data_type: DataType,
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub returns: ReturnSet,
    pub recent: Vec<RecentOutlier>,
    pub symbols_analyzed: usize,
    pub events_planned: usize,
    pub events_skipped: usize,
    pub failures: Vec<SymbolFailure>,
}

impl StudyReport {
    fn new(data_type: DataType, start: NaiveDate, end: NaiveDate) -> Self {
        Self {
            data_type,
            start,
            end,
            returns: ReturnSet::new(),
            recent: Vec::new(),
            symbols_analyzed: 0,
            events_planned: 0,
            events_skipped: 0,
            failures: Vec::new(),
        }
    }

    /// Inflection summary over every recorded event.
    pub fn inflection_stats(&self) -> Result<InflectionStats, ClassifyError> {
        count_inflections(&self.returns.pairs())
    }

    /// Ranked return pairs for plotting or export.
    pub fn chart(&self) -> Result<ReturnsChart, ClassifyError> {
        ReturnsChart::from_pairs(&self.returns.pairs())
    }
}

/// Expand a page source into concrete targets.
///
/// Financial topics are priced against the benchmark; S&P 500 members and
/// literal pairs against their own ticker. `sp500` builds the page-set
/// provider and is only called for the S&P 500 source.
pub fn resolve_targets<P, F>(source: &PageSource, sp500: F) -> Result<Vec<PageTarget>, RunError>
where
    P: PageSetProvider,
    F: FnOnce() -> Result<P, DataError>,
{
    let targets: Vec<PageTarget> = match source {
        PageSource::Named(NamedPages::Financials) => financial_pages()
            .into_iter()
            .map(|pair| PageTarget::against(pair, FINANCIALS_BENCHMARK))
            .collect(),
        PageSource::Named(NamedPages::Sp500) => {
            let sp500 = sp500()?;
            tracing::info!(provider = sp500.name(), "fetching page set");
            sp500
                .fetch_pages()?
                .into_iter()
                .map(PageTarget::own_ticker)
                .collect()
        }
        PageSource::Literal(pairs) => pairs.iter().cloned().map(PageTarget::own_ticker).collect(),
    };

    if targets.is_empty() {
        return Err(PageError::Empty.into());
    }
    Ok(targets)
}

/// Run a study over `targets`.
///
/// `now` anchors both the study range and the recency window.
pub fn run_study(
    config: &StudyConfig,
    targets: &[PageTarget],
    prices: &dyn PriceProvider,
    views: &dyn ViewProvider,
    now: DateTime<Utc>,
) -> Result<StudyReport, RunError> {
    config.validate()?;
    let (start, end) = config.study_range(now.date_naive())?;
    let selection = config.selection();

    tracing::info!(
        data_type = %config.data_type,
        symbols = targets.len(),
        %start,
        %end,
        "starting study"
    );

    let mut study = Study {
        config,
        selection: &selection,
        prices,
        views,
        start,
        end,
        now,
        price_cache: HashMap::new(),
        report: StudyReport::new(selection.data_type(), start, end),
    };
    for target in targets {
        study.analyze(target);
    }

    let report = study.report;
    tracing::info!(
        analyzed = report.symbols_analyzed,
        failed = report.failures.len(),
        events = report.returns.len(),
        skipped = report.events_skipped,
        recent = report.recent.len(),
        "study finished"
    );
    Ok(report)
}

struct Study<'a> {
    config: &'a StudyConfig,
    selection: &'a EventSelection,
    prices: &'a dyn PriceProvider,
    views: &'a dyn ViewProvider,
    start: NaiveDate,
    end: NaiveDate,
    now: DateTime<Utc>,
    price_cache: HashMap<String, PriceSeries>,
    report: StudyReport,
}

impl Study<'_> {
    fn analyze(&mut self, target: &PageTarget) {
        tracing::info!(symbol = %target.symbol, topic = %target.topic, "analyzing");

        let outliers = match self.outliers_for(target) {
            Ok(outliers) => outliers,
            Err(e) => return self.fail(target, e),
        };
        if self.selection.needs_prices() {
            if let Err(e) = self.load_prices(&target.price_symbol) {
                return self.fail(target, e);
            }
        }

        let series = self.price_cache.get(&target.price_symbol);
        let plan = self.selection.plan(SelectionInput {
            symbol: &target.symbol,
            prices: series,
            outliers: outliers.as_ref(),
            interval: self.config.interval,
            now: self.now,
        });
        self.report.symbols_analyzed += 1;

        match plan {
            SelectionPlan::Evaluate(days) => {
                let Some(series) = series else { return };
                self.report.events_planned += days.len();
                let mut returns = ReturnSet::new();
                for day in days {
                    let recorded = match build_window(series, day, self.config.interval) {
                        Ok(window) => returns.record(&target.symbol, series, window),
                        Err(e) => {
                            let bounds = WindowSpec::new(self.config.interval, day).logical_bounds();
                            tracing::debug!(
                                symbol = %target.symbol,
                                day,
                                ?bounds,
                                error = %e,
                                "skipping event"
                            );
                            None
                        }
                    };
                    if recorded.is_none() {
                        self.report.events_skipped += 1;
                    }
                }
                tracing::debug!(symbol = %target.symbol, events = returns.len(), "evaluated");
                self.report.returns.merge(returns);
            }
            SelectionPlan::Report(recent) => self.report.recent.extend(recent),
        }
    }

    fn outliers_for(&self, target: &PageTarget) -> Result<Option<OutlierSet>, DataError> {
        if !self.selection.needs_views() {
            return Ok(None);
        }
        let daily = self.views.fetch_views(&target.topic, self.start, self.end)?;
        let outliers = find_highest_outliers(&daily, self.config.probability);
        tracing::debug!(
            topic = %target.topic,
            days = daily.len(),
            outliers = outliers.outliers.len(),
            quantile = outliers.quantile,
            "page views"
        );
        Ok(Some(outliers))
    }

    fn load_prices(&mut self, symbol: &str) -> Result<(), DataError> {
        if self.price_cache.contains_key(symbol) {
            return Ok(());
        }
        let series = self.prices.fetch_prices(symbol, self.start, self.end)?;
        tracing::debug!(
            symbol,
            days = series.len(),
            observations = series.observation_count(),
            "prices"
        );
        self.price_cache.insert(symbol.to_string(), series);
        Ok(())
    }

    fn fail(&mut self, target: &PageTarget, err: DataError) {
        tracing::warn!(symbol = %target.symbol, error = %err, "skipping symbol");
        self.report.failures.push(SymbolFailure {
            symbol: target.symbol.clone(),
            reason: err.to_string(),
        });
    }
}
