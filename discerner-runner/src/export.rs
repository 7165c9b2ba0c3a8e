//! CSV export of study results.
//!
//! Two tables:
//! - **chart.csv**: return pairs in display order, ready for a scatter plot
//! - **events.csv**: every evaluated event with its window and returns

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::Duration;
use discerner_core::ReturnsChart;

use crate::study::StudyReport;

// ─── CSV export ─────────────────────────────────────────────────────

/// Ranked return pairs.
///
/// Columns: rank, pre_return, post_return, inflection
pub fn export_chart_csv(chart: &ReturnsChart) -> Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);
    wtr.write_record(["rank", "pre_return", "post_return", "inflection"])?;
    for (i, pair) in chart.ranked.iter().enumerate() {
        wtr.write_record([
            &i.to_string(),
            &format!("{:.6}", pair.pre_return),
            &format!("{:.6}", pair.post_return),
            &pair.is_inflection().to_string(),
        ])?;
    }
    let data = wtr.into_inner().context("failed to flush CSV writer")?;
    String::from_utf8(data).context("CSV output is not valid UTF-8")
}

/// Evaluated events in recording order.
///
/// Columns: symbol, event_date, pre_start, pre_end, post_start, post_end,
/// pre_return, post_return
pub fn export_events_csv(report: &StudyReport) -> Result<String> {
    let date = |index: usize| (report.start + Duration::days(index as i64)).to_string();

    let mut wtr = csv::Writer::from_writer(vec![]);
    wtr.write_record([
        "symbol",
        "event_date",
        "pre_start",
        "pre_end",
        "post_start",
        "post_end",
        "pre_return",
        "post_return",
    ])?;
    for event in report.returns.events() {
        let w = &event.window;
        wtr.write_record([
            event.symbol.clone(),
            date(w.event_day),
            date(w.pre_start),
            date(w.pre_end),
            date(w.post_start),
            date(w.post_end),
            format!("{:.6}", event.pair.pre_return),
            format!("{:.6}", event.pair.post_return),
        ])?;
    }
    let data = wtr.into_inner().context("failed to flush CSV writer")?;
    String::from_utf8(data).context("CSV output is not valid UTF-8")
}

// ─── Artifact bundle ────────────────────────────────────────────────

/// Write `chart.csv` and `events.csv` under `output_dir`.
///
/// A run without evaluated events writes nothing and returns `None`.
pub fn save_artifacts(report: &StudyReport, output_dir: &Path) -> Result<Option<PathBuf>> {
    let Ok(chart) = report.chart() else {
        return Ok(None);
    };

    std::fs::create_dir_all(output_dir)
        .with_context(|| format!("failed to create output dir: {}", output_dir.display()))?;

    let chart_path = output_dir.join("chart.csv");
    std::fs::write(&chart_path, export_chart_csv(&chart)?)
        .with_context(|| format!("failed to write {}", chart_path.display()))?;

    let events_path = output_dir.join("events.csv");
    std::fs::write(&events_path, export_events_csv(report)?)
        .with_context(|| format!("failed to write {}", events_path.display()))?;

    Ok(Some(output_dir.to_path_buf()))
}
