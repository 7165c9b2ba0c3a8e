//! Plain-text study summary.
//!
//! RECENT studies print one line per fresh outlier. RANDOM and HISTORICAL
//! studies end with the inflection summary line.

use discerner_core::{ClassifyError, DataType};

use crate::study::StudyReport;

/// The inflection summary line, or the reason there is none.
pub fn inflection_line(report: &StudyReport) -> String {
    match report.inflection_stats() {
        Ok(stats) => format!(
            "Number of inflection points: {}, Percentage Inflection points: {}",
            stats.count, stats.rate
        ),
        Err(ClassifyError::EmptyReturnSet) => {
            "No events could be evaluated; no inflection statistics".to_string()
        }
    }
}

/// Full text summary for stdout.
pub fn format_summary(report: &StudyReport) -> String {
    let mut out = String::with_capacity(256);

    match report.data_type {
        DataType::Recent => {
            for recent in &report.recent {
                out.push_str(&recent.to_string());
                out.push('\n');
            }
        }
        DataType::Random | DataType::Historical => {
            out.push_str(&format!(
                "{} study {} to {}: {} symbols, {} of {} events evaluated\n",
                report.data_type,
                report.start,
                report.end,
                report.symbols_analyzed,
                report.returns.len(),
                report.events_planned,
            ));
            out.push_str(&inflection_line(report));
            out.push('\n');
        }
    }

    if !report.failures.is_empty() {
        let symbols: Vec<&str> = report.failures.iter().map(|f| f.symbol.as_str()).collect();
        out.push_str(&format!(
            "{} symbols skipped: {}\n",
            symbols.len(),
            symbols.join(", ")
        ));
    }
    out
}
