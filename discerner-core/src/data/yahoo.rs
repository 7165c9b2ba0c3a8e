//! Yahoo Finance price provider.
//!
//! Fetches daily adjusted closes from Yahoo's v8 chart API and lays them onto
//! a calendar-daily [`PriceSeries`]. Days Yahoo does not report, and days it
//! reports with a null close, become gaps.
//!
//! Yahoo Finance has no official API and is subject to unannounced format
//! changes; parse failures surface as `ResponseFormatChanged`.

use super::provider::{DataError, PriceProvider};
use crate::domain::PriceSeries;
use chrono::NaiveDate;
use serde::Deserialize;
use std::time::Duration;

/// Yahoo Finance v8 chart API response.
#[derive(Debug, Deserialize)]
struct ChartResponse {
    chart: ChartResult,
}

#[derive(Debug, Deserialize)]
struct ChartResult {
    result: Option<Vec<ChartData>>,
    error: Option<ChartError>,
}

#[derive(Debug, Deserialize)]
struct ChartError {
    code: String,
    description: String,
}

#[derive(Debug, Deserialize)]
struct ChartData {
    timestamp: Option<Vec<i64>>,
    indicators: Indicators,
}

#[derive(Debug, Deserialize)]
struct Indicators {
    quote: Vec<QuoteData>,
    adjclose: Option<Vec<AdjCloseData>>,
}

#[derive(Debug, Deserialize)]
struct QuoteData {
    close: Vec<Option<f64>>,
}

#[derive(Debug, Deserialize)]
struct AdjCloseData {
    adjclose: Vec<Option<f64>>,
}

pub struct YahooProvider {
    client: reqwest::blocking::Client,
}

impl YahooProvider {
    pub fn new() -> Result<Self, DataError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(30))
            .user_agent("Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36")
            .build()
            .map_err(|e| DataError::Client(e.to_string()))?;
        Ok(Self { client })
    }

    /// Build the chart API URL for a symbol and date range.
    fn chart_url(symbol: &str, start: NaiveDate, end: NaiveDate) -> String {
        let start_ts = start.and_time(chrono::NaiveTime::MIN).and_utc().timestamp();
        let end_ts = end.and_time(chrono::NaiveTime::MIN).and_utc().timestamp() + 86_399;
        format!(
            "https://query2.finance.yahoo.com/v8/finance/chart/{symbol}\
             ?period1={start_ts}&period2={end_ts}&interval=1d\
             &includeAdjustedClose=true"
        )
    }

    /// Parse a chart API payload into dated adjusted closes.
    ///
    /// Falls back to the raw close when Yahoo omits the adjusted series.
    fn parse_response(symbol: &str, body: &str) -> Result<Vec<(NaiveDate, f64)>, DataError> {
        let resp: ChartResponse = serde_json::from_str(body).map_err(|e| {
            DataError::ResponseFormatChanged(format!("failed to parse response for {symbol}: {e}"))
        })?;

        let result = resp.chart.result.ok_or_else(|| match resp.chart.error {
            Some(err) if err.code == "Not Found" => DataError::SymbolNotFound {
                symbol: symbol.to_string(),
            },
            Some(err) => {
                DataError::ResponseFormatChanged(format!("{}: {}", err.code, err.description))
            }
            None => DataError::ResponseFormatChanged("empty result with no error".into()),
        })?;

        let data = result
            .into_iter()
            .next()
            .ok_or_else(|| DataError::ResponseFormatChanged("result array is empty".into()))?;

        let timestamps = data
            .timestamp
            .ok_or_else(|| DataError::ResponseFormatChanged("no timestamps".into()))?;

        let closes = match data.indicators.adjclose.and_then(|v| v.into_iter().next()) {
            Some(adj) => adj.adjclose,
            None => {
                data.indicators
                    .quote
                    .into_iter()
                    .next()
                    .ok_or_else(|| DataError::ResponseFormatChanged("no quote data".into()))?
                    .close
            }
        };

        let mut observations = Vec::with_capacity(timestamps.len());
        for (i, &ts) in timestamps.iter().enumerate() {
            let date = chrono::DateTime::from_timestamp(ts, 0)
                .map(|dt| dt.naive_utc().date())
                .ok_or_else(|| {
                    DataError::ResponseFormatChanged(format!("invalid timestamp: {ts}"))
                })?;
            if let Some(price) = closes.get(i).copied().flatten() {
                observations.push((date, price));
            }
        }

        if observations.is_empty() {
            return Err(DataError::SymbolNotFound {
                symbol: symbol.to_string(),
            });
        }
        Ok(observations)
    }
}

impl PriceProvider for YahooProvider {
    fn name(&self) -> &str {
        "yahoo_finance"
    }

    fn fetch_prices(
        &self,
        symbol: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<PriceSeries, DataError> {
        let url = Self::chart_url(symbol, start, end);
        tracing::info!(symbol, %start, %end, "downloading price data");

        let resp = self
            .client
            .get(&url)
            .send()
            .map_err(DataError::from_reqwest)?;

        let status = resp.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(DataError::SymbolNotFound {
                symbol: symbol.to_string(),
            });
        }
        if !status.is_success() {
            return Err(DataError::HttpStatus {
                provider: "yahoo_finance",
                status: status.as_u16(),
                subject: symbol.to_string(),
            });
        }

        let body = resp.text().map_err(DataError::from_reqwest)?;
        let observations = Self::parse_response(symbol, &body)?;
        Ok(PriceSeries::from_observations(start, end, observations))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CHART: &str = r#"{
        "chart": {
            "result": [{
                "timestamp": [1704205800, 1704292200, 1704378600],
                "indicators": {
                    "quote": [{"close": [472.65, 468.79, null]}],
                    "adjclose": [{"adjclose": [465.10, 461.30, null]}]
                }
            }],
            "error": null
        }
    }"#;

    #[test]
    fn parses_adjusted_closes() {
        let obs = YahooProvider::parse_response("SPY", CHART).unwrap();
        assert_eq!(obs.len(), 2);
        assert_eq!(obs[0], (NaiveDate::from_ymd_opt(2024, 1, 2).unwrap(), 465.10));
        assert_eq!(obs[1].1, 461.30);
    }

    #[test]
    fn falls_back_to_raw_close() {
        let body = r#"{"chart": {"result": [{
            "timestamp": [1704205800],
            "indicators": {"quote": [{"close": [472.65]}]}
        }], "error": null}}"#;
        let obs = YahooProvider::parse_response("SPY", body).unwrap();
        assert_eq!(obs[0].1, 472.65);
    }

    #[test]
    fn not_found_maps_to_symbol_error() {
        let body = r#"{"chart": {"result": null,
            "error": {"code": "Not Found", "description": "No data found"}}}"#;
        let err = YahooProvider::parse_response("NOPE", body).unwrap_err();
        assert!(matches!(err, DataError::SymbolNotFound { .. }));
    }

    #[test]
    fn garbage_is_format_change() {
        let err = YahooProvider::parse_response("SPY", "<html>").unwrap_err();
        assert!(matches!(err, DataError::ResponseFormatChanged(_)));
    }

    #[test]
    fn observations_land_on_calendar_grid() {
        let obs = YahooProvider::parse_response("SPY", CHART).unwrap();
        let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let end = NaiveDate::from_ymd_opt(2024, 1, 5).unwrap();
        let series = PriceSeries::from_observations(start, end, obs);

        assert_eq!(series.len(), 5);
        assert!(series.is_gap(0)); // New Year's Day
        assert_eq!(series.price(1), Some(465.10));
        assert_eq!(series.price(2), Some(461.30));
        assert!(series.is_gap(3)); // null close
    }
}
