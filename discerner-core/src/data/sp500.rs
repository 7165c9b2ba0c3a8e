//! S&P 500 membership from Wikipedia.
//!
//! Pulls the wikitext of the constituents list through the MediaWiki parse API
//! and reads the first table: one row per company, a `{{NyseSymbol|T}}` or
//! `{{NasdaqSymbol|T}}` ticker cell followed by a `[[Company]]` link.

use super::provider::{DataError, PageSetProvider};
use crate::pages::PagePair;
use serde::Deserialize;
use std::time::Duration;

const PARSE_URL: &str = "https://en.wikipedia.org/w/api.php?action=parse\
    &page=List_of_S%26P_500_companies&prop=wikitext&format=json&formatversion=2";

#[derive(Debug, Deserialize)]
struct ParseResponse {
    parse: ParsedPage,
}

#[derive(Debug, Deserialize)]
struct ParsedPage {
    wikitext: String,
}

pub struct WikipediaSp500 {
    client: reqwest::blocking::Client,
}

impl WikipediaSp500 {
    pub fn new() -> Result<Self, DataError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(30))
            .user_agent(concat!("discerner/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| DataError::Client(e.to_string()))?;
        Ok(Self { client })
    }
}

impl PageSetProvider for WikipediaSp500 {
    fn name(&self) -> &str {
        "wikipedia_sp500"
    }

    fn fetch_pages(&self) -> Result<Vec<PagePair>, DataError> {
        tracing::debug!("fetching S&P 500 constituents");
        let resp = self
            .client
            .get(PARSE_URL)
            .send()
            .map_err(DataError::from_reqwest)?;
        let status = resp.status();
        if !status.is_success() {
            return Err(DataError::HttpStatus {
                provider: "wikipedia_sp500",
                status: status.as_u16(),
                subject: "List_of_S&P_500_companies".into(),
            });
        }
        let body = resp.text().map_err(DataError::from_reqwest)?;
        let parsed: ParseResponse = serde_json::from_str(&body)
            .map_err(|e| DataError::ResponseFormatChanged(format!("S&P 500 page: {e}")))?;

        let pages = parse_constituents(&parsed.parse.wikitext);
        if pages.is_empty() {
            return Err(DataError::ResponseFormatChanged(
                "no constituents found in S&P 500 table".into(),
            ));
        }
        Ok(pages)
    }
}

/// Extract (ticker, article) pairs from the first wikitable in `wikitext`.
///
/// Tickers use Yahoo's class-share notation (`BRK.B` becomes `BRK-B`).
pub fn parse_constituents(wikitext: &str) -> Vec<PagePair> {
    let Some(table_start) = wikitext.find("{|") else {
        return Vec::new();
    };
    let table = &wikitext[table_start..];
    let table = table.find("\n|}").map_or(table, |end| &table[..end]);

    table
        .split("\n|-")
        .filter_map(|row| {
            let symbol = ticker_cell(row)?;
            let after_symbol = &row[row.find("Symbol|")?..];
            let article = first_link(after_symbol)?;
            Some(PagePair::new(symbol.replace('.', "-"), article))
        })
        .collect()
}

fn ticker_cell(row: &str) -> Option<&str> {
    let start = row.find("Symbol|")? + "Symbol|".len();
    let rest = &row[start..];
    let end = rest.find("}}")?;
    let ticker = rest[..end].split('|').next()?.trim();
    (!ticker.is_empty()).then_some(ticker)
}

fn first_link(text: &str) -> Option<String> {
    let start = text.find("[[")? + 2;
    let rest = &text[start..];
    let end = rest.find("]]")?;
    let target = rest[..end].split('|').next()?.trim();
    (!target.is_empty()).then(|| target.replace(' ', "_"))
}
