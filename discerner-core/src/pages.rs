//! Page sets: which (symbol, topic) pairs a study covers.
//!
//! A page set is either a named provider (built-in financial topics, the
//! S&P 500 membership table) or a literal list of `SYMBOL:Topic` pairs. The
//! choice is made once at argument parsing; nothing downstream inspects it.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Benchmark every financial-topic page is priced against.
pub const FINANCIALS_BENCHMARK: &str = "SPY";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PageError {
    #[error("expected SYMBOL:Topic, got '{0}'")]
    MalformedPair(String),

    #[error("no pages to analyze")]
    Empty,
}

/// One symbol and the wiki topic whose attention is tracked for it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PagePair {
    pub symbol: String,
    pub topic: String,
}

impl PagePair {
    pub fn new(symbol: impl Into<String>, topic: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
            topic: topic.into(),
        }
    }
}

impl FromStr for PagePair {
    type Err = PageError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (symbol, topic) = s
            .split_once(':')
            .ok_or_else(|| PageError::MalformedPair(s.to_string()))?;
        let (symbol, topic) = (symbol.trim(), topic.trim());
        if symbol.is_empty() || topic.is_empty() {
            return Err(PageError::MalformedPair(s.to_string()));
        }
        Ok(Self::new(symbol, topic))
    }
}

impl fmt::Display for PagePair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.symbol, self.topic)
    }
}

/// Named page-set providers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NamedPages {
    /// Built-in list of general finance topics, priced against the benchmark.
    Financials,
    /// S&P 500 members, each priced against its own ticker.
    Sp500,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum PageSource {
    Named(NamedPages),
    Literal(Vec<PagePair>),
}

impl PageSource {
    /// Parse literal `SYMBOL:Topic` arguments.
    pub fn literal<S: AsRef<str>>(raw: &[S]) -> Result<Self, PageError> {
        if raw.is_empty() {
            return Err(PageError::Empty);
        }
        let pairs = raw
            .iter()
            .map(|s| s.as_ref().parse())
            .collect::<Result<Vec<PagePair>, _>>()?;
        Ok(Self::Literal(pairs))
    }
}

/// A page ready for analysis: what to price and which topic to watch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageTarget {
    /// Label the page is reported under.
    pub symbol: String,
    pub topic: String,
    /// Ticker whose prices the events are measured against.
    pub price_symbol: String,
}

impl PageTarget {
    pub fn own_ticker(pair: PagePair) -> Self {
        Self {
            price_symbol: pair.symbol.clone(),
            symbol: pair.symbol,
            topic: pair.topic,
        }
    }

    pub fn against(pair: PagePair, benchmark: &str) -> Self {
        Self {
            symbol: pair.symbol,
            topic: pair.topic,
            price_symbol: benchmark.to_string(),
        }
    }
}

/// Financial topic pages, keyed by a display label.
pub fn financial_pages() -> Vec<PagePair> {
    [
        ("Arrangements between railroads", "Arrangements_between_railroads"),
        ("Asset", "Asset"),
        ("Black-Scholes", "Black–Scholes_model"),
        ("Bond", "Bond_(finance)"),
        ("Brokerage", "Brokerage_firm"),
        ("Bubble", "Stock_market_bubble"),
        ("Bucket shop", "Bucket_shop_(stock_market)"),
        ("Business Cycle", "Business_cycle"),
        ("Buying in", "Buying_in_(securities)"),
        ("Call option", "Call_option"),
        ("Capital Market", "Capital_market"),
        ("Car loan", "Car_finance"),
        ("Cash", "Cash"),
        ("Concentrated stock", "Concentrated_stock"),
        ("Coupon", "Coupon_(finance)"),
        ("Derivative", "Derivative_(finance)"),
        ("Dividend", "Dividend"),
        ("Dow Industrials", "Dow_Jones_Industrial_Average"),
        ("Economics", "Economics"),
        ("Equity investment", "Equity_investment"),
        ("Finance", "Finance"),
        ("Financial Advisor", "Financial_adviser"),
        ("Financial Crisis", "Financial_crisis"),
        ("Financial Planner", "Financial_planner"),
        ("Financial Institution", "Financial_institution"),
        ("Futures", "Futures_contract"),
        ("GICS", "Global_Industry_Classification_Standard"),
        ("Golden share", "Golden_share"),
        ("House stock", "House_stock"),
        ("Insider Trading", "Insider_trading"),
        ("Interest Rate", "Interest_rate"),
        ("Investment", "Investment"),
        ("Investment Banking", "Investment_banking"),
        ("Joint Stock Company", "Joint-stock_company"),
        ("Long", "Long_(finance)"),
        ("Money Managers", "Category:Money_managers"),
        ("Mutual Funds", "Mutual_fund"),
        ("Mortgage loan", "Mortgage_loan"),
        ("NASDAQ", "Nasdaq"),
        ("Options", "Option_(finance)"),
        ("Personal Finance", "Personal_finance"),
        ("Penny Stocks", "Penny_stock"),
        ("Portfolio Manager", "Portfolio_manager"),
        ("Put option", "Put_option"),
        ("Real Estate", "Real_estate"),
        ("Refinancing", "Refinancing"),
        ("S&P 500", "S&P_500"),
        ("Scripophily", "Scripophily"),
        ("Security", "Security_(finance)"),
        ("Share", "Share_(finance)"),
        ("Short", "Short_(finance)"),
        ("Speculation", "Speculation"),
        ("Stock", "Stock"),
        ("Stock broker", "Stockbroker"),
        ("Stock Dilution", "Stock_dilution"),
        ("Stock Market", "Stock_market"),
        ("Strike Price", "Strike_price"),
        ("Student loan", "Student_loan"),
        ("Swap", "Swap_(finance)"),
    ]
    .into_iter()
    .map(|(label, topic)| PagePair::new(label, topic))
    .collect()
}
