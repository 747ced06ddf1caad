// Core structs: Ticker, PriceSeries, snapshots, CandidateRecord, error types
use chrono::NaiveDate;
use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Uppercase exchange symbol, e.g. `AAPL`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Ticker(String);

impl Ticker {
    /// Builds a ticker from an already-normalized symbol.
    /// Use `normalizer::normalize_symbol` for raw input lines.
    pub fn new(symbol: impl Into<String>) -> Self {
        Self(symbol.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Ticker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One trading day of OHLCV data.
#[derive(Debug, Clone, PartialEq)]
pub struct PriceBar {
    pub date: NaiveDate,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub adjusted_close: f64,
    pub volume: f64,
}

/// Daily bars for one symbol over one query window, oldest first.
#[derive(Debug, Clone)]
pub struct PriceSeries {
    ticker: Ticker,
    bars: Vec<PriceBar>,
}

impl PriceSeries {
    /// Creates a series, rejecting bars whose dates are not strictly increasing.
    pub fn new(ticker: Ticker, bars: Vec<PriceBar>) -> Result<Self, FetchError> {
        if let Some(pair) = bars.windows(2).find(|w| w[1].date <= w[0].date) {
            return Err(FetchError::MalformedShape(format!(
                "bar dates out of order: {} followed by {}",
                pair[0].date, pair[1].date
            )));
        }
        Ok(Self { ticker, bars })
    }

    pub fn ticker(&self) -> &Ticker {
        &self.ticker
    }

    pub fn bars(&self) -> &[PriceBar] {
        &self.bars
    }

    pub fn len(&self) -> usize {
        self.bars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    pub fn latest(&self) -> Option<&PriceBar> {
        self.bars.last()
    }

    /// Bars dated on or after `start`.
    pub fn since(&self, start: NaiveDate) -> &[PriceBar] {
        let idx = self.bars.partition_point(|b| b.date < start);
        &self.bars[idx..]
    }

    pub fn adjusted_closes(&self) -> Vec<f64> {
        self.bars.iter().map(|b| b.adjusted_close).collect()
    }

    pub fn volumes(&self) -> Vec<f64> {
        self.bars.iter().map(|b| b.volume).collect()
    }
}

/// Indicator values at the latest bar of a series.
#[derive(Debug, Clone, PartialEq)]
pub struct IndicatorSnapshot {
    pub date: NaiveDate,
    pub close: f64,
    pub volume: f64,
    pub rsi: f64,
    pub ema: f64,
    pub macd: f64,
    pub macd_signal: f64,
    pub macd_histogram: f64,
    pub avg_volume: f64,
    /// `None` when the trailing average volume is zero.
    pub rel_volume: Option<f64>,
}

/// Company metadata as reported by the fundamentals provider.
/// Every field is optional; defaults are applied where the value is consumed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Fundamentals {
    pub name: Option<String>,
    pub sector: Option<String>,
    pub market_cap: Option<i64>,
    pub pe_ratio: Option<f64>,
    pub net_income: Option<i64>,
    pub revenue_growth: Option<f64>,
    pub debt_to_equity: Option<f64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct YearlyLowInfo {
    pub yearly_low: f64,
    pub current_price: f64,
    pub percentage_above_low: f64,
}

/// A symbol that passed the technical screen, enriched with whatever else was available.
#[derive(Debug, Clone, PartialEq)]
pub struct CandidateRecord {
    pub ticker: Ticker,
    pub technicals: IndicatorSnapshot,
    /// `None` when the fundamentals fetch failed.
    pub fundamentals: Option<Fundamentals>,
    pub stable: bool,
    pub yearly_low: Option<YearlyLowInfo>,
}

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("http error: {0}")]
    Http(String),
    #[error("provider returned status {0}")]
    Status(u16),
    #[error("no data")]
    NoData,
    #[error("unexpected payload shape: {0}")]
    MalformedShape(String),
    #[error("failed to decode payload: {0}")]
    Decode(String),
}

impl From<reqwest::Error> for FetchError {
    fn from(e: reqwest::Error) -> Self {
        FetchError::Http(e.to_string())
    }
}

impl From<serde_json::Error> for FetchError {
    fn from(e: serde_json::Error) -> Self {
        FetchError::Decode(e.to_string())
    }
}

#[derive(Debug, Error)]
pub enum IndicatorError {
    #[error("insufficient history: need {needed} bars, have {available}")]
    InsufficientHistory { needed: usize, available: usize },
    #[error("adjusted close is not a finite series at {0}")]
    NonFiniteInput(NaiveDate),
}

#[derive(Debug, Error)]
pub enum TickerError {
    #[error("ticker file not found: {0}")]
    MissingInput(PathBuf),
    #[error("failed to read ticker file {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("failed to create output directory {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("spreadsheet error: {0}")]
    Xlsx(#[from] rust_xlsxwriter::XlsxError),
}
