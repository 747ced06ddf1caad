// Per-ticker screening: technicals, yearly low, fundamentals, merged into CandidateRecords
use crate::analyzer::{IndicatorEngine, TechnicalScreener, YearlyLowAnalyzer, is_stable};
use crate::config::ScreenerConfig;
use crate::model::{CandidateRecord, FetchError, Fundamentals, IndicatorError, IndicatorSnapshot, Ticker, YearlyLowInfo};
use crate::provider::{FundamentalsProvider, PriceHistoryProvider};
use crate::utils::lookback_window;
use chrono::NaiveDate;
use tracing::{debug, info, warn};

/// Runs every ticker through the analyzers, one at a time.
///
/// No per-symbol failure escapes `run`: fetch and compute errors are logged and
/// the affected component simply yields nothing for that symbol.
pub struct Screener<P, F> {
    prices: P,
    fundamentals: F,
    engine: IndicatorEngine,
    technical: TechnicalScreener,
    yearly_low: YearlyLowAnalyzer,
    technical_lookback_days: i64,
    yearly_lookback_days: i64,
}

impl<P: PriceHistoryProvider, F: FundamentalsProvider> Screener<P, F> {
    pub fn new(cfg: &ScreenerConfig, prices: P, fundamentals: F) -> Self {
        Self {
            prices,
            fundamentals,
            engine: IndicatorEngine::new(cfg),
            technical: TechnicalScreener::new(cfg),
            yearly_low: YearlyLowAnalyzer::new(cfg),
            technical_lookback_days: cfg.technical_lookback_days,
            yearly_lookback_days: cfg.yearly_lookback_days,
        }
    }

    /// Candidates in input order; duplicated tickers are screened twice.
    pub fn run(&self, tickers: &[Ticker], today: NaiveDate) -> Vec<CandidateRecord> {
        let candidates: Vec<CandidateRecord> = tickers
            .iter()
            .filter_map(|ticker| self.process_ticker(ticker, today))
            .collect();
        info!("Screened {} tickers, {} candidates", tickers.len(), candidates.len());
        candidates
    }

    pub fn process_ticker(&self, ticker: &Ticker, today: NaiveDate) -> Option<CandidateRecord> {
        debug!("Processing {}", ticker);
        let technicals = self.screen_technicals(ticker, today);
        // Yearly low runs for every symbol; it is dropped below if technicals failed
        let yearly_low = self.analyze_yearly_low(ticker, today);

        let technicals = technicals?;
        let fundamentals = self.fetch_fundamentals(ticker);
        let stable = fundamentals.as_ref().is_none_or(is_stable);

        Some(CandidateRecord {
            ticker: ticker.clone(),
            technicals,
            fundamentals,
            stable,
            yearly_low,
        })
    }

    /// Latest indicator snapshot when it passes every technical condition.
    pub fn screen_technicals(&self, ticker: &Ticker, today: NaiveDate) -> Option<IndicatorSnapshot> {
        let (start, end) = lookback_window(today, self.technical_lookback_days);
        let series = match self.prices.fetch_history(ticker, start, end) {
            Ok(series) => series,
            Err(FetchError::NoData) => {
                info!("No data for {}", ticker);
                return None;
            }
            Err(e) => {
                warn!("Error - {}: {}", ticker, e);
                return None;
            }
        };

        let snapshot = match self.engine.snapshot(&series) {
            Ok(snapshot) => snapshot,
            Err(e @ IndicatorError::InsufficientHistory { .. }) => {
                info!("No usable data for {}: {}", ticker, e);
                return None;
            }
            Err(e) => {
                warn!("Error - {}: {}", ticker, e);
                return None;
            }
        };

        match self.technical.evaluate(&snapshot) {
            Ok(()) => {
                info!("{} passed technical screen (close {:.2}, RSI {:.2})", ticker, snapshot.close, snapshot.rsi);
                Some(snapshot)
            }
            Err(rejection) => {
                debug!("{} rejected: {}", ticker, rejection);
                None
            }
        }
    }

    pub fn analyze_yearly_low(&self, ticker: &Ticker, today: NaiveDate) -> Option<YearlyLowInfo> {
        let (start, end) = lookback_window(today, self.yearly_lookback_days);
        match self.prices.fetch_history(ticker, start, end) {
            Ok(series) => self.yearly_low.analyze(&series, today),
            Err(FetchError::NoData) => {
                info!("No yearly data for {}", ticker);
                None
            }
            Err(e) => {
                warn!("Error analyzing {}: {}", ticker, e);
                None
            }
        }
    }

    /// Best effort: a failed fetch is logged and leaves the record without fundamentals.
    pub fn fetch_fundamentals(&self, ticker: &Ticker) -> Option<Fundamentals> {
        match self.fundamentals.fetch_fundamentals(ticker) {
            Ok(f) => Some(f),
            Err(e) => {
                warn!("Error fetching data - {}: {}", ticker, e);
                None
            }
        }
    }
}
