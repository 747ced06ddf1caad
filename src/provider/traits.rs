use crate::model::{FetchError, Fundamentals, PriceSeries, Ticker};
use chrono::NaiveDate;

/// Source of daily OHLCV history.
#[cfg_attr(test, mockall::automock)]
pub trait PriceHistoryProvider {
    /// Daily bars for `ticker` between `start` and `end`, both inclusive.
    fn fetch_history(&self, ticker: &Ticker, start: NaiveDate, end: NaiveDate) -> Result<PriceSeries, FetchError>;
}

/// Source of company metadata.
#[cfg_attr(test, mockall::automock)]
pub trait FundamentalsProvider {
    fn fetch_fundamentals(&self, ticker: &Ticker) -> Result<Fundamentals, FetchError>;
}

impl<T: PriceHistoryProvider + ?Sized> PriceHistoryProvider for &T {
    fn fetch_history(&self, ticker: &Ticker, start: NaiveDate, end: NaiveDate) -> Result<PriceSeries, FetchError> {
        (**self).fetch_history(ticker, start, end)
    }
}

impl<T: FundamentalsProvider + ?Sized> FundamentalsProvider for &T {
    fn fetch_fundamentals(&self, ticker: &Ticker) -> Result<Fundamentals, FetchError> {
        (**self).fetch_fundamentals(ticker)
    }
}
