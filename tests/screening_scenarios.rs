//! End-to-end screening runs against in-memory providers.

use calamine::{Reader, Xlsx, open_workbook};
use chrono::{Duration, NaiveDate};
use pretty_assertions::assert_eq;
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use swing_screener::normalizer::read_tickers;
use swing_screener::provider::{FundamentalsProvider, PriceHistoryProvider};
use swing_screener::report::{COLUMNS, render_row, write_workbook};
use swing_screener::{FetchError, Fundamentals, PriceBar, PriceSeries, Screener, ScreenerConfig, Ticker};

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 12, 12).unwrap()
}

/// Serves the same closes for every window of a known symbol, `NoData` otherwise.
struct StaticPrices {
    closes: HashMap<String, Vec<f64>>,
}

impl PriceHistoryProvider for StaticPrices {
    fn fetch_history(&self, ticker: &Ticker, _start: NaiveDate, end: NaiveDate) -> Result<PriceSeries, FetchError> {
        let closes = self.closes.get(ticker.as_str()).ok_or(FetchError::NoData)?;
        let first = end - Duration::days(closes.len() as i64 - 1);
        let bars = closes
            .iter()
            .enumerate()
            .map(|(i, &c)| PriceBar {
                date: first + Duration::days(i as i64),
                open: c,
                high: c,
                low: c,
                close: c,
                adjusted_close: c,
                volume: 1_000_000.0,
            })
            .collect();
        PriceSeries::new(ticker.clone(), bars)
    }
}

struct FailingFundamentals;

impl FundamentalsProvider for FailingFundamentals {
    fn fetch_fundamentals(&self, _ticker: &Ticker) -> Result<Fundamentals, FetchError> {
        Err(FetchError::Http("connection refused".into()))
    }
}

fn read_sheet(path: &Path) -> Vec<Vec<String>> {
    let mut workbook: Xlsx<_> = open_workbook(path).unwrap();
    let range = workbook.worksheet_range("Sheet1").unwrap();
    range
        .rows()
        .map(|row| row.iter().map(|cell| cell.to_string()).collect())
        .collect()
}

fn header_row() -> Vec<String> {
    COLUMNS.iter().map(|c| c.to_string()).collect()
}

/// Gently rising closes in the default 2..20 price band with an accelerating finish,
/// so RSI stays below 70 and the MACD histogram ends positive.
fn swing_setup() -> Vec<f64> {
    let mut closes: Vec<f64> = (0..60)
        .map(|i| 10.0 + (if i % 2 == 0 { 0.0 } else { 0.4 }) + (i as f64) * 0.01)
        .collect();
    let n = closes.len();
    closes[n - 1] += 0.3;
    closes
}

#[test]
fn empty_price_history_yields_header_only_workbook() {
    let dir = tempfile::tempdir().unwrap();
    let tickers_path = dir.path().join("tickers.txt");
    fs::write(&tickers_path, "AAPL\n").unwrap();
    let output = dir.path().join("candidate_data.xlsx");

    let tickers = read_tickers(&tickers_path).unwrap();
    let prices = StaticPrices {
        closes: HashMap::new(),
    };
    let screener = Screener::new(&ScreenerConfig::default(), prices, FailingFundamentals);
    let candidates = screener.run(&tickers, today());
    assert!(candidates.is_empty());

    write_workbook(&output, &candidates).unwrap();
    assert_eq!(read_sheet(&output), vec![header_row()]);
}

#[test]
fn failed_fundamentals_still_reports_candidate() {
    let prices = StaticPrices {
        closes: HashMap::from([("SWNG".to_string(), swing_setup())]),
    };
    let screener = Screener::new(&ScreenerConfig::default(), prices, FailingFundamentals);
    let candidates = screener.run(&[Ticker::new("SWNG")], today());

    assert_eq!(candidates.len(), 1);
    let record = &candidates[0];
    let rsi = record.technicals.rsi;
    assert!(rsi > 27.0 && rsi < 70.0, "rsi {}", rsi);
    assert!(record.technicals.macd_histogram > 0.0);
    assert!(record.stable);

    let row = render_row(record);
    assert_eq!(&row[11..16], &["N/A", "N/A", "N/A", "N/A", "N/A"]);
    assert_eq!(row[19], "Stable");
}

#[test]
fn workbook_round_trips_rendered_rows() {
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("candidate_data.xlsx");
    let prices = StaticPrices {
        closes: HashMap::from([
            ("SWNG".to_string(), swing_setup()),
            ("FLAT".to_string(), vec![10.0; 60]),
        ]),
    };
    let screener = Screener::new(&ScreenerConfig::default(), prices, FailingFundamentals);
    let tickers = [Ticker::new("SWNG"), Ticker::new("FLAT"), Ticker::new("SWNG")];
    let candidates = screener.run(&tickers, today());
    assert_eq!(candidates.len(), 2);

    write_workbook(&output, &candidates).unwrap();

    let mut expected = vec![header_row()];
    expected.extend(candidates.iter().map(render_row));
    assert_eq!(read_sheet(&output), expected);
}

#[test]
fn missing_ticker_file_is_fatal() {
    let dir = tempfile::tempdir().unwrap();
    let err = read_tickers(&dir.path().join("tickers.txt")).unwrap_err();
    assert!(err.to_string().contains("not found"));
}
