// Blocking Yahoo Finance client for price history and company fundamentals
use crate::model::{FetchError, Fundamentals, PriceSeries, Ticker};
use crate::parser::{ChartParser, Parser, SummaryParser};
use crate::provider::traits::{FundamentalsProvider, PriceHistoryProvider};
use crate::utils::unix_midnight;
use chrono::{Duration, NaiveDate};
use reqwest::StatusCode;
use reqwest::blocking::Client;
use std::cell::RefCell;
use tracing::{debug, info};

const CHART_URL: &str = "https://query1.finance.yahoo.com/v8/finance/chart";
const SUMMARY_URL: &str = "https://query2.finance.yahoo.com/v10/finance/quoteSummary";
const COOKIE_URL: &str = "https://fc.yahoo.com";
const CRUMB_URL: &str = "https://query1.finance.yahoo.com/v1/test/getcrumb";
const SUMMARY_MODULES: &str = "price,summaryProfile,summaryDetail,defaultKeyStatistics,financialData";

pub struct YahooClient {
    client: Client,
    crumb: RefCell<Option<String>>,
}

impl YahooClient {
    pub fn new(timeout_secs: u64) -> Result<Self, FetchError> {
        let client = Client::builder()
            .user_agent("Mozilla/5.0 (Windows NT 10.0; Win64; x64) SwingScreener/0.1")
            .timeout(std::time::Duration::from_secs(timeout_secs))
            .cookie_store(true)
            .build()?;

        Ok(Self {
            client,
            crumb: RefCell::new(None),
        })
    }

    /// The quoteSummary endpoint only answers with a session cookie plus the matching crumb.
    fn crumb(&self) -> Result<String, FetchError> {
        if let Some(crumb) = self.crumb.borrow().as_ref() {
            return Ok(crumb.clone());
        }

        // fc.yahoo.com answers 404 but still sets the session cookie
        if let Err(e) = self.client.get(COOKIE_URL).send() {
            debug!("Cookie handshake with {} failed: {}", COOKIE_URL, e);
        }

        let response = self.client.get(CRUMB_URL).send()?;
        if !response.status().is_success() {
            return Err(FetchError::Status(response.status().as_u16()));
        }
        let crumb = response.text()?.trim().to_string();
        if crumb.is_empty() || crumb.contains('<') {
            return Err(FetchError::Decode("crumb endpoint returned no crumb".into()));
        }
        info!("Obtained Yahoo session crumb");
        *self.crumb.borrow_mut() = Some(crumb.clone());
        Ok(crumb)
    }
}

impl PriceHistoryProvider for YahooClient {
    fn fetch_history(&self, ticker: &Ticker, start: NaiveDate, end: NaiveDate) -> Result<PriceSeries, FetchError> {
        let url = format!("{}/{}", CHART_URL, ticker);
        // period2 is exclusive, so step past the end date to keep it inclusive
        let period1 = unix_midnight(start);
        let period2 = unix_midnight(end + Duration::days(1));
        debug!("GET {} [{} .. {}]", url, start, end);

        let response = self
            .client
            .get(&url)
            .query(&[
                ("period1", period1.to_string()),
                ("period2", period2.to_string()),
                ("interval", "1d".to_string()),
                ("events", "history".to_string()),
                ("includeAdjustedClose", "true".to_string()),
            ])
            .send()?;

        match response.status() {
            StatusCode::NOT_FOUND => return Err(FetchError::NoData),
            status if !status.is_success() => return Err(FetchError::Status(status.as_u16())),
            _ => {}
        }

        let body = response.text()?;
        ChartParser::new(ticker.clone()).parse(&body)
    }
}

impl FundamentalsProvider for YahooClient {
    fn fetch_fundamentals(&self, ticker: &Ticker) -> Result<Fundamentals, FetchError> {
        let crumb = self.crumb()?;
        let url = format!("{}/{}", SUMMARY_URL, ticker);
        debug!("GET {}", url);

        let response = self
            .client
            .get(&url)
            .query(&[("modules", SUMMARY_MODULES), ("crumb", crumb.as_str())])
            .send()?;

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED {
            // Stale crumb; the next symbol renegotiates it
            self.crumb.borrow_mut().take();
        }
        if status == StatusCode::NOT_FOUND {
            return Err(FetchError::NoData);
        }
        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()));
        }

        let body = response.text()?;
        SummaryParser::new().parse(&body)
    }
}
