// Yahoo chart payload -> PriceSeries
use crate::model::{FetchError, PriceBar, PriceSeries, Ticker};
use crate::parser::Parser;
use crate::utils::trading_date;
use serde::Deserialize;
use tracing::debug;

#[derive(Debug, Deserialize)]
struct ChartEnvelope {
    chart: ChartBody,
}

#[derive(Debug, Deserialize)]
struct ChartBody {
    result: Option<Vec<ChartResult>>,
    error: Option<ChartError>,
}

#[derive(Debug, Deserialize)]
struct ChartError {
    code: String,
    description: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ChartResult {
    meta: Option<ChartMeta>,
    #[serde(default)]
    timestamp: Vec<i64>,
    indicators: Option<ChartIndicators>,
}

#[derive(Debug, Deserialize)]
struct ChartMeta {
    #[serde(default)]
    gmtoffset: i64,
}

#[derive(Debug, Default, Deserialize)]
struct ChartIndicators {
    #[serde(default)]
    quote: Vec<QuoteColumns>,
    #[serde(default)]
    adjclose: Vec<AdjCloseColumn>,
}

#[derive(Debug, Default, Deserialize)]
struct QuoteColumns {
    #[serde(default)]
    open: Vec<Option<f64>>,
    #[serde(default)]
    high: Vec<Option<f64>>,
    #[serde(default)]
    low: Vec<Option<f64>>,
    #[serde(default)]
    close: Vec<Option<f64>>,
    #[serde(default)]
    volume: Vec<Option<f64>>,
}

#[derive(Debug, Default, Deserialize)]
struct AdjCloseColumn {
    #[serde(default)]
    adjclose: Vec<Option<f64>>,
}

/// Normalizes a chart response to exactly one OHLCV + adjusted-close column set.
///
/// Empty results and missing columns map to `FetchError::NoData`; anything that
/// is present but shaped unexpectedly (several results, several quote blocks,
/// columns of different lengths) maps to `FetchError::MalformedShape`.
/// Rows with a null in any column are dropped.
pub struct ChartParser {
    ticker: Ticker,
}

impl ChartParser {
    pub fn new(ticker: Ticker) -> Self {
        Self { ticker }
    }
}

impl Parser for ChartParser {
    type Output = PriceSeries;

    fn parse(&self, body: &str) -> Result<PriceSeries, FetchError> {
        let envelope: ChartEnvelope = serde_json::from_str(body)?;

        if let Some(err) = envelope.chart.error {
            debug!(
                "Chart error for {}: {} ({})",
                self.ticker,
                err.code,
                err.description.unwrap_or_default()
            );
            return Err(FetchError::NoData);
        }

        let mut results = envelope.chart.result.unwrap_or_default();
        let result = match results.len() {
            0 => return Err(FetchError::NoData),
            1 => results.remove(0),
            n => {
                return Err(FetchError::MalformedShape(format!("{} chart results, expected 1", n)));
            }
        };

        if result.timestamp.is_empty() {
            return Err(FetchError::NoData);
        }
        let gmt_offset = result.meta.map(|m| m.gmtoffset).unwrap_or_default();
        let indicators = result.indicators.unwrap_or_default();

        let quote = single_column_set(indicators.quote, "quote")?;
        let adj = single_column_set(indicators.adjclose, "adjclose")?;

        let rows = result.timestamp.len();
        let columns = [
            ("open", &quote.open),
            ("high", &quote.high),
            ("low", &quote.low),
            ("close", &quote.close),
            ("volume", &quote.volume),
            ("adjclose", &adj.adjclose),
        ];
        for (name, column) in columns {
            if column.is_empty() {
                return Err(FetchError::NoData);
            }
            if column.len() != rows {
                return Err(FetchError::MalformedShape(format!(
                    "column {} has {} values for {} timestamps",
                    name,
                    column.len(),
                    rows
                )));
            }
        }

        let mut bars: Vec<PriceBar> = Vec::with_capacity(rows);
        for (i, &ts) in result.timestamp.iter().enumerate() {
            let Some(date) = trading_date(ts, gmt_offset) else {
                continue;
            };
            let (Some(open), Some(high), Some(low), Some(close), Some(volume), Some(adjusted_close)) = (
                quote.open[i],
                quote.high[i],
                quote.low[i],
                quote.close[i],
                quote.volume[i],
                adj.adjclose[i],
            ) else {
                continue;
            };
            let bar = PriceBar { date, open, high, low, close, adjusted_close, volume };
            // A repeated date is the provider's intraday update of the same session
            match bars.last_mut() {
                Some(last) if last.date == date => *last = bar,
                _ => bars.push(bar),
            }
        }

        if bars.is_empty() {
            return Err(FetchError::NoData);
        }
        PriceSeries::new(self.ticker.clone(), bars)
    }
}

fn single_column_set<T>(mut sets: Vec<T>, name: &str) -> Result<T, FetchError> {
    match sets.len() {
        0 => Err(FetchError::NoData),
        1 => Ok(sets.remove(0)),
        n => Err(FetchError::MalformedShape(format!("{} {} blocks, expected 1", n, name))),
    }
}
