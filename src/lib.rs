//! Swing screener: filters a ticker list on RSI, MACD, price and volume, enriches
//! the survivors with fundamentals and 52-week-low data, and writes a report.

pub mod analyzer;
pub mod config;
pub mod model;
pub mod normalizer;
pub mod parser;
pub mod pipeline;
pub mod provider;
pub mod report;
pub mod utils;

pub use config::{ScreenerConfig, load_config};
pub use model::{CandidateRecord, FetchError, Fundamentals, IndicatorSnapshot, PriceBar, PriceSeries, Ticker};
pub use pipeline::Screener;
