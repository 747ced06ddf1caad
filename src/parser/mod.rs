// Provider payload adapters: raw JSON in, validated domain types out.

pub mod chart_parser;
pub mod summary_parser;

pub use chart_parser::ChartParser;
pub use summary_parser::SummaryParser;

use crate::model::FetchError;

pub trait Parser {
    type Output;

    fn parse(&self, body: &str) -> Result<Self::Output, FetchError>;
}
