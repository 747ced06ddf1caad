pub mod traits;
pub mod yahoo;

pub use traits::{FundamentalsProvider, PriceHistoryProvider};
pub use yahoo::YahooClient;
