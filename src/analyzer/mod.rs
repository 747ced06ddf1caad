// Analyzer module: indicator math plus the three per-symbol evaluators.

pub mod indicators;
pub mod stability;
pub mod technical;
pub mod yearly_low;

pub use indicators::IndicatorEngine;
pub use stability::is_stable;
pub use technical::TechnicalScreener;
pub use yearly_low::YearlyLowAnalyzer;
