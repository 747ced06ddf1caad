use crate::config::ScreenerConfig;
use crate::model::{PriceSeries, YearlyLowInfo};
use chrono::{Duration, NaiveDate};
use tracing::debug;

/// Percent by which `current` sits above `low`.
pub fn percentage_above_low(current: f64, low: f64) -> f64 {
    (current - low) * 100.0 / low
}

/// Flags symbols trading close to their trailing yearly low.
#[derive(Debug, Clone)]
pub struct YearlyLowAnalyzer {
    threshold: f64,
    recent_days: i64,
}

impl YearlyLowAnalyzer {
    pub fn new(cfg: &ScreenerConfig) -> Self {
        Self {
            threshold: cfg.yearly_low_threshold,
            recent_days: cfg.recent_days,
        }
    }

    /// `series` is the trailing-year window. Returns `None` when either the year or the
    /// recent sub-window is empty, or the price is more than `threshold` percent above the low.
    pub fn analyze(&self, series: &PriceSeries, today: NaiveDate) -> Option<YearlyLowInfo> {
        let yearly_low = series
            .bars()
            .iter()
            .map(|b| b.low)
            .filter(|l| l.is_finite())
            .reduce(f64::min)?;
        if yearly_low <= 0.0 {
            debug!("[{}] non-positive yearly low {}", series.ticker(), yearly_low);
            return None;
        }

        let recent_start = today - Duration::days(self.recent_days);
        let Some(current) = series.since(recent_start).last() else {
            debug!("[{}] no bars since {}", series.ticker(), recent_start);
            return None;
        };
        let current_price = current.close;
        let pct = percentage_above_low(current_price, yearly_low);

        debug!(
            "[{}] Yearly Low: {:.2}, Current Price: {:.2}, Percentage Above Low: {:.2}%",
            series.ticker(),
            yearly_low,
            current_price,
            pct
        );

        (pct <= self.threshold).then_some(YearlyLowInfo {
            yearly_low,
            current_price,
            percentage_above_low: pct,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{PriceBar, Ticker};

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 12, d).unwrap()
    }

    fn bar(date: NaiveDate, low: f64, close: f64) -> PriceBar {
        PriceBar {
            date,
            open: close,
            high: close.max(low),
            low,
            close,
            adjusted_close: close,
            volume: 100.0,
        }
    }

    fn analyzer() -> YearlyLowAnalyzer {
        YearlyLowAnalyzer::new(&ScreenerConfig::default())
    }

    #[test]
    fn ten_percent_above_low_is_included_at_threshold() {
        assert_eq!(percentage_above_low(11.0, 10.0), 10.0);
        let series = PriceSeries::new(
            Ticker::new("LOW"),
            vec![bar(day(1), 10.0, 12.0), bar(day(10), 10.5, 11.0)],
        )
        .unwrap();

        let info = analyzer().analyze(&series, day(12)).unwrap();
        assert_eq!(info.yearly_low, 10.0);
        assert_eq!(info.current_price, 11.0);
        assert_eq!(info.percentage_above_low, 10.0);
    }

    #[test]
    fn far_above_low_is_excluded() {
        let series = PriceSeries::new(
            Ticker::new("HIGH"),
            vec![bar(day(1), 10.0, 12.0), bar(day(10), 14.0, 15.0)],
        )
        .unwrap();
        assert_eq!(analyzer().analyze(&series, day(12)), None);
    }

    #[test]
    fn no_recent_bars_is_none() {
        let series = PriceSeries::new(Ticker::new("OLD"), vec![bar(day(1), 10.0, 10.2)]).unwrap();
        assert_eq!(analyzer().analyze(&series, day(12)), None);
    }

    #[test]
    fn empty_series_is_none() {
        let series = PriceSeries::new(Ticker::new("NONE"), Vec::new()).unwrap();
        assert_eq!(analyzer().analyze(&series, day(12)), None);
    }
}
