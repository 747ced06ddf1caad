use crate::config::ScreenerConfig;
use crate::model::IndicatorSnapshot;
use std::fmt;

/// First condition a snapshot failed.
#[derive(Debug, Clone, PartialEq)]
pub enum Rejection {
    Rsi(f64),
    Price(f64),
    AvgVolume(f64),
    RelVolume(Option<f64>),
    MacdHistogram(f64),
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rejection::Rsi(v) => write!(f, "RSI {:.2} outside band", v),
            Rejection::Price(v) => write!(f, "price {:.2} outside band", v),
            Rejection::AvgVolume(v) => write!(f, "average volume {:.0} too low", v),
            Rejection::RelVolume(Some(v)) => write!(f, "relative volume {:.2} too low", v),
            Rejection::RelVolume(None) => write!(f, "relative volume undefined (zero average volume)"),
            Rejection::MacdHistogram(v) => write!(f, "MACD histogram {:.4} not positive", v),
        }
    }
}

/// Threshold predicate over the latest indicator values. All bounds are strict.
#[derive(Debug, Clone)]
pub struct TechnicalScreener {
    rsi_min: f64,
    rsi_max: f64,
    price_min: f64,
    price_max: f64,
    avg_vol_min: f64,
    relative_vol_min: f64,
}

impl TechnicalScreener {
    pub fn new(cfg: &ScreenerConfig) -> Self {
        Self {
            rsi_min: cfg.rsi_min,
            rsi_max: cfg.rsi_max,
            price_min: cfg.price_min,
            price_max: cfg.price_max,
            avg_vol_min: cfg.avg_vol_min,
            relative_vol_min: cfg.relative_vol_min,
        }
    }

    pub fn evaluate(&self, snap: &IndicatorSnapshot) -> Result<(), Rejection> {
        if !(self.rsi_min < snap.rsi && snap.rsi < self.rsi_max) {
            return Err(Rejection::Rsi(snap.rsi));
        }
        if !(self.price_min < snap.close && snap.close < self.price_max) {
            return Err(Rejection::Price(snap.close));
        }
        if !(snap.avg_volume > self.avg_vol_min) {
            return Err(Rejection::AvgVolume(snap.avg_volume));
        }
        match snap.rel_volume {
            Some(rel) if rel > self.relative_vol_min => {}
            other => return Err(Rejection::RelVolume(other)),
        }
        if !(snap.macd_histogram > 0.0) {
            return Err(Rejection::MacdHistogram(snap.macd_histogram));
        }
        Ok(())
    }

    pub fn passes(&self, snap: &IndicatorSnapshot) -> bool {
        self.evaluate(snap).is_ok()
    }
}
