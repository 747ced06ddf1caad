//! Indicator math over plain `f64` series: RSI, EMA, MACD and volume averages.
//!
//! Exponential averages use the recursive form `y[t] = a * x[t] + (1 - a) * y[t-1]`
//! seeded with the first observation; a value is only reported once the series
//! holds at least as many observations as the indicator's window.

use crate::config::ScreenerConfig;
use crate::model::{IndicatorError, IndicatorSnapshot, PriceSeries};

/// Exponentially weighted mean with smoothing factor `alpha`, seeded with `values[0]`.
pub fn ewm(values: &[f64], alpha: f64) -> Vec<f64> {
    let mut out = Vec::with_capacity(values.len());
    let mut prev: Option<f64> = None;
    for &v in values {
        let next = match prev {
            None => v,
            Some(p) => alpha * v + (1.0 - alpha) * p,
        };
        out.push(next);
        prev = Some(next);
    }
    out
}

/// Full EMA series with `alpha = 2 / (span + 1)`.
pub fn ema_series(values: &[f64], span: usize) -> Vec<f64> {
    ewm(values, 2.0 / (span as f64 + 1.0))
}

/// Latest EMA, or `None` with fewer than `span` observations.
pub fn ema(values: &[f64], span: usize) -> Option<f64> {
    if span == 0 || values.len() < span {
        return None;
    }
    ema_series(values, span).last().copied()
}

/// Latest RSI using Wilder smoothing (`alpha = 1 / window`).
///
/// The first observation has no prior close and contributes neither gain nor loss.
/// RSI = 100 - 100 / (1 + avg_gain / avg_loss), and 100 when there were no losses.
/// Returns `None` with fewer than `window` observations.
pub fn rsi(values: &[f64], window: usize) -> Option<f64> {
    if window == 0 || values.len() < window {
        return None;
    }

    let mut gains = Vec::with_capacity(values.len());
    let mut losses = Vec::with_capacity(values.len());
    gains.push(0.0);
    losses.push(0.0);
    for pair in values.windows(2) {
        let delta = pair[1] - pair[0];
        gains.push(delta.max(0.0));
        losses.push((-delta).max(0.0));
    }

    let alpha = 1.0 / window as f64;
    let avg_gain = *ewm(&gains, alpha).last()?;
    let avg_loss = *ewm(&losses, alpha).last()?;

    if avg_loss == 0.0 {
        return Some(100.0);
    }
    let rs = avg_gain / avg_loss;
    Some(100.0 - 100.0 / (1.0 + rs))
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Macd {
    pub line: f64,
    pub signal: f64,
    pub histogram: f64,
}

/// Latest MACD line, signal and histogram.
///
/// Both EMAs run over the whole series; the line becomes valid at index
/// `slow - 1` and the signal EMA is seeded there. Needs `slow + signal - 1` values.
pub fn macd(values: &[f64], fast: usize, slow: usize, signal: usize) -> Option<Macd> {
    if fast == 0 || signal == 0 || fast >= slow || values.len() < macd_min_len(slow, signal) {
        return None;
    }

    let fast_ema = ema_series(values, fast);
    let slow_ema = ema_series(values, slow);
    let line: Vec<f64> = fast_ema
        .iter()
        .zip(slow_ema.iter())
        .skip(slow - 1)
        .map(|(f, s)| f - s)
        .collect();

    let signal_line = ema_series(&line, signal);
    let line = *line.last()?;
    let signal = *signal_line.last()?;
    Some(Macd {
        line,
        signal,
        histogram: line - signal,
    })
}

fn macd_min_len(slow: usize, signal: usize) -> usize {
    slow + signal - 1
}

/// Mean of the trailing `window` values.
pub fn trailing_mean(values: &[f64], window: usize) -> Option<f64> {
    if window == 0 || values.len() < window {
        return None;
    }
    let tail = &values[values.len() - window..];
    Some(tail.iter().sum::<f64>() / window as f64)
}

/// Latest volume relative to its trailing average; `None` when the average is zero.
pub fn relative_volume(volume: f64, avg_volume: f64) -> Option<f64> {
    if avg_volume == 0.0 {
        return None;
    }
    Some(volume / avg_volume)
}

/// Computes the latest `IndicatorSnapshot` for a price series.
#[derive(Debug, Clone)]
pub struct IndicatorEngine {
    rsi_window: usize,
    ema_window: usize,
    macd_fast: usize,
    macd_slow: usize,
    macd_signal: usize,
    volume_window: usize,
}

impl IndicatorEngine {
    pub fn new(cfg: &ScreenerConfig) -> Self {
        Self {
            rsi_window: cfg.rsi_window,
            ema_window: cfg.ema_days,
            macd_fast: cfg.macd_fast,
            macd_slow: cfg.macd_slow,
            macd_signal: cfg.macd_signal,
            volume_window: cfg.volume_window,
        }
    }

    /// Bars needed before every indicator has a value.
    pub fn required_bars(&self) -> usize {
        [
            self.rsi_window,
            self.ema_window,
            macd_min_len(self.macd_slow, self.macd_signal),
            self.volume_window,
            1,
        ]
        .into_iter()
        .max()
        .unwrap_or(1)
    }

    pub fn snapshot(&self, series: &PriceSeries) -> Result<IndicatorSnapshot, IndicatorError> {
        let needed = self.required_bars();
        let insufficient = || IndicatorError::InsufficientHistory {
            needed,
            available: series.len(),
        };

        let latest = series.latest().ok_or_else(insufficient)?;
        if series.len() < needed {
            return Err(insufficient());
        }
        if let Some(bad) = series.bars().iter().find(|b| !b.adjusted_close.is_finite()) {
            return Err(IndicatorError::NonFiniteInput(bad.date));
        }

        let closes = series.adjusted_closes();
        let volumes = series.volumes();

        let rsi = rsi(&closes, self.rsi_window).ok_or_else(insufficient)?;
        let ema = ema(&closes, self.ema_window).ok_or_else(insufficient)?;
        let macd = macd(&closes, self.macd_fast, self.macd_slow, self.macd_signal).ok_or_else(insufficient)?;
        let avg_volume = trailing_mean(&volumes, self.volume_window).ok_or_else(insufficient)?;

        Ok(IndicatorSnapshot {
            date: latest.date,
            close: latest.close,
            volume: latest.volume,
            rsi,
            ema,
            macd: macd.line,
            macd_signal: macd.signal,
            macd_histogram: macd.histogram,
            avg_volume,
            rel_volume: relative_volume(latest.volume, avg_volume),
        })
    }
}
