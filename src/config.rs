use crate::model::ConfigError;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Runtime settings for one screening run. Every field has a default, so a
/// config file only needs the keys it wants to change.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ScreenerConfig {
    pub rsi_min: f64,
    pub rsi_max: f64,
    pub price_min: f64,
    pub price_max: f64,
    pub rsi_window: usize,
    pub ema_days: usize,
    pub macd_fast: usize,
    pub macd_slow: usize,
    pub macd_signal: usize,
    pub volume_window: usize,
    pub relative_vol_min: f64,
    pub avg_vol_min: f64,
    /// Percent above the 52-week low still considered "near the low".
    pub yearly_low_threshold: f64,
    pub recent_days: i64,
    pub technical_lookback_days: i64,
    pub yearly_lookback_days: i64,
    pub http_timeout_secs: u64,
    pub tickers_path: PathBuf,
    pub output_path: PathBuf,
    pub debug: bool,
}

impl Default for ScreenerConfig {
    fn default() -> Self {
        Self {
            rsi_min: 27.0,
            rsi_max: 70.0,
            price_min: 2.0,
            price_max: 20.0,
            rsi_window: 14,
            ema_days: 14,
            macd_fast: 12,
            macd_slow: 26,
            macd_signal: 9,
            volume_window: 10,
            relative_vol_min: 0.6,
            avg_vol_min: 500_000.0,
            yearly_low_threshold: 10.0,
            recent_days: 4,
            technical_lookback_days: 90,
            yearly_lookback_days: 365,
            http_timeout_secs: 15,
            tickers_path: PathBuf::from("tickers.txt"),
            output_path: PathBuf::from("candidate_data.xlsx"),
            debug: false,
        }
    }
}

impl ScreenerConfig {
    /// Checks that thresholds and windows describe a usable screen.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.rsi_min >= self.rsi_max {
            return Err(ConfigError::Invalid(format!(
                "rsi_min ({}) must be below rsi_max ({})",
                self.rsi_min, self.rsi_max
            )));
        }
        if self.price_min >= self.price_max {
            return Err(ConfigError::Invalid(format!(
                "price_min ({}) must be below price_max ({})",
                self.price_min, self.price_max
            )));
        }
        if self.macd_fast >= self.macd_slow {
            return Err(ConfigError::Invalid(format!(
                "macd_fast ({}) must be below macd_slow ({})",
                self.macd_fast, self.macd_slow
            )));
        }
        let windows = [
            ("rsi_window", self.rsi_window),
            ("ema_days", self.ema_days),
            ("macd_fast", self.macd_fast),
            ("macd_signal", self.macd_signal),
            ("volume_window", self.volume_window),
        ];
        if let Some((name, _)) = windows.iter().find(|(_, w)| *w == 0) {
            return Err(ConfigError::Invalid(format!("{} must be positive", name)));
        }
        if self.recent_days <= 0 || self.technical_lookback_days <= 0 || self.yearly_lookback_days <= 0 {
            return Err(ConfigError::Invalid("lookback windows must be positive".into()));
        }
        Ok(())
    }
}

/// Reads a JSON config file and validates it.
pub fn load_config(path: &Path) -> Result<ScreenerConfig, ConfigError> {
    let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let config: ScreenerConfig = serde_json::from_str(&content)?;
    config.validate()?;
    Ok(config)
}
