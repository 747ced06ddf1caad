// Date helpers for provider query windows
use chrono::{DateTime, Duration, NaiveDate};

/// Returns `(today - days, today)` as an inclusive calendar window.
pub fn lookback_window(today: NaiveDate, days: i64) -> (NaiveDate, NaiveDate) {
    (today - Duration::days(days), today)
}

/// Unix seconds at 00:00 UTC of `date`.
pub fn unix_midnight(date: NaiveDate) -> i64 {
    date.and_hms_opt(0, 0, 0)
        .map(|dt| dt.and_utc().timestamp())
        .unwrap_or_default()
}

/// Converts a provider timestamp into the exchange-local trading date.
pub fn trading_date(timestamp: i64, gmt_offset: i64) -> Option<NaiveDate> {
    DateTime::from_timestamp(timestamp + gmt_offset, 0).map(|dt| dt.date_naive())
}
