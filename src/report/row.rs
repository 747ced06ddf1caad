// CandidateRecord -> fixed-order report row
use crate::model::CandidateRecord;

pub const COLUMNS: [&str; 20] = [
    "symbol",
    "Name",
    "Sector",
    "price",
    "rsi",
    "rel_volume",
    "avg_volume",
    "ema",
    "macd",
    "macd_signal",
    "macd_diff",
    "MarketCap",
    "PERatio",
    "NetIncome",
    "RevenueGrowth",
    "DebtToEquity",
    "yearly_low",
    "current_price",
    "percentage_above_low",
    "stability",
];

pub const NOT_AVAILABLE: &str = "N/A";

pub fn money(value: f64) -> String {
    format!("${:.2}", value)
}

pub fn fixed(value: f64) -> String {
    format!("{:.2}", value)
}

pub fn percent(value: f64) -> String {
    format!("{:.2}%", value)
}

fn or_na<T>(value: Option<T>, render: impl FnOnce(T) -> String) -> String {
    value.map(render).unwrap_or_else(|| NOT_AVAILABLE.to_string())
}

pub fn stability_label(stable: bool) -> &'static str {
    if stable { "Stable" } else { "May be risky" }
}

/// Renders one record in `COLUMNS` order.
///
/// Without fundamentals every fundamentals column is "N/A". With fundamentals,
/// absent name/sector are "N/A", absent market cap, P/E and net income default
/// to zero, and absent revenue growth / debt-to-equity stay "N/A".
pub fn render_row(record: &CandidateRecord) -> Vec<String> {
    let t = &record.technicals;
    let f = record.fundamentals.as_ref();
    let y = record.yearly_low.as_ref();

    vec![
        record.ticker.to_string(),
        or_na(f.map(|f| f.name.clone().unwrap_or_else(|| NOT_AVAILABLE.into())), |s| s),
        or_na(f.map(|f| f.sector.clone().unwrap_or_else(|| NOT_AVAILABLE.into())), |s| s),
        money(t.close),
        fixed(t.rsi),
        or_na(t.rel_volume, fixed),
        fixed(t.avg_volume),
        money(t.ema),
        fixed(t.macd),
        fixed(t.macd_signal),
        fixed(t.macd_histogram),
        or_na(f.map(|f| f.market_cap.unwrap_or(0)), |v| v.to_string()),
        or_na(f.map(|f| f.pe_ratio.unwrap_or(0.0)), fixed),
        or_na(f.map(|f| f.net_income.unwrap_or(0)), |v| v.to_string()),
        or_na(f.and_then(|f| f.revenue_growth), fixed),
        or_na(f.and_then(|f| f.debt_to_equity), fixed),
        or_na(y.map(|y| y.yearly_low), money),
        or_na(y.map(|y| y.current_price), money),
        or_na(y.map(|y| y.percentage_above_low), percent),
        stability_label(record.stable).to_string(),
    ]
}
