// Human-readable terminal output
use crate::config::ScreenerConfig;
use crate::model::CandidateRecord;
use crate::report::row::{fixed, money, percent, stability_label};
use ::console::{Term, style};

pub fn clear_screen() {
    let term = Term::stdout();
    if term.is_term() {
        let _ = term.clear_screen();
    }
}

pub fn header(ticker_count: usize, cfg: &ScreenerConfig) -> String {
    format!(
        "\n  Analysing {} Stocks @ {} -> {}\n",
        style(ticker_count).blue(),
        style(format!("${}", cfg.price_min)).green(),
        style(format!("${}", cfg.price_max)).green()
    )
}

pub fn candidate_block(record: &CandidateRecord) -> String {
    let t = &record.technicals;
    let mut lines = vec![
        style(record.ticker.as_str()).blue().to_string(),
        format!(
            "  Price: {}  RSI: {}  Rel Volume: {}  MACD Diff: {}",
            money(t.close),
            fixed(t.rsi),
            t.rel_volume.map(fixed).unwrap_or_else(|| "N/A".into()),
            fixed(t.macd_histogram)
        ),
    ];
    if let Some(y) = &record.yearly_low {
        lines.push(format!("  Yearly Low: {}", money(y.yearly_low)));
        lines.push(format!("  Current Price: {}", money(y.current_price)));
        lines.push(format!("  Percentage Above Low: {}", percent(y.percentage_above_low)));
    }
    let label = stability_label(record.stable);
    let label = if record.stable { style(label).green() } else { style(label).red() };
    lines.push(format!("  Stability: {}", label));
    lines.join("\n")
}

pub fn print_header(ticker_count: usize, cfg: &ScreenerConfig) {
    println!("{}", header(ticker_count, cfg));
}

pub fn print_results(records: &[CandidateRecord]) {
    println!("\n-------------------------------------");
    println!("         [Analysis Results]");
    println!("-------------------------------------\n");

    if records.is_empty() {
        println!("No good candidates found.");
        return;
    }
    for record in records {
        println!("{}", candidate_block(record));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{IndicatorSnapshot, Ticker, YearlyLowInfo};
    use chrono::NaiveDate;

    #[test]
    fn header_shows_count_and_price_band() {
        let text = ::console::strip_ansi_codes(&header(42, &ScreenerConfig::default())).to_string();
        assert!(text.contains("Analysing 42 Stocks @ $2 -> $20"), "{}", text);
    }

    #[test]
    fn candidate_block_lists_yearly_low_lines() {
        let record = CandidateRecord {
            ticker: Ticker::new("ACME"),
            technicals: IndicatorSnapshot {
                date: NaiveDate::from_ymd_opt(2024, 12, 11).unwrap(),
                close: 10.0,
                volume: 1.0,
                rsi: 50.0,
                ema: 10.0,
                macd: 0.1,
                macd_signal: 0.05,
                macd_histogram: 0.05,
                avg_volume: 1.0,
                rel_volume: Some(1.0),
            },
            fundamentals: None,
            stable: true,
            yearly_low: Some(YearlyLowInfo {
                yearly_low: 10.0,
                current_price: 11.0,
                percentage_above_low: 10.0,
            }),
        };
        let text = ::console::strip_ansi_codes(&candidate_block(&record)).to_string();
        assert!(text.starts_with("ACME\n"));
        assert!(text.contains("  Yearly Low: $10.00"));
        assert!(text.contains("  Current Price: $11.00"));
        assert!(text.contains("  Percentage Above Low: 10.00%"));
        assert!(text.ends_with("Stability: Stable"));
    }
}
