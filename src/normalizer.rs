use crate::model::{Ticker, TickerError};
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

/// Reads one symbol per line. Blank lines are skipped; order and duplicates are kept.
pub fn read_tickers(path: &Path) -> Result<Vec<Ticker>, TickerError> {
    let content = fs::read_to_string(path).map_err(|source| match source.kind() {
        ErrorKind::NotFound => TickerError::MissingInput(path.to_path_buf()),
        _ => TickerError::Io {
            path: path.to_path_buf(),
            source,
        },
    })?;
    Ok(parse_tickers(&content))
}

pub fn parse_tickers(content: &str) -> Vec<Ticker> {
    content.lines().filter_map(normalize_symbol).collect()
}

/// Trims and uppercases a raw line; `None` for blank lines.
pub fn normalize_symbol(line: &str) -> Option<Ticker> {
    let symbol = line.trim();
    if symbol.is_empty() {
        return None;
    }
    Some(Ticker::new(symbol.to_uppercase()))
}
