use anyhow::{Context, Result};
use chrono::Local;
use clap::Parser;
use std::path::{Path, PathBuf};
use swing_screener::normalizer::read_tickers;
use swing_screener::provider::YahooClient;
use swing_screener::report::{console, write_workbook};
use swing_screener::{Screener, ScreenerConfig, load_config};
use tracing::info;
use tracing_subscriber::EnvFilter;

const DEFAULT_CONFIG: &str = "config.json";

#[derive(Debug, Parser)]
#[command(name = "swing-screener", version, about = "Screen a ticker list for swing-trade setups")]
struct Cli {
    /// JSON config file; ./config.json is used when present
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Ticker list, one symbol per line
    #[arg(short, long)]
    tickers: Option<PathBuf>,

    /// Spreadsheet to write
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Log per-symbol indicator details
    #[arg(long)]
    debug: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = resolve_config(cli.config.as_deref())?;
    if let Some(path) = cli.tickers {
        config.tickers_path = path;
    }
    if let Some(path) = cli.output {
        config.output_path = path;
    }
    config.debug |= cli.debug;

    init_logging(config.debug);

    let tickers = read_tickers(&config.tickers_path).context("cannot start screening")?;

    console::clear_screen();
    console::print_header(tickers.len(), &config);

    let client = YahooClient::new(config.http_timeout_secs).context("failed to build HTTP client")?;
    let screener = Screener::new(&config, &client, &client);
    let today = Local::now().date_naive();
    info!("Screening {} tickers as of {}", tickers.len(), today);

    let candidates = screener.run(&tickers, today);

    console::print_results(&candidates);
    write_workbook(&config.output_path, &candidates)
        .with_context(|| format!("failed to write {}", config.output_path.display()))?;

    Ok(())
}

/// An explicit `--config` must exist; the default file is optional.
fn resolve_config(explicit: Option<&Path>) -> Result<ScreenerConfig> {
    match explicit {
        Some(path) => load_config(path).with_context(|| format!("config {}", path.display())),
        None if Path::new(DEFAULT_CONFIG).exists() => {
            load_config(Path::new(DEFAULT_CONFIG)).context("config.json")
        }
        None => Ok(ScreenerConfig::default()),
    }
}

fn init_logging(debug: bool) {
    let default_directive = if debug { "info,swing_screener=debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
