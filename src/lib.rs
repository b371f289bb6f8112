#![allow(clippy::collapsible_if)]

// Core modules
pub mod analysis;
pub mod config;
pub mod data;
pub mod domain;
pub mod engine;
pub mod report;
pub mod utils;

use std::path::PathBuf;

use anyhow::Result;
// CLI argument parsing
use clap::Parser;

use crate::config::{SCAN, ScanConfig};
use crate::report::{ConsoleNotifier, Notifier, Report, TelegramNotifier};

pub use analysis::{detect, select_symbols};
pub use data::{BinanceProvider, MarketDataProvider};
pub use domain::{Candle, Market, SpikeMatch, Timeframe};
pub use engine::{Scanner, run_scan};

/// Every option can also be set through the environment variable shown in `--help`.
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Exchange to scan
    #[arg(long, env = "EXCHANGE", default_value = SCAN.exchange)]
    pub exchange: String,

    /// Quote currency of the pairs to scan
    #[arg(long, env = "QUOTE", default_value = SCAN.quote)]
    pub quote: String,

    /// Candle timeframe, e.g. 15m, 1h, 4h, 1d
    #[arg(long, env = "TIMEFRAME", default_value = SCAN.timeframe)]
    pub timeframe: String,

    /// Candles fetched per symbol
    #[arg(long, env = "LIMIT", default_value_t = SCAN.limit)]
    pub limit: u32,

    /// Candles before the latest one that form the volume baseline
    #[arg(long, env = "VOL_LOOKBACK", default_value_t = SCAN.vol_lookback)]
    pub vol_lookback: usize,

    /// Required ratio of latest volume to baseline volume
    #[arg(long, env = "VOL_MULTIPLIER", default_value_t = SCAN.vol_multiplier)]
    pub vol_multiplier: f64,

    /// Largest close-to-close change still counted as early (0.03 = 3%)
    #[arg(
        long,
        env = "PRICE_MAX_CHANGE",
        default_value_t = SCAN.price_max_change,
        allow_hyphen_values = true
    )]
    pub price_max_change: f64,

    /// Maximum number of pairs to scan
    #[arg(long, env = "MAX_MARKETS", default_value_t = SCAN.max_markets)]
    pub max_markets: usize,

    /// Where matches are written as CSV
    #[arg(long, env = "CSV_OUT", default_value = SCAN.csv_out)]
    pub csv_out: PathBuf,

    #[arg(long, env = "TELEGRAM_TOKEN", hide_env_values = true)]
    pub telegram_token: Option<String>,

    #[arg(long, env = "CHAT_ID")]
    pub chat_id: Option<String>,

    /// Whole-hour UTC offset used to display bar times
    #[arg(
        long,
        env = "DISPLAY_UTC_OFFSET_HOURS",
        default_value_t = SCAN.display_utc_offset_hours,
        allow_hyphen_values = true
    )]
    pub display_utc_offset_hours: i32,

    /// Pause after this many symbols (0 disables)
    #[arg(long, env = "THROTTLE_EVERY", default_value_t = SCAN.throttle_every)]
    pub throttle_every: usize,

    #[arg(long, env = "THROTTLE_PAUSE_MS", default_value_t = SCAN.throttle_pause_ms)]
    pub throttle_pause_ms: u64,
}

/// Entry point for the binary: builds the collaborators from `config` and runs one scan.
pub async fn run(config: ScanConfig) -> Result<Report> {
    let provider = data::provider_for(&config.exchange)?;

    let notifier: Box<dyn Notifier> = match &config.telegram {
        Some(creds) => Box::new(TelegramNotifier::new(creds.clone())),
        None => {
            log::warn!("Telegram settings missing; the report goes to the console only.");
            Box::new(ConsoleNotifier)
        }
    };

    run_scan(&config, provider.as_ref(), notifier.as_ref()).await
}
