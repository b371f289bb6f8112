//! Run configuration: built once at startup, then passed by reference.

use {
    crate::{
        Cli,
        config::{BINANCE, PriceChangePct, VolMultiplier},
        domain::Timeframe,
        utils::TimeUtils,
    },
    anyhow::{Context, Result, bail, ensure},
    chrono::FixedOffset,
    std::{path::PathBuf, time::Duration},
};

/// Default values for every configuration key.
pub struct ScanDefaults {
    pub exchange: &'static str,
    pub quote: &'static str,
    pub timeframe: &'static str,
    pub limit: u32,
    pub vol_lookback: usize,
    pub vol_multiplier: f64,
    pub price_max_change: f64,
    pub max_markets: usize,
    pub csv_out: &'static str,
    /// Bar times are displayed in Europe/Istanbul (UTC+3, no DST).
    pub display_utc_offset_hours: i32,
    pub throttle_every: usize,
    pub throttle_pause_ms: u64,
}

pub const SCAN: ScanDefaults = ScanDefaults {
    exchange: "binance",
    quote: "USDT",
    timeframe: "4h",
    limit: 200,
    vol_lookback: 10,
    vol_multiplier: VolMultiplier::DEFAULT_VALUE,
    price_max_change: PriceChangePct::DEFAULT_VALUE,
    max_markets: 400,
    csv_out: "volume_spike_4h.csv",
    display_utc_offset_hours: 3,
    throttle_every: 20,
    throttle_pause_ms: 250,
};

/// Parameters of the early-spike predicate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpikeParams {
    /// Candles before the evaluated one that form the volume baseline.
    pub lookback: usize,
    pub volume_multiplier: VolMultiplier,
    /// Inclusive upper bound on the close-to-close change.
    pub max_price_change: PriceChangePct,
}

impl Default for SpikeParams {
    fn default() -> Self {
        Self {
            lookback: SCAN.vol_lookback,
            volume_multiplier: VolMultiplier::new(SCAN.vol_multiplier),
            max_price_change: PriceChangePct::new(SCAN.price_max_change),
        }
    }
}

#[derive(Clone)]
pub struct TelegramCredentials {
    pub token: String,
    pub chat_id: String,
}

impl std::fmt::Debug for TelegramCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TelegramCredentials")
            .field("token", &"<redacted>")
            .field("chat_id", &self.chat_id)
            .finish()
    }
}

#[derive(Debug, Clone)]
pub struct ScanConfig {
    pub exchange: String,
    pub quote: String,
    pub timeframe: Timeframe,
    /// Candles requested per symbol.
    pub limit: u32,
    pub spike: SpikeParams,
    pub max_markets: usize,
    pub csv_out: PathBuf,
    pub telegram: Option<TelegramCredentials>,
    pub display_offset: FixedOffset,
    pub throttle_every: usize,
    pub throttle_pause: Duration,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            exchange: SCAN.exchange.to_string(),
            quote: SCAN.quote.to_string(),
            timeframe: Timeframe::default(),
            limit: SCAN.limit,
            spike: SpikeParams::default(),
            max_markets: SCAN.max_markets,
            csv_out: PathBuf::from(SCAN.csv_out),
            telegram: None,
            display_offset: TimeUtils::display_offset_or_utc(SCAN.display_utc_offset_hours),
            throttle_every: SCAN.throttle_every,
            throttle_pause: Duration::from_millis(SCAN.throttle_pause_ms),
        }
    }
}

impl ScanConfig {
    /// Validates raw command-line / environment values.
    pub fn from_cli(cli: &Cli) -> Result<Self> {
        let timeframe: Timeframe = cli
            .timeframe
            .parse()
            .with_context(|| format!("TIMEFRAME={} is not a supported interval", cli.timeframe))?;

        ensure!(
            cli.limit >= 1 && cli.limit <= BINANCE.limits.max_klines_limit,
            "LIMIT must be between 1 and {}, got {}",
            BINANCE.limits.max_klines_limit,
            cli.limit
        );
        ensure!(cli.vol_lookback >= 1, "VOL_LOOKBACK must be at least 1");
        if cli.vol_lookback as u64 >= cli.limit as u64 {
            bail!(
                "VOL_LOOKBACK ({}) must be smaller than LIMIT ({}) or no symbol can ever match",
                cli.vol_lookback,
                cli.limit
            );
        }
        ensure!(
            cli.vol_multiplier.is_finite() && cli.vol_multiplier > 0.0,
            "VOL_MULTIPLIER must be a positive number, got {}",
            cli.vol_multiplier
        );
        ensure!(
            cli.price_max_change.is_finite(),
            "PRICE_MAX_CHANGE must be finite, got {}",
            cli.price_max_change
        );

        let display_offset = TimeUtils::display_offset(cli.display_utc_offset_hours)?;

        let telegram = match (&cli.telegram_token, &cli.chat_id) {
            (Some(token), Some(chat_id)) if !token.is_empty() && !chat_id.is_empty() => {
                Some(TelegramCredentials {
                    token: token.clone(),
                    chat_id: chat_id.clone(),
                })
            }
            _ => None,
        };

        Ok(Self {
            exchange: cli.exchange.trim().to_lowercase(),
            quote: cli.quote.trim().to_uppercase(),
            timeframe,
            limit: cli.limit,
            spike: SpikeParams {
                lookback: cli.vol_lookback,
                volume_multiplier: VolMultiplier::new(cli.vol_multiplier),
                max_price_change: PriceChangePct::new(cli.price_max_change),
            },
            max_markets: cli.max_markets,
            csv_out: cli.csv_out.clone(),
            telegram,
            display_offset,
            throttle_every: cli.throttle_every,
            throttle_pause: Duration::from_millis(cli.throttle_pause_ms),
        })
    }
}
