use {
    chrono::FixedOffset,
    std::fmt,
};

use crate::{
    analysis::detect,
    config::{ScanConfig, SpikeParams},
    data::MarketDataProvider,
    domain::{Candle, SpikeMatch},
    engine::Throttle,
    utils::TimeUtils,
};

/// Why a symbol produced no verdict.
#[derive(Debug, Clone, PartialEq)]
pub enum SkipReason {
    FetchFailed(String),
    Empty,
    InsufficientHistory { have: usize, need: usize },
    BadTimestamp(i64),
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            SkipReason::FetchFailed(msg) => write!(f, "fetch failed: {}", msg),
            SkipReason::Empty => write!(f, "no candles returned"),
            SkipReason::InsufficientHistory { have, need } => {
                write!(f, "insufficient history ({} of {} candles)", have, need)
            }
            SkipReason::BadTimestamp(ts) => write!(f, "unrepresentable open time {}", ts),
        }
    }
}

/// Result of the fetch + detect step for one symbol.
#[derive(Debug, Clone, PartialEq)]
pub enum SymbolOutcome {
    Match(SpikeMatch),
    NoMatch,
    Skipped(SkipReason),
}

#[derive(Debug, Default)]
pub struct ScanSummary {
    /// Unordered; the reporter imposes the final order.
    pub matches: Vec<SpikeMatch>,
    pub scanned: usize,
    pub skipped: usize,
}

/// Runs the detector on the latest candle of an already fetched series.
pub fn evaluate_series(
    symbol: &str,
    candles: &[Candle],
    params: &SpikeParams,
    offset: &FixedOffset,
) -> SymbolOutcome {
    let Some(last) = candles.last() else {
        return SymbolOutcome::Skipped(SkipReason::Empty);
    };

    let need = params.lookback.max(1) + 1;
    if candles.len() < need {
        return SymbolOutcome::Skipped(SkipReason::InsufficientHistory {
            have: candles.len(),
            need,
        });
    }

    if !detect(
        candles,
        params.lookback,
        params.volume_multiplier,
        params.max_price_change,
    ) {
        return SymbolOutcome::NoMatch;
    }

    match last.open_time(offset) {
        Some(bar_time) => SymbolOutcome::Match(SpikeMatch::new(
            symbol,
            bar_time,
            last.close_price,
            last.base_asset_volume,
        )),
        None => SymbolOutcome::Skipped(SkipReason::BadTimestamp(last.timestamp_ms)),
    }
}

/// Sequential fetch + detect over the selected symbols.
pub struct Scanner<'a> {
    provider: &'a dyn MarketDataProvider,
    config: &'a ScanConfig,
    throttle: Throttle,
}

impl<'a> Scanner<'a> {
    pub fn new(provider: &'a dyn MarketDataProvider, config: &'a ScanConfig) -> Self {
        Self {
            provider,
            config,
            throttle: Throttle::new(config.throttle_every, config.throttle_pause),
        }
    }

    pub fn with_throttle(mut self, throttle: Throttle) -> Self {
        self.throttle = throttle;
        self
    }

    /// Never fails: any problem with this symbol becomes a `Skipped` outcome.
    pub async fn analyze_symbol(&self, symbol: &str) -> SymbolOutcome {
        let candles = match self
            .provider
            .fetch_candles(symbol, self.config.timeframe, self.config.limit)
            .await
        {
            Ok(candles) => candles,
            Err(e) => return SymbolOutcome::Skipped(SkipReason::FetchFailed(format!("{:#}", e))),
        };

        evaluate_series(
            symbol,
            &candles,
            &self.config.spike,
            &self.config.display_offset,
        )
    }

    pub async fn scan(&self, symbols: &[String]) -> ScanSummary {
        let mut summary = ScanSummary::default();

        for (i, symbol) in symbols.iter().enumerate() {
            match self.analyze_symbol(symbol).await {
                SymbolOutcome::Match(hit) => {
                    log::info!(
                        "[MATCH] {} @ {} close={}",
                        hit.symbol,
                        TimeUtils::format_display(&hit.bar_time),
                        hit.close
                    );
                    summary.matches.push(hit);
                }
                SymbolOutcome::NoMatch => {}
                SymbolOutcome::Skipped(reason) => {
                    match &reason {
                        SkipReason::FetchFailed(_) => log::warn!("Skipping {}: {}", symbol, reason),
                        _ => log::debug!("Skipping {}: {}", symbol, reason),
                    }
                    summary.skipped += 1;
                }
            }
            summary.scanned += 1;

            self.throttle.tick(i + 1).await;
        }

        summary
    }
}
