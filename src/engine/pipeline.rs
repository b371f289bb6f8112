use anyhow::{Context, Result};

use crate::{
    analysis::select_symbols,
    config::ScanConfig,
    data::MarketDataProvider,
    engine::Scanner,
    report::{Notifier, Report, Reporter},
};

/// Run header: what is scanned and with which thresholds.
pub(crate) fn scan_header(config: &ScanConfig, symbol_count: usize) -> String {
    format!(
        "{} {} pairs: scanning {} on {} candles (vol >= {} of {}-bar avg, move <= {})",
        config.exchange.to_uppercase(),
        config.quote,
        symbol_count,
        config.timeframe,
        config.spike.volume_multiplier,
        config.spike.lookback,
        config.spike.max_price_change
    )
}

/// One full pass: catalog -> selection -> per-symbol scan -> report.
///
/// Only a catalog failure is returned as an error. Everything after that
/// degrades per symbol or per collaborator and the run still completes.
pub async fn run_scan(
    config: &ScanConfig,
    provider: &dyn MarketDataProvider,
    notifier: &dyn Notifier,
) -> Result<Report> {
    let markets = provider
        .load_markets()
        .await
        .with_context(|| format!("Could not load the {} market catalog", config.exchange))?;

    let symbols = select_symbols(&markets, &config.quote, config.max_markets);
    log::info!("{}", scan_header(config, symbols.len()));

    let summary = Scanner::new(provider, config).scan(&symbols).await;
    log::info!(
        "Scanned {} symbols: {} matches, {} skipped",
        summary.scanned,
        summary.matches.len(),
        summary.skipped
    );

    Ok(Reporter::new(notifier, config).report(summary.matches).await)
}
