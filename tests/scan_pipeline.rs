use std::collections::HashMap;
use std::sync::Mutex;

use anyhow::{Result, anyhow, bail};
use async_trait::async_trait;

use volume_spike_scanner::{
    Candle, Market, MarketDataProvider, Scanner, Timeframe,
    config::ScanConfig,
    domain::InstrumentKind,
    engine::{SkipReason, SymbolOutcome, Throttle},
    report::{Notifier, no_matches_message},
    run_scan,
    utils::TimeUtils,
};

enum FakeSeries {
    Candles(Vec<Candle>),
    Fail,
}

#[derive(Default)]
struct FakeExchange {
    markets: Vec<Market>,
    series: HashMap<String, FakeSeries>,
    catalog_down: bool,
    fetched: Mutex<Vec<String>>,
}

impl FakeExchange {
    fn with_spot(mut self, symbol: &str, series: FakeSeries) -> Self {
        self.markets
            .push(Market::new(symbol, "USDT", true, InstrumentKind::Spot));
        self.series.insert(symbol.to_string(), series);
        self
    }
}

#[async_trait]
impl MarketDataProvider for FakeExchange {
    async fn load_markets(&self) -> Result<Vec<Market>> {
        if self.catalog_down {
            bail!("exchange unreachable");
        }
        Ok(self.markets.clone())
    }

    async fn fetch_candles(&self, symbol: &str, _tf: Timeframe, limit: u32) -> Result<Vec<Candle>> {
        self.fetched.lock().unwrap().push(symbol.to_string());
        match self.series.get(symbol) {
            Some(FakeSeries::Candles(c)) => {
                let start = c.len().saturating_sub(limit as usize);
                Ok(c[start..].to_vec())
            }
            Some(FakeSeries::Fail) => Err(anyhow!("symbol not found")),
            None => Ok(vec![]),
        }
    }
}

#[derive(Default)]
struct RecordingNotifier {
    sent: Mutex<Vec<String>>,
    fail: bool,
}

#[async_trait]
impl Notifier for RecordingNotifier {
    async fn send(&self, text: &str) -> Result<()> {
        self.sent.lock().unwrap().push(text.to_string());
        if self.fail {
            bail!("HTTP 500");
        }
        Ok(())
    }
}

/// 11 candles, 4h apart: ten at volume 10 / close 100, then the given last candle.
fn series(last_volume: f64, last_close: f64, start_hour: i64) -> FakeSeries {
    let mut candles: Vec<Candle> = (0..10)
        .map(|i| {
            Candle::new(
                (start_hour + i * 4) * TimeUtils::MS_IN_H,
                100.0,
                100.0,
                100.0,
                100.0,
                10.0,
            )
        })
        .collect();
    candles.push(Candle::new(
        (start_hour + 40) * TimeUtils::MS_IN_H,
        100.0,
        last_close,
        100.0,
        last_close,
        last_volume,
    ));
    FakeSeries::Candles(candles)
}

fn config(csv_out: std::path::PathBuf) -> ScanConfig {
    ScanConfig {
        csv_out,
        throttle_every: 0,
        ..ScanConfig::default()
    }
}

#[tokio::test]
async fn spike_with_small_move_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    let cfg = config(dir.path().join("hits.csv"));
    let exchange = FakeExchange::default().with_spot("ABCUSDT", series(25.0, 102.0, 0));
    let notifier = RecordingNotifier::default();

    let report = run_scan(&cfg, &exchange, &notifier).await.unwrap();

    assert_eq!(report.matches.len(), 1);
    assert_eq!(report.matches[0].symbol, "ABCUSDT");
    assert_eq!(report.matches[0].close.value(), 102.0);
    assert!(report.csv_written);
    assert!(dir.path().join("hits.csv").exists());

    let sent = notifier.sent.lock().unwrap();
    assert_eq!(sent.len(), 1);
    assert!(sent[0].contains("ABCUSDT | Close=102 | Vol=25"));
}

#[tokio::test]
async fn spike_with_large_move_is_not_reported() {
    let dir = tempfile::tempdir().unwrap();
    let cfg = config(dir.path().join("hits.csv"));
    let exchange = FakeExchange::default().with_spot("ABCUSDT", series(25.0, 110.0, 0));
    let notifier = RecordingNotifier::default();

    let report = run_scan(&cfg, &exchange, &notifier).await.unwrap();

    assert!(report.matches.is_empty());
    assert!(!report.csv_written);
}

#[tokio::test]
async fn empty_catalog_sends_no_match_message_and_writes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let csv = dir.path().join("hits.csv");
    let cfg = config(csv.clone());
    let exchange = FakeExchange::default();
    let notifier = RecordingNotifier::default();

    let report = run_scan(&cfg, &exchange, &notifier).await.unwrap();

    assert!(report.matches.is_empty());
    assert!(!report.csv_written);
    assert!(!csv.exists());
    assert_eq!(report.digest, no_matches_message(cfg.timeframe));
    assert_eq!(*notifier.sent.lock().unwrap(), vec![no_matches_message(cfg.timeframe)]);
}

#[tokio::test]
async fn failing_symbol_does_not_affect_the_others() {
    let dir = tempfile::tempdir().unwrap();
    let cfg = config(dir.path().join("hits.csv"));
    let exchange = FakeExchange::default()
        .with_spot("AAAUSDT", series(25.0, 101.0, 0))
        .with_spot("BBBUSDT", FakeSeries::Fail)
        .with_spot("CCCUSDT", FakeSeries::Candles(vec![]))
        .with_spot("DDDUSDT", series(30.0, 99.0, 0));
    let notifier = RecordingNotifier::default();

    let report = run_scan(&cfg, &exchange, &notifier).await.unwrap();

    let symbols: Vec<&str> = report.matches.iter().map(|m| m.symbol.as_str()).collect();
    assert_eq!(symbols, vec!["AAAUSDT", "DDDUSDT"]);
    assert_eq!(
        *exchange.fetched.lock().unwrap(),
        vec!["AAAUSDT", "BBBUSDT", "CCCUSDT", "DDDUSDT"]
    );
}

#[tokio::test]
async fn catalog_failure_aborts_the_run() {
    let dir = tempfile::tempdir().unwrap();
    let cfg = config(dir.path().join("hits.csv"));
    let exchange = FakeExchange {
        catalog_down: true,
        ..FakeExchange::default()
    };
    let notifier = RecordingNotifier::default();

    assert!(run_scan(&cfg, &exchange, &notifier).await.is_err());
    assert!(notifier.sent.lock().unwrap().is_empty());
}

#[tokio::test]
async fn delivery_failure_is_swallowed() {
    let dir = tempfile::tempdir().unwrap();
    let cfg = config(dir.path().join("hits.csv"));
    let exchange = FakeExchange::default().with_spot("ABCUSDT", series(25.0, 102.0, 0));
    let notifier = RecordingNotifier {
        fail: true,
        ..RecordingNotifier::default()
    };

    let report = run_scan(&cfg, &exchange, &notifier).await.unwrap();

    assert_eq!(report.matches.len(), 1);
    assert!(!report.delivered);
    assert!(report.csv_written);
}

#[tokio::test]
async fn report_is_ordered_by_bar_time_then_symbol() {
    let dir = tempfile::tempdir().unwrap();
    let cfg = config(dir.path().join("hits.csv"));
    // ZZZ's latest bar is 4h older than the others.
    let exchange = FakeExchange::default()
        .with_spot("MMMUSDT", series(25.0, 100.0, 4))
        .with_spot("ZZZUSDT", series(25.0, 100.0, 0))
        .with_spot("AAAUSDT", series(25.0, 100.0, 4));
    let notifier = RecordingNotifier::default();

    let report = run_scan(&cfg, &exchange, &notifier).await.unwrap();

    let symbols: Vec<&str> = report.matches.iter().map(|m| m.symbol.as_str()).collect();
    assert_eq!(symbols, vec!["ZZZUSDT", "AAAUSDT", "MMMUSDT"]);

    let csv = std::fs::read_to_string(dir.path().join("hits.csv")).unwrap();
    let csv_symbols: Vec<&str> = csv
        .lines()
        .skip(1)
        .filter_map(|l| l.split(',').next())
        .collect();
    assert_eq!(csv_symbols, symbols);
}

#[tokio::test]
async fn max_markets_caps_the_symbols_fetched() {
    let dir = tempfile::tempdir().unwrap();
    let cfg = ScanConfig {
        max_markets: 2,
        ..config(dir.path().join("hits.csv"))
    };
    let exchange = FakeExchange::default()
        .with_spot("CCCUSDT", series(25.0, 100.0, 0))
        .with_spot("AAAUSDT", series(25.0, 100.0, 0))
        .with_spot("BBBUSDT", series(25.0, 100.0, 0));
    let notifier = RecordingNotifier::default();

    run_scan(&cfg, &exchange, &notifier).await.unwrap();

    assert_eq!(*exchange.fetched.lock().unwrap(), vec!["AAAUSDT", "BBBUSDT"]);
}

#[tokio::test]
async fn analyze_symbol_reports_skip_reasons() {
    let cfg = ScanConfig::default();
    let exchange = FakeExchange::default()
        .with_spot("FAILUSDT", FakeSeries::Fail)
        .with_spot("EMPTYUSDT", FakeSeries::Candles(vec![]));
    let scanner = Scanner::new(&exchange, &cfg).with_throttle(Throttle::disabled());

    assert!(matches!(
        scanner.analyze_symbol("FAILUSDT").await,
        SymbolOutcome::Skipped(SkipReason::FetchFailed(_))
    ));
    assert_eq!(
        scanner.analyze_symbol("EMPTYUSDT").await,
        SymbolOutcome::Skipped(SkipReason::Empty)
    );
}

#[tokio::test(start_paused = true)]
async fn scan_pauses_between_batches() {
    let cfg = ScanConfig {
        throttle_every: 2,
        throttle_pause: std::time::Duration::from_secs(1),
        ..ScanConfig::default()
    };
    let exchange = FakeExchange::default()
        .with_spot("AUSDT", series(10.0, 100.0, 0))
        .with_spot("BUSDT", series(10.0, 100.0, 0))
        .with_spot("CUSDT", series(10.0, 100.0, 0))
        .with_spot("DUSDT", series(10.0, 100.0, 0))
        .with_spot("EUSDT", series(10.0, 100.0, 0));
    let symbols: Vec<String> = ["AUSDT", "BUSDT", "CUSDT", "DUSDT", "EUSDT"]
        .iter()
        .map(|s| s.to_string())
        .collect();

    let start = tokio::time::Instant::now();
    let summary = Scanner::new(&exchange, &cfg).scan(&symbols).await;

    assert_eq!(summary.scanned, 5);
    assert!(summary.matches.is_empty());
    // Pauses after the 2nd and 4th symbol only.
    assert_eq!(start.elapsed(), std::time::Duration::from_secs(2));
}
