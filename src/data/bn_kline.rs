use {
    binance_sdk::spot::rest_api::{KlinesIntervalEnum, KlinesItemInner},
    std::{error::Error, fmt},
};

use crate::domain::{Candle, Timeframe};

pub(crate) fn interval_for(timeframe: Timeframe) -> KlinesIntervalEnum {
    match timeframe {
        Timeframe::M1 => KlinesIntervalEnum::Interval1m,
        Timeframe::M3 => KlinesIntervalEnum::Interval3m,
        Timeframe::M5 => KlinesIntervalEnum::Interval5m,
        Timeframe::M15 => KlinesIntervalEnum::Interval15m,
        Timeframe::M30 => KlinesIntervalEnum::Interval30m,
        Timeframe::H1 => KlinesIntervalEnum::Interval1h,
        Timeframe::H2 => KlinesIntervalEnum::Interval2h,
        Timeframe::H4 => KlinesIntervalEnum::Interval4h,
        Timeframe::H6 => KlinesIntervalEnum::Interval6h,
        Timeframe::H8 => KlinesIntervalEnum::Interval8h,
        Timeframe::H12 => KlinesIntervalEnum::Interval12h,
        Timeframe::D1 => KlinesIntervalEnum::Interval1d,
        Timeframe::D3 => KlinesIntervalEnum::Interval3d,
        Timeframe::W1 => KlinesIntervalEnum::Interval1w,
        Timeframe::Mo1 => KlinesIntervalEnum::Interval1M,
    }
}

#[derive(Debug)]
pub enum KlineError {
    InvalidLength,
    InvalidType(String),
    ConnectionFailed(String),
}

impl fmt::Display for KlineError {
    fn fmt(&self, f: &mut fmt::Formatter) -> std::fmt::Result {
        match self {
            KlineError::InvalidLength => write!(f, "Invalid length"),
            KlineError::InvalidType(string) => write!(f, "Invalid type: {}", string),
            KlineError::ConnectionFailed(msg) => {
                write!(f, "Binance API connection failed: {}.", msg)
            }
        }
    }
}

impl Error for KlineError {}

fn item_to_float(item: Option<KlinesItemInner>, field: &str) -> Result<f64, KlineError> {
    match item.ok_or(KlineError::InvalidLength)? {
        KlinesItemInner::String(s) => s
            .parse::<f64>()
            .ok()
            .filter(|v| v.is_finite())
            .ok_or_else(|| KlineError::InvalidType(field.to_string())),
        _ => Err(KlineError::InvalidType(field.to_string())),
    }
}

/// One kline row: `[open_time, open, high, low, close, volume, close_time, ...]`.
/// Prices arrive as strings; a missing or unparsable field rejects the row.
pub(crate) fn candle_from_row(row: Vec<KlinesItemInner>) -> Result<Candle, KlineError> {
    let mut items = row.into_iter();
    let open_timestamp_ms = match items.next().ok_or(KlineError::InvalidLength)? {
        KlinesItemInner::Integer(a) => a,
        _ => return Err(KlineError::InvalidType("open_time".to_string())),
    };

    let mut next_float = |field: &str| item_to_float(items.next(), field);
    let open = next_float("open")?;
    let high = next_float("high")?;
    let low = next_float("low")?;
    let close = next_float("close")?;
    let volume = next_float("volume")?;

    Ok(Candle::new(open_timestamp_ms, open, high, low, close, volume))
}

pub(crate) fn candles_from_rows(
    rows: Vec<Vec<KlinesItemInner>>,
) -> Result<Vec<Candle>, KlineError> {
    let mut candles: Vec<Candle> = rows
        .into_iter()
        .map(candle_from_row)
        .collect::<Result<_, _>>()?;
    // The detector relies on oldest-first ordering.
    candles.sort_by_key(|c| c.timestamp_ms);
    Ok(candles)
}
