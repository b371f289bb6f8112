use {
    crate::config::{BaseVol, ClosePrice, HighPrice, LowPrice, OpenPrice},
    chrono::{DateTime, FixedOffset},
};

use crate::utils::TimeUtils;

// Define the Candle struct with all its properties
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Candle {
    pub timestamp_ms: i64,

    pub open_price: OpenPrice,
    pub high_price: HighPrice,
    pub low_price: LowPrice,
    pub close_price: ClosePrice,

    pub base_asset_volume: BaseVol,
}

impl Candle {
    // A constructor for convenience
    pub fn new(
        timestamp_ms: i64,
        open: f64,
        high: f64,
        low: f64,
        close: f64,
        base_vol: f64,
    ) -> Self {
        Candle {
            timestamp_ms,
            open_price: OpenPrice::new(open),
            high_price: HighPrice::new(high),
            low_price: LowPrice::new(low),
            close_price: ClosePrice::new(close),
            base_asset_volume: BaseVol::new(base_vol),
        }
    }

    /// Open time in the given display timezone.
    pub fn open_time(&self, offset: &FixedOffset) -> Option<DateTime<FixedOffset>> {
        TimeUtils::epoch_ms_to_offset(self.timestamp_ms, offset)
    }
}

/// Candles of one symbol, oldest first. Gaps are not checked.
pub type CandleSeries = [Candle];
