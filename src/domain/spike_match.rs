use {
    crate::config::{BaseVol, ClosePrice},
    chrono::{DateTime, FixedOffset},
    serde::Serialize,
};

/// A symbol whose latest candle passed the early-spike predicate.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SpikeMatch {
    pub symbol: String,
    /// Open time of the evaluated candle, in the display timezone.
    pub bar_time: DateTime<FixedOffset>,
    pub close: ClosePrice,
    pub volume: BaseVol,
}

impl SpikeMatch {
    pub fn new(
        symbol: impl Into<String>,
        bar_time: DateTime<FixedOffset>,
        close: ClosePrice,
        volume: BaseVol,
    ) -> Self {
        Self {
            symbol: symbol.into(),
            bar_time,
            close,
            volume,
        }
    }
}
