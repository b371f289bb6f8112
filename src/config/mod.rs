//! Configuration module for the scanner.

mod binance;
mod scan;
mod types;

pub use binance::{BINANCE, BinanceApiConfig};
pub use scan::{SCAN, ScanConfig, ScanDefaults, SpikeParams, TelegramCredentials};
pub use types::{
    BaseVol, ClosePrice, EPSILON, HighPrice, LowPrice, OpenPrice, PriceChangePct, VolMultiplier,
};
