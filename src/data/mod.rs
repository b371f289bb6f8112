mod bn_kline;
mod csv_store;
mod provider;

pub use {
    bn_kline::KlineError,
    csv_store::write_matches_csv,
    provider::{BinanceProvider, MarketDataProvider, provider_for},
};
