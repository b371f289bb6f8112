pub struct BinanceApiConfig {
    pub timeout_ms: u64,
    pub retries: u32,
    pub backoff_ms: u64,
}

impl Default for BinanceApiConfig {
    fn default() -> Self {
        Self {
            timeout_ms: BINANCE.client.timeout_ms,
            retries: BINANCE.client.retries,
            backoff_ms: BINANCE.client.backoff_ms,
        }
    }
}

/// Exchange-side constants: the klines request cap and the exchange-info
/// status of a tradeable symbol.
pub struct RestLimits {
    pub max_klines_limit: u32,
    /// `status` value in exchange info for tradeable symbols.
    pub trading_status: &'static str,
}

/// A failed request is not retried: the symbol is skipped and the scan moves on.
pub struct ClientDefaults {
    pub timeout_ms: u64,
    pub retries: u32,
    pub backoff_ms: u64,
}

pub struct BinanceConfig {
    pub name: &'static str,
    pub limits: RestLimits,
    pub client: ClientDefaults,
}

pub const BINANCE: BinanceConfig = BinanceConfig {
    name: "binance",
    limits: RestLimits {
        max_klines_limit: 1000,
        trading_status: "TRADING",
    },
    client: ClientDefaults {
        timeout_ms: 5000,
        retries: 0,
        backoff_ms: 0,
    },
};
