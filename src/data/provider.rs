use {
    anyhow::{Context, Result, bail},
    async_trait::async_trait,
    binance_sdk::{
        config::ConfigurationRestApi,
        errors::{self, ConnectorError as connection_error},
        spot::{
            SpotRestApi,
            rest_api::{ExchangeInfoParams, KlinesParams, RestApi},
        },
    },
};

use crate::{
    config::{BINANCE, BinanceApiConfig},
    data::bn_kline::{KlineError, candles_from_rows, interval_for},
    domain::{Candle, InstrumentKind, Market, Timeframe},
};

/// Exchange access needed by a scan: the market catalog and recent candles.
#[async_trait]
pub trait MarketDataProvider: Send + Sync {
    /// Full catalog of the exchange. Failure here aborts the run.
    async fn load_markets(&self) -> Result<Vec<Market>>;

    /// The most recent `limit` candles of `symbol`, oldest first.
    async fn fetch_candles(&self, symbol: &str, timeframe: Timeframe, limit: u32)
    -> Result<Vec<Candle>>;
}

/// Picks the provider for `exchange`. Unknown exchanges are fatal.
pub fn provider_for(exchange: &str) -> Result<Box<dyn MarketDataProvider>> {
    match exchange {
        name if name == BINANCE.name => Ok(Box::new(BinanceProvider::new()?)),
        other => bail!(
            "No market data provider for exchange {:?} (supported: {})",
            other,
            BINANCE.name
        ),
    }
}

pub struct BinanceProvider {
    rest_client: RestApi,
}

impl BinanceProvider {
    pub fn new() -> Result<Self> {
        let config = BinanceApiConfig::default();
        let rest_conf = ConfigurationRestApi::builder()
            .timeout(config.timeout_ms)
            .retries(config.retries)
            .backoff(config.backoff_ms)
            .build()?;
        let rest_client = SpotRestApi::production(rest_conf);
        Ok(Self { rest_client })
    }
}

/// Builds a catalog entry from the exchange-info fields we use.
/// Entries without a symbol are dropped.
pub(crate) fn market_from_exchange_info(
    symbol: Option<String>,
    quote_asset: Option<String>,
    status: Option<&str>,
    is_spot_trading_allowed: Option<bool>,
) -> Option<Market> {
    let symbol = symbol.filter(|s| !s.is_empty())?;
    let kind = if is_spot_trading_allowed.unwrap_or(false) {
        InstrumentKind::Spot
    } else {
        InstrumentKind::Other
    };
    Some(Market::new(
        symbol,
        quote_asset.unwrap_or_default(),
        status == Some(BINANCE.limits.trading_status),
        kind,
    ))
}

fn log_connector_error(context: &str, e: &anyhow::Error) -> KlineError {
    if let Some(conn_err) = e.downcast_ref::<errors::ConnectorError>() {
        match conn_err {
            connection_error::TooManyRequestsError(msg) => {
                log::warn!("{} Rate limit exceeded. {}", context, msg);
            }
            connection_error::RateLimitBanError(msg) => {
                log::error!(
                    "{} IP address banned due to excessive rate limits. {}",
                    context,
                    msg
                );
            }
            errors::ConnectorError::ServerError { msg, status_code } => {
                log::warn!(
                    "{} Server error: {} (status code: {:?})",
                    context,
                    msg,
                    status_code
                );
            }
            errors::ConnectorError::NetworkError(msg) => {
                log::warn!("{} Network error: {}", context, msg);
            }
            other => {
                log::debug!("{} Request failed: {:?}", context, other);
            }
        }
        KlineError::ConnectionFailed(conn_err.to_string())
    } else {
        log::debug!("{} Unexpected error: {:#}", context, e);
        KlineError::ConnectionFailed(e.to_string())
    }
}

#[async_trait]
impl MarketDataProvider for BinanceProvider {
    async fn load_markets(&self) -> Result<Vec<Market>> {
        let response = match self
            .rest_client
            .exchange_info(ExchangeInfoParams::default())
            .await
        {
            Ok(r) => r,
            Err(e) => {
                let err = log_connector_error("exchange_info", &e);
                return Err(
                    anyhow::Error::new(err).context("Failed to load the Binance market catalog")
                );
            }
        };
        let data = response
            .data()
            .await
            .context("Failed to decode the Binance market catalog")?;

        let markets: Vec<Market> = data
            .symbols
            .unwrap_or_default()
            .into_iter()
            .filter_map(|s| {
                market_from_exchange_info(
                    s.symbol,
                    s.quote_asset,
                    s.status.as_deref(),
                    s.is_spot_trading_allowed,
                )
            })
            .collect();

        log::debug!("Loaded {} markets from {}", markets.len(), BINANCE.name);
        Ok(markets)
    }

    async fn fetch_candles(
        &self,
        symbol: &str,
        timeframe: Timeframe,
        limit: u32,
    ) -> Result<Vec<Candle>> {
        let params = KlinesParams::builder(symbol.to_string(), interval_for(timeframe))
            .limit(limit.min(BINANCE.limits.max_klines_limit) as i32)
            .build()?;

        let response = match self.rest_client.klines(params).await {
            Ok(r) => r,
            Err(e) => {
                let err = log_connector_error(symbol, &e);
                return Err(
                    anyhow::Error::new(err).context(format!("klines call failed for {}", symbol))
                );
            }
        };
        let rows = response.data().await?;

        candles_from_rows(rows).map_err(|e| {
            anyhow::Error::new(e).context(format!("{} kline conversion failed", symbol))
        })
    }
}
