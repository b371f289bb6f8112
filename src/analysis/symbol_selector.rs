use itertools::Itertools;

use crate::domain::Market;

/// Active spot symbols quoted in `quote`, deduplicated, sorted and capped at `max_markets`.
pub fn select_symbols(markets: &[Market], quote: &str, max_markets: usize) -> Vec<String> {
    markets
        .iter()
        .filter(|m| m.is_scannable_for(quote))
        .map(|m| m.symbol.clone())
        .sorted()
        .dedup()
        .take(max_markets)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::InstrumentKind;

    fn spot(symbol: &str, quote: &str) -> Market {
        Market::new(symbol, quote, true, InstrumentKind::Spot)
    }

    #[test]
    fn empty_catalog_selects_nothing() {
        assert!(select_symbols(&[], "USDT", 400).is_empty());
    }

    #[test]
    fn filters_on_quote_activity_and_kind() {
        let markets = vec![
            spot("BTCUSDT", "USDT"),
            spot("ETHBTC", "BTC"),
            Market::new("LUNAUSDT", "USDT", false, InstrumentKind::Spot),
            Market::new("BTCUSDT_PERP", "USDT", true, InstrumentKind::Other),
            spot("ADAUSDT", "USDT"),
        ];
        assert_eq!(
            select_symbols(&markets, "USDT", 400),
            vec!["ADAUSDT".to_string(), "BTCUSDT".to_string()]
        );
    }

    #[test]
    fn output_is_sorted_unique_and_capped() {
        let markets = vec![
            spot("XRPUSDT", "USDT"),
            spot("BTCUSDT", "USDT"),
            spot("XRPUSDT", "USDT"),
            spot("ETHUSDT", "USDT"),
            spot("BTCUSDT", "USDT"),
            spot("ADAUSDT", "USDT"),
        ];

        let all = select_symbols(&markets, "USDT", 400);
        assert_eq!(all, vec!["ADAUSDT", "BTCUSDT", "ETHUSDT", "XRPUSDT"]);

        let capped = select_symbols(&markets, "USDT", 2);
        assert_eq!(capped, vec!["ADAUSDT", "BTCUSDT"]);

        assert!(select_symbols(&markets, "USDT", 0).is_empty());
    }

    #[test]
    fn quote_match_is_exact() {
        let markets = vec![spot("BTCUSDT", "USDT"), spot("BTCUSDC", "USDC")];
        assert!(select_symbols(&markets, "usdt", 10).is_empty());
    }
}
