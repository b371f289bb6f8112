use crate::{
    config::{EPSILON, PriceChangePct, VolMultiplier},
    domain::CandleSeries,
};

/// Early volume spike on the most recent candle of `series`.
///
/// Holds when both:
/// - volume[last] >= `volume_multiplier` * mean(volume over the `lookback` candles before it)
/// - (close[last] - close[last - 1]) / close[last - 1] <= `max_price_change`
///
/// Only the upper side of the price move is bounded, so a surge on a falling
/// candle still counts. Series shorter than `lookback + 1` never match.
pub fn detect(
    series: &CandleSeries,
    lookback: usize,
    volume_multiplier: VolMultiplier,
    max_price_change: PriceChangePct,
) -> bool {
    // Need at least one previous close for the price change, even with lookback 0.
    if series.len() < lookback.max(1) + 1 {
        return false;
    }
    let idx = series.len() - 1;
    let current = &series[idx];

    let vol_avg = if lookback == 0 {
        0.0
    } else {
        let window = &series[idx - lookback..idx];
        window
            .iter()
            .map(|c| c.base_asset_volume.value())
            .sum::<f64>()
            / lookback as f64
    };
    let vol_cond =
        current.base_asset_volume.value() >= volume_multiplier.value() * vol_avg.max(EPSILON);

    let price_change = PriceChangePct::calculate(current.close_price, series[idx - 1].close_price);
    let price_cond = price_change <= max_price_change;

    vol_cond && price_cond
}
