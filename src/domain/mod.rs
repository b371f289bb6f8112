pub mod candle;
pub mod market;
pub mod spike_match;
pub mod timeframe;

pub use candle::{Candle, CandleSeries};
pub use market::{InstrumentKind, Market};
pub use spike_match::SpikeMatch;
pub use timeframe::{Timeframe, UnsupportedTimeframe};
