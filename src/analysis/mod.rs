pub mod spike_detector;
pub mod symbol_selector;

pub use spike_detector::detect;
pub use symbol_selector::select_symbols;
