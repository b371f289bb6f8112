mod pipeline;
mod scanner;
mod throttle;

pub use pipeline::run_scan;
pub use scanner::{ScanSummary, Scanner, SkipReason, SymbolOutcome, evaluate_series};
pub use throttle::Throttle;
