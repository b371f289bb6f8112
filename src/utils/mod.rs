mod format;
mod time_utils;

pub use format::{format_grouped_int, format_sig};
pub use time_utils::TimeUtils;
