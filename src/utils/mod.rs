mod format;
mod perf;
mod time_utils;

pub use format::{format_change, format_number, format_usd};
pub use time_utils::{AppInstant, format_duration, now_local_hms};
