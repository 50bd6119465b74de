use chrono::Local;

/// Monotonic clock that also works in the browser.
pub type AppInstant = web_time::Instant;

pub const STANDARD_TIME_FORMAT: &str = "%H:%M:%S";

/// Wall-clock time for "last updated" labels.
pub fn now_local_hms() -> String {
    Local::now().format(STANDARD_TIME_FORMAT).to_string()
}

pub fn format_duration(ms: u128) -> String {
    if ms < 1000 {
        return format!("{}ms", ms);
    }
    let secs = ms as f64 / 1000.0;
    if secs < 60.0 {
        return format!("{:.1}s", secs);
    }
    format!("{}m {}s", ms / 60_000, (ms / 1000) % 60)
}
