//! Debugging feature flags.

#[allow(dead_code)]
pub struct LogFlags {
    /// Log every outgoing request with its latency.
    pub log_requests: bool,

    /// Chart create/dispose events per slot.
    pub log_chart_lifecycle: bool,

    /// Page switches, including rejected page ids.
    pub log_navigation: bool,

    /// Activate trace_time macro (for scope-level timing)
    pub log_performance: bool,

    /// Analyst results dropped because a newer request superseded them.
    pub log_stale_results: bool,
}

pub const DF: LogFlags = LogFlags {
    log_requests: true,
    log_chart_lifecycle: false,
    log_navigation: false,
    log_performance: false,
    log_stale_results: true,
};
