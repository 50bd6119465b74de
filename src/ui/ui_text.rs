use std::sync::LazyLock;

pub struct UiText {
    pub app_title: String,

    // --- NAVIGATION ---
    pub nav_top_coins: String,
    pub nav_overview: String,
    pub nav_analyst: String,
    pub nav_help: String,

    // --- TOP COINS ---
    pub top_coins_heading: String,
    pub top_coins_headers: [&'static str; 7],

    // --- OVERVIEW ---
    pub overview_heading: String,
    pub overview_latest: String,
    pub overview_total_coins: String,
    pub overview_total_volume: String,
    pub overview_leader: String,

    // --- ANALYST ---
    pub analyst_heading: String,
    pub analyst_symbol_label: String,
    pub analyst_symbol_hint: String,
    pub analyst_button: String,
    pub analyst_no_history: String,
    pub analyst_snapshot_name: String,
    pub analyst_snapshot_rank: String,
    pub analyst_snapshot_market_cap: String,
    pub analyst_snapshot_volume: String,
    pub analyst_snapshot_change: String,

    // --- PLOT LABELS ---
    pub series_market_cap: String,
    pub series_total_market_cap: String,

    // --- STATUS ---
    pub label_loading: String,
    pub label_reload: String,
    pub label_load_failed: String,
    pub label_no_data: String,
    pub label_updated: String,
    pub label_backend: String,

    // --- ALERT ---
    pub alert_title: String,
    pub alert_ok: String,

    // --- HELP ---
    pub help_title: String,
    pub help_shortcuts: &'static [(&'static str, &'static str)],
}

pub static UI_TEXT: LazyLock<UiText> = LazyLock::new(|| UiText {
    app_title: "Crypto Dashboard".to_string(),

    nav_top_coins: "Top Coins".to_string(),
    nav_overview: "Market Overview".to_string(),
    nav_analyst: "Coin Analyst".to_string(),
    nav_help: "Help".to_string(),

    top_coins_heading: "Top Coins by Market Cap".to_string(),
    top_coins_headers: [
        "#",
        "Name",
        "Symbol",
        "Price",
        "Market Cap",
        "Volume (24h)",
        "Change (24h)",
    ],

    overview_heading: "Total Market Cap Over Time".to_string(),
    overview_latest: "Latest".to_string(),
    overview_total_coins: "Coins".to_string(),
    overview_total_volume: "Volume".to_string(),
    overview_leader: "Leader".to_string(),

    analyst_heading: "Price History".to_string(),
    analyst_symbol_label: "Symbol".to_string(),
    analyst_symbol_hint: "e.g. BTC".to_string(),
    analyst_button: "Analyze".to_string(),
    analyst_no_history: "No price history for".to_string(),
    analyst_snapshot_name: "Name".to_string(),
    analyst_snapshot_rank: "Rank".to_string(),
    analyst_snapshot_market_cap: "Market Cap".to_string(),
    analyst_snapshot_volume: "Volume (24h)".to_string(),
    analyst_snapshot_change: "Change (24h)".to_string(),

    series_market_cap: "Market Cap (USD)".to_string(),
    series_total_market_cap: "Total Market Cap".to_string(),

    label_loading: "Loading...".to_string(),
    label_reload: "Reload".to_string(),
    label_load_failed: "Could not load data".to_string(),
    label_no_data: "No data yet".to_string(),
    label_updated: "Updated".to_string(),
    label_backend: "Backend".to_string(),

    alert_title: "Notice".to_string(),
    alert_ok: "OK".to_string(),

    help_title: "Keyboard Shortcuts".to_string(),
    help_shortcuts: &[
        ("1", "Top Coins"),
        ("2", "Market Overview"),
        ("3", "Coin Analyst"),
        ("R", "Reload current page"),
        ("H", "Toggle this help"),
        ("Esc", "Close help / alert"),
        ("Enter", "Analyze symbol (in the symbol box)"),
    ],
});
