//! Plot visualization configuration

use eframe::egui::Color32;

pub struct PlotConfig {
    // --- TOP COINS BAR CHART ---
    /// Bar fill, rgba(30, 64, 175, 0.6)
    pub market_cap_bar_fill: Color32,
    /// Bar outline, rgb(30, 64, 175)
    pub market_cap_bar_border: Color32,
    pub market_cap_bar_border_width: f32,
    /// Bar width as a fraction of one x step (0.0 to 1.0)
    pub bar_width_pct: f64,

    // --- LINE CHARTS ---
    pub overview_line_color: Color32,
    pub analyst_line_color: Color32,
    pub line_width: f32,

    /// Target count of labelled x ticks before labels start thinning out.
    pub x_label_target_count: f64,
    pub chart_height: f32,

    // --- SEMANTIC COLORS ---
    pub color_profit: Color32,
    pub color_loss: Color32,
    pub color_info: Color32,
    pub color_warning: Color32,

    pub color_text_neutral: Color32, // Main values
    pub color_text_subdued: Color32, // Explanations/Context
}

pub const PLOT_CONFIG: PlotConfig = PlotConfig {
    // rgba(30, 64, 175, 0.6), premultiplied so it can stay const
    market_cap_bar_fill: Color32::from_rgba_premultiplied(18, 38, 105, 153),
    market_cap_bar_border: Color32::from_rgb(30, 64, 175),
    market_cap_bar_border_width: 1.0,
    bar_width_pct: 0.8, // 80% width leaves a small gap between bars

    overview_line_color: Color32::from_rgb(0x25, 0x63, 0xeb), // #2563eb
    analyst_line_color: Color32::from_rgb(0x16, 0xa3, 0x4a),  // #16a34a
    line_width: 2.0,

    x_label_target_count: 10.0,
    chart_height: 360.0,

    color_profit: Color32::from_rgb(100, 255, 100),
    color_loss: Color32::from_rgb(255, 80, 80),
    color_info: Color32::from_rgb(173, 216, 230), // Light Blue
    color_warning: Color32::from_rgb(255, 215, 0), // Gold/Yellow

    color_text_neutral: Color32::LIGHT_GRAY,
    color_text_subdued: Color32::GRAY,
};
