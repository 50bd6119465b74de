//! Chart models, their egui_plot rendering, and the one-live-chart-per-slot lifecycle.

use std::sync::atomic::{AtomicU64, Ordering};

use eframe::egui::{Color32, Context, Id, Stroke, Ui};
use egui_plot::{AxisHints, Bar, BarChart, GridMark, Legend, Line, Plot, PlotMemory, PlotPoints};

use crate::{
    config::{DF, PLOT_CONFIG},
    domain::{CoinRow, MarketPoint, PricePoint, Symbol},
    ui::UI_TEXT,
    utils::format_number,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartKind {
    Bar,
    Line,
}

/// Everything needed to draw one single-series chart. Values are raw, never rescaled.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartModel {
    pub kind: ChartKind,
    pub labels: Vec<String>,
    pub series_label: String,
    pub values: Vec<f64>,
    pub color: Color32,
}

impl ChartModel {
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// The x label under index `x`, if `x` sits on a data point.
    pub fn label_at(&self, x: f64) -> Option<&str> {
        label_at(&self.labels, x)
    }
}

fn label_at(labels: &[String], x: f64) -> Option<&str> {
    let idx = x.round();
    if (x - idx).abs() > 1e-6 || idx < 0.0 {
        return None;
    }
    labels.get(idx as usize).map(String::as_str)
}

pub fn top_coins_chart(rows: &[CoinRow]) -> ChartModel {
    ChartModel {
        kind: ChartKind::Bar,
        labels: rows.iter().map(CoinRow::display_symbol).collect(),
        series_label: UI_TEXT.series_market_cap.clone(),
        values: rows.iter().map(|r| r.market_cap).collect(),
        color: PLOT_CONFIG.market_cap_bar_fill,
    }
}

/// Keeps the sequence exactly as received.
pub fn overview_chart(points: &[MarketPoint]) -> ChartModel {
    ChartModel {
        kind: ChartKind::Line,
        labels: points.iter().map(|p| p.date_key.clone()).collect(),
        series_label: UI_TEXT.series_total_market_cap.clone(),
        values: points.iter().map(|p| p.total_market_cap).collect(),
        color: PLOT_CONFIG.overview_line_color,
    }
}

pub fn analyst_chart(symbol: &Symbol, points: &[PricePoint]) -> ChartModel {
    ChartModel {
        kind: ChartKind::Line,
        labels: points.iter().map(|p| p.date_key.clone()).collect(),
        series_label: format!("{} Price", symbol.display()),
        values: points.iter().map(|p| p.price).collect(),
        color: PLOT_CONFIG.analyst_line_color,
    }
}

// Helper: Calculate a human-friendly step size (1, 2, 5, 10, 20, 50...)
fn calculate_adaptive_step(range: f64, target_count: f64) -> f64 {
    let raw_step = range / target_count.max(1.0);
    if !raw_step.is_finite() || raw_step <= 0.0 {
        return 1.0;
    }
    let mag = 10.0_f64.powi(raw_step.log10().floor() as i32);
    let normalized = raw_step / mag;

    let nice_step = if normalized < 1.5 {
        1.0
    } else if normalized < 3.0 {
        2.0
    } else if normalized < 7.0 {
        5.0
    } else {
        10.0
    };

    // Never finer than one label per data point
    (nice_step * mag).max(1.0)
}

/// Marks on whole data indices only, spaced so that roughly `target_count` fit the visible range.
fn x_grid_marks(min: f64, max: f64, target_count: f64) -> Vec<GridMark> {
    let step = calculate_adaptive_step(max - min, target_count);
    let start = (min.max(0.0) / step).ceil() as i64;
    let end = (max / step).floor() as i64;
    (start..=end)
        .map(|i| GridMark {
            value: i as f64 * step,
            step_size: step,
        })
        .collect()
}

/// Something that holds renderer state which must be released explicitly.
pub trait ChartInstance {
    fn dispose(self, ctx: &Context);
}

static NEXT_CHART_SERIAL: AtomicU64 = AtomicU64::new(0);

/// A live chart: a model plus the plot id its egui memory lives under.
pub struct Chart {
    id: Id,
    model: ChartModel,
}

impl Chart {
    /// Every chart gets a fresh id, so a replacement never inherits zoom or bounds.
    pub fn new(slot: &'static str, model: ChartModel) -> Self {
        let serial = NEXT_CHART_SERIAL.fetch_add(1, Ordering::Relaxed);
        Self {
            id: Id::new(("chart", slot, serial)),
            model,
        }
    }

    pub fn id(&self) -> Id {
        self.id
    }

    pub fn model(&self) -> &ChartModel {
        &self.model
    }

    pub fn show(&self, ui: &mut Ui) {
        let labels = self.model.labels.clone();
        let hover_labels = self.model.labels.clone();

        let x_axis = AxisHints::new_x().formatter(move |mark, _range| {
            label_at(&labels, mark.value).unwrap_or_default().to_string()
        });
        let y_axis = AxisHints::new_y().formatter(|mark, _range| format_number(mark.value));

        Plot::new(self.id)
            .id(self.id)
            .height(PLOT_CONFIG.chart_height)
            .legend(Legend::default())
            .custom_x_axes(vec![x_axis])
            .custom_y_axes(vec![y_axis])
            .x_grid_spacer(|input| {
                let (min, max) = input.bounds;
                x_grid_marks(min, max, PLOT_CONFIG.x_label_target_count)
            })
            .label_formatter(move |_name, point| {
                match label_at(&hover_labels, point.x.round()) {
                    Some(label) => format!("{}\n{}", label, format_number(point.y)),
                    None => String::new(),
                }
            })
            .allow_scroll(false)
            .show(ui, |plot_ui| match self.model.kind {
                ChartKind::Bar => {
                    let bars = self
                        .model
                        .values
                        .iter()
                        .zip(&self.model.labels)
                        .enumerate()
                        .map(|(i, (value, label))| {
                            Bar::new(i as f64, *value)
                                .name(label)
                                .fill(self.model.color)
                                .stroke(Stroke::new(
                                    PLOT_CONFIG.market_cap_bar_border_width,
                                    PLOT_CONFIG.market_cap_bar_border,
                                ))
                                .width(PLOT_CONFIG.bar_width_pct)
                        })
                        .collect();
                    plot_ui.bar_chart(
                        BarChart::new(self.model.series_label.clone(), bars)
                            .color(PLOT_CONFIG.market_cap_bar_border),
                    );
                }
                ChartKind::Line => {
                    let points: PlotPoints = self
                        .model
                        .values
                        .iter()
                        .enumerate()
                        .map(|(i, v)| [i as f64, *v])
                        .collect();
                    plot_ui.line(
                        Line::new(self.model.series_label.clone(), points)
                            .color(self.model.color)
                            .width(PLOT_CONFIG.line_width),
                    );
                }
            });
    }
}

impl ChartInstance for Chart {
    fn dispose(self, ctx: &Context) {
        ctx.data_mut(|d| d.remove::<PlotMemory>(self.id));
    }
}

/// Holds at most one live chart. Replacing disposes the old instance before storing the new one.
pub struct ChartSlot<C: ChartInstance> {
    name: &'static str,
    current: Option<C>,
    ctx: Option<Context>,
    created: usize,
    disposed: usize,
}

impl<C: ChartInstance> ChartSlot<C> {
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            current: None,
            ctx: None,
            created: 0,
            disposed: 0,
        }
    }

    pub fn replace(&mut self, ctx: &Context, chart: C) {
        self.clear(ctx);
        self.current = Some(chart);
        self.ctx = Some(ctx.clone());
        self.created += 1;
        if DF.log_chart_lifecycle {
            log::info!("[{}] chart #{} created", self.name, self.created);
        }
    }

    /// Disposes the live chart, if any.
    pub fn clear(&mut self, ctx: &Context) {
        if let Some(old) = self.current.take() {
            old.dispose(ctx);
            self.disposed += 1;
            if DF.log_chart_lifecycle {
                log::info!("[{}] chart disposed ({} so far)", self.name, self.disposed);
            }
        }
    }

    pub fn get(&self) -> Option<&C> {
        self.current.as_ref()
    }

    pub fn is_live(&self) -> bool {
        self.current.is_some()
    }

    /// Charts created minus charts disposed. Never above one.
    pub fn live_count(&self) -> usize {
        self.created - self.disposed
    }

    pub fn created(&self) -> usize {
        self.created
    }
}

/// A slot going away takes its live chart with it.
impl<C: ChartInstance> Drop for ChartSlot<C> {
    fn drop(&mut self) {
        if let Some(ctx) = self.ctx.take() {
            self.clear(&ctx);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use eframe::egui::{CentralPanel, RawInput};
    use std::{cell::RefCell, rc::Rc};

    fn btc_eth() -> Vec<CoinRow> {
        ["btc", "eth"]
            .iter()
            .enumerate()
            .map(|(i, s)| CoinRow {
                rank: i as u32 + 1,
                name: s.to_string(),
                symbol: s.to_string(),
                price: 1.0,
                market_cap: 1.2e12 / (i as f64 + 1.0),
                volume_24h: 1.0,
                pct_change_24h: 0.0,
            })
            .collect()
    }

    #[test]
    fn top_coins_chart_uses_uppercase_symbols_and_raw_caps() {
        let model = top_coins_chart(&btc_eth());
        assert_eq!(model.kind, ChartKind::Bar);
        assert_eq!(model.labels, ["BTC", "ETH"]);
        assert_eq!(model.values, [1.2e12, 6e11]);
        assert_eq!(model.series_label, "Market Cap (USD)");
    }

    #[test]
    fn overview_chart_keeps_received_order() {
        let points = vec![
            MarketPoint::new("2024-01-02", 1.15e12),
            MarketPoint::new("2024-01-01", 1.1e12),
        ];
        let model = overview_chart(&points);
        assert_eq!(model.labels, ["2024-01-02", "2024-01-01"]);
        assert_eq!(model.values, [1.15e12, 1.1e12]);
        assert_eq!(model.series_label, "Total Market Cap");
        assert_eq!(model.color, PLOT_CONFIG.overview_line_color);
    }

    #[test]
    fn analyst_chart_labels_series_with_symbol() {
        let symbol = Symbol::parse("eth").unwrap();
        let model = analyst_chart(&symbol, &[PricePoint::new("20240101", 2300.5)]);
        assert_eq!(model.series_label, "ETH Price");
        assert_eq!(model.kind, ChartKind::Line);

        let empty = analyst_chart(&symbol, &[]);
        assert!(empty.is_empty());
    }

    #[test]
    fn label_lookup_only_on_whole_indices() {
        let model = top_coins_chart(&btc_eth());
        assert_eq!(model.label_at(0.0), Some("BTC"));
        assert_eq!(model.label_at(1.0), Some("ETH"));
        assert_eq!(model.label_at(0.5), None);
        assert_eq!(model.label_at(-1.0), None);
        assert_eq!(model.label_at(2.0), None);
    }

    #[test]
    fn adaptive_step_is_human_friendly() {
        assert_eq!(calculate_adaptive_step(5.0, 10.0), 1.0);
        assert_eq!(calculate_adaptive_step(100.0, 10.0), 10.0);
        assert_eq!(calculate_adaptive_step(250.0, 10.0), 20.0);
        assert_eq!(calculate_adaptive_step(0.0, 10.0), 1.0);
    }

    struct Tracked {
        tag: &'static str,
        log: Rc<RefCell<Vec<String>>>,
    }

    impl ChartInstance for Tracked {
        fn dispose(self, _ctx: &Context) {
            self.log.borrow_mut().push(format!("dispose {}", self.tag));
        }
    }

    #[test]
    fn slot_disposes_previous_before_storing_next() {
        let ctx = Context::default();
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut slot = ChartSlot::new("test");
        assert!(!slot.is_live());

        for tag in ["a", "b", "c"] {
            slot.replace(&ctx, Tracked { tag, log: log.clone() });
            assert_eq!(slot.live_count(), 1);
        }
        assert_eq!(*log.borrow(), ["dispose a", "dispose b"]);
        assert_eq!(slot.get().map(|t| t.tag), Some("c"));
        assert_eq!(slot.created(), 3);

        slot.clear(&ctx);
        assert_eq!(slot.live_count(), 0);
        assert_eq!(log.borrow().last().map(String::as_str), Some("dispose c"));
    }

    #[test]
    fn disposing_a_shown_chart_releases_its_plot_memory() {
        let ctx = Context::default();
        let chart = Chart::new("test", top_coins_chart(&btc_eth()));
        let id = chart.id();

        let _ = ctx.run(RawInput::default(), |ctx| {
            CentralPanel::default().show(ctx, |ui| chart.show(ui));
        });
        assert!(PlotMemory::load(&ctx, id).is_some());

        chart.dispose(&ctx);
        assert!(PlotMemory::load(&ctx, id).is_none());
    }

    #[test]
    fn dropping_a_slot_disposes_its_live_chart() {
        let ctx = Context::default();
        let log = Rc::new(RefCell::new(Vec::new()));
        {
            let mut slot = ChartSlot::new("test");
            slot.replace(&ctx, Tracked { tag: "a", log: log.clone() });
            slot.replace(&ctx, Tracked { tag: "b", log: log.clone() });
        }
        assert_eq!(*log.borrow(), ["dispose a", "dispose b"]);

        let empty: ChartSlot<Tracked> = ChartSlot::new("empty");
        drop(empty);
        assert_eq!(log.borrow().len(), 2);
    }

    #[test]
    fn dropped_slot_releases_plot_memory() {
        let ctx = Context::default();
        let mut slot = ChartSlot::new("test");
        slot.replace(&ctx, Chart::new("test", top_coins_chart(&btc_eth())));
        let id = slot.get().unwrap().id();

        let _ = ctx.run(RawInput::default(), |ctx| {
            CentralPanel::default().show(ctx, |ui| slot.get().unwrap().show(ui));
        });
        assert!(PlotMemory::load(&ctx, id).is_some());

        drop(slot);
        assert!(PlotMemory::load(&ctx, id).is_none());
    }

    #[test]
    fn x_marks_stay_bounded_when_zoomed_out() {
        let target = PLOT_CONFIG.x_label_target_count;
        for half_width in [1e3, 1e5, 3e6, 1e12] {
            let marks = x_grid_marks(-half_width, half_width, target);
            assert!(
                marks.len() as f64 <= 2.0 * target + 1.0,
                "{} marks at +/-{}",
                marks.len(),
                half_width
            );
            assert!(marks.iter().all(|m| m.value >= 0.0));
        }
    }

    #[test]
    fn x_marks_sit_on_whole_indices_when_zoomed_in() {
        let marks = x_grid_marks(-0.5, 1.5, PLOT_CONFIG.x_label_target_count);
        let values: Vec<f64> = marks.iter().map(|m| m.value).collect();
        assert_eq!(values, [0.0, 1.0]);
        assert!(marks.iter().all(|m| m.step_size == 1.0));
    }

    #[test]
    fn charts_never_share_an_id() {
        let a = Chart::new("same", top_coins_chart(&[]));
        let b = Chart::new("same", top_coins_chart(&[]));
        assert_ne!(a.id(), b.id());
    }
}
