use eframe::egui::{Context, Id, Key, Modal, TextEdit, Ui};

use crate::{
    config::{DF, PLOT_CONFIG},
    data::{AnalystTask, Backend, TaskPoll},
    domain::{CoinSnapshot, PricePoint, Symbol, latest_snapshot},
    error::{FetchResult, InputError},
    ui::{
        UI_CONFIG, UI_TEXT, UiStyleExt,
        chart::{Chart, ChartSlot, analyst_chart},
        table::DirectionColor,
        views::{LoadStatus, render_status},
    },
    utils::{format_change, format_usd, now_local_hms},
};

/// Request currently in flight, tagged with the generation it was issued under.
struct PendingAnalyst {
    generation: u64,
    symbol: Symbol,
    task: AnalystTask,
}

/// What the page shows for the last successfully loaded symbol.
struct ShownSymbol {
    symbol: Symbol,
    point_count: usize,
    snapshot: Option<(String, CoinSnapshot)>,
}

pub struct AnalystView {
    backend: Backend,
    symbol_input: String,
    chart: ChartSlot<Chart>,
    status: LoadStatus,
    pending: Option<PendingAnalyst>,
    generation: u64,
    shown: Option<ShownSymbol>,
    alert: Option<String>,
    updated_at: Option<String>,
}

impl AnalystView {
    pub fn new(backend: Backend) -> Self {
        Self {
            backend,
            symbol_input: String::new(),
            chart: ChartSlot::new("analyst"),
            status: LoadStatus::Idle,
            pending: None,
            generation: 0,
            shown: None,
            alert: None,
            updated_at: None,
        }
    }

    pub fn set_symbol_input(&mut self, raw: impl Into<String>) {
        self.symbol_input = raw.into();
    }

    /// Reads the symbol box and fetches its history. An empty box opens the alert
    /// and issues no request. A newer load supersedes any request still in flight.
    pub fn load(&mut self, ctx: &Context) -> Result<(), InputError> {
        let symbol = match Symbol::parse(&self.symbol_input) {
            Ok(symbol) => symbol,
            Err(err) => {
                self.alert = Some(err.to_string());
                return Err(err);
            }
        };

        if let Some(stale) = self.pending.take() {
            if DF.log_stale_results {
                log::info!(
                    "analyst request #{} for {} superseded by {}",
                    stale.generation,
                    stale.symbol,
                    symbol
                );
            }
            stale.task.abort();
        }

        self.generation += 1;
        let task = self.backend.fetch_analyst(ctx, symbol.clone());
        self.pending = Some(PendingAnalyst {
            generation: self.generation,
            symbol,
            task,
        });
        self.status = LoadStatus::Loading;
        Ok(())
    }

    pub fn poll(&mut self, ctx: &Context) {
        let Some(pending) = &self.pending else {
            return;
        };
        match pending.task.try_take() {
            TaskPoll::Pending => {}
            TaskPoll::Ready(result) => {
                if let Some(done) = self.pending.take() {
                    self.apply(ctx, done.generation, done.symbol, result);
                }
            }
            TaskPoll::Lost => {
                self.pending = None;
                self.status = LoadStatus::lost();
            }
        }
    }

    /// Applies a result issued under `generation`. Anything but the newest generation is dropped.
    pub fn apply(
        &mut self,
        ctx: &Context,
        generation: u64,
        symbol: Symbol,
        result: FetchResult<Vec<PricePoint>>,
    ) {
        if generation != self.generation {
            if DF.log_stale_results {
                log::info!(
                    "dropping stale analyst result #{} for {} (current #{})",
                    generation,
                    symbol,
                    self.generation
                );
            }
            return;
        }

        match result {
            Ok(points) => {
                self.chart
                    .replace(ctx, Chart::new("analyst", analyst_chart(&symbol, &points)));
                let snapshot = latest_snapshot(&points).and_then(|p| {
                    p.snapshot
                        .clone()
                        .map(|snapshot| (p.date_key.clone(), snapshot))
                });
                self.shown = Some(ShownSymbol {
                    symbol,
                    point_count: points.len(),
                    snapshot,
                });
                self.status = LoadStatus::Loaded;
                self.updated_at = Some(now_local_hms());
            }
            Err(err) => {
                log::warn!("analyst load for {} failed: {}", symbol, err);
                self.status = LoadStatus::failed(&err);
            }
        }
    }

    pub fn render(&mut self, ui: &mut Ui) {
        ui.heading(UI_TEXT.analyst_heading.as_str());
        ui.add_space(4.0);

        let mut submit = false;
        ui.horizontal(|ui| {
            ui.label(UI_TEXT.analyst_symbol_label.as_str());
            let response = ui.add(
                TextEdit::singleline(&mut self.symbol_input)
                    .hint_text(UI_TEXT.analyst_symbol_hint.as_str())
                    .desired_width(UI_CONFIG.symbol_input_width),
            );
            if response.lost_focus() && ui.input(|i| i.key_pressed(Key::Enter)) {
                submit = true;
            }
            if ui.button(UI_TEXT.analyst_button.as_str()).clicked() {
                submit = true;
            }
        });
        if submit {
            // The alert carries the message
            let _ = self.load(ui.ctx());
        }

        render_status(ui, &self.status, self.updated_at.as_deref());
        ui.add_space(8.0);

        if let Some(shown) = &self.shown {
            if let Some((date_key, snapshot)) = &shown.snapshot {
                render_snapshot(ui, date_key, snapshot);
                ui.add_space(8.0);
            }
            if shown.point_count == 0 {
                ui.label_subdued(format!(
                    "{} {}",
                    UI_TEXT.analyst_no_history,
                    shown.symbol.display()
                ));
            }
        }

        if let Some(chart) = self.chart.get() {
            ui.label_subheader(&chart.model().series_label);
            chart.show(ui);
        }

        self.render_alert(ui.ctx());
    }

    fn render_alert(&mut self, ctx: &Context) {
        let Some(message) = &self.alert else {
            return;
        };
        let modal = Modal::new(Id::new("analyst_alert")).show(ctx, |ui| {
            ui.set_width(260.0);
            ui.heading(UI_TEXT.alert_title.as_str());
            ui.add_space(6.0);
            ui.label(message.as_str());
            ui.add_space(10.0);
            ui.button(UI_TEXT.alert_ok.as_str()).clicked()
        });
        if modal.inner || modal.should_close() {
            self.alert = None;
        }
    }

    pub fn close_alert(&mut self) {
        self.alert = None;
    }

    pub fn alert(&self) -> Option<&str> {
        self.alert.as_deref()
    }

    pub fn status(&self) -> &LoadStatus {
        &self.status
    }

    pub fn chart(&self) -> &ChartSlot<Chart> {
        &self.chart
    }

    pub fn is_loading(&self) -> bool {
        self.pending.is_some()
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }
}

fn render_snapshot(ui: &mut Ui, date_key: &str, snapshot: &CoinSnapshot) {
    let neutral = PLOT_CONFIG.color_text_neutral;
    ui.horizontal_wrapped(|ui| {
        ui.label_subdued(date_key);
        if let Some(name) = &snapshot.coin_name {
            ui.metric(&UI_TEXT.analyst_snapshot_name, name, neutral);
        }
        if let Some(rank) = snapshot.rank {
            ui.metric(&UI_TEXT.analyst_snapshot_rank, &rank.to_string(), neutral);
        }
        if let Some(cap) = snapshot.market_cap {
            ui.metric(&UI_TEXT.analyst_snapshot_market_cap, &format_usd(cap), neutral);
        }
        if let Some(volume) = snapshot.volume_24h {
            ui.metric(&UI_TEXT.analyst_snapshot_volume, &format_usd(volume), neutral);
        }
        if let Some(pct) = snapshot.pct_change_24h {
            let (text, direction) = format_change(pct);
            ui.metric(&UI_TEXT.analyst_snapshot_change, &text, direction.color());
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::views::testing::{FakeApi, backend, ctx, poll_until};
    use std::{sync::Arc, time::Duration};

    fn settle(view: &mut AnalystView, ctx: &Context) {
        poll_until(|| {
            view.poll(ctx);
            !view.is_loading()
        });
    }

    #[test]
    fn blank_symbol_alerts_without_any_request() {
        let api = Arc::new(FakeApi::default());
        let ctx = ctx();
        let mut view = AnalystView::new(backend(api.clone()));

        for raw in ["", "   ", "\t\n"] {
            view.set_symbol_input(raw);
            assert_eq!(view.load(&ctx), Err(InputError::EmptySymbol));
        }

        assert_eq!(view.alert(), Some("Enter a symbol first!"));
        assert!(!view.is_loading());
        assert_eq!(view.generation(), 0);
        std::thread::sleep(Duration::from_millis(50));
        assert!(api.calls().is_empty());
    }

    #[test]
    fn symbol_is_trimmed_and_charted_uppercase() {
        let api = Arc::new(FakeApi::default());
        let ctx = ctx();
        let mut view = AnalystView::new(backend(api.clone()));

        view.set_symbol_input("  eth ");
        view.load(&ctx).unwrap();
        settle(&mut view, &ctx);

        assert_eq!(api.calls(), ["analyst:eth"]);
        let model = view.chart().get().unwrap().model();
        assert_eq!(model.series_label, "ETH Price");
        assert_eq!(model.values, [100.0, 101.0]);
    }

    #[test]
    fn consecutive_loads_leave_one_live_chart_for_the_latest_symbol() {
        let api = Arc::new(FakeApi::default());
        let ctx = ctx();
        let mut view = AnalystView::new(backend(api));

        for raw in ["btc", "eth"] {
            view.set_symbol_input(raw);
            view.load(&ctx).unwrap();
            settle(&mut view, &ctx);
        }

        assert_eq!(view.chart().created(), 2);
        assert_eq!(view.chart().live_count(), 1);
        assert_eq!(
            view.chart().get().unwrap().model().series_label,
            "ETH Price"
        );
    }

    #[test]
    fn slow_earlier_request_cannot_overwrite_a_newer_one() {
        let api = Arc::new(FakeApi {
            slow_symbols: vec!["doge"],
            ..Default::default()
        });
        let ctx = ctx();
        let mut view = AnalystView::new(backend(api.clone()));

        view.set_symbol_input("doge");
        view.load(&ctx).unwrap();
        view.set_symbol_input("eth");
        view.load(&ctx).unwrap();
        settle(&mut view, &ctx);

        // Give the superseded request time to have answered, were it still alive
        std::thread::sleep(Duration::from_millis(400));
        view.poll(&ctx);

        assert_eq!(view.chart().created(), 1);
        assert_eq!(
            view.chart().get().unwrap().model().series_label,
            "ETH Price"
        );
        assert!(!api.calls().contains(&"analyst:doge".to_string()));
    }

    #[test]
    fn stale_generation_result_is_dropped() {
        let api = Arc::new(FakeApi::default());
        let ctx = ctx();
        let mut view = AnalystView::new(backend(api));

        view.set_symbol_input("btc");
        view.load(&ctx).unwrap();
        view.set_symbol_input("eth");
        view.load(&ctx).unwrap();
        settle(&mut view, &ctx);

        let btc = Symbol::parse("btc").unwrap();
        view.apply(&ctx, 1, btc, Ok(vec![PricePoint::new("20240101", 1.0)]));

        assert_eq!(view.chart().created(), 1);
        assert_eq!(
            view.chart().get().unwrap().model().series_label,
            "ETH Price"
        );
    }

    #[test]
    fn unknown_symbol_renders_an_empty_chart() {
        let api = Arc::new(FakeApi::default());
        let ctx = ctx();
        let mut view = AnalystView::new(backend(api));

        view.set_symbol_input("nope");
        view.load(&ctx).unwrap();
        settle(&mut view, &ctx);

        assert_eq!(view.status(), &LoadStatus::Loaded);
        assert!(view.chart().get().unwrap().model().is_empty());
    }
}
