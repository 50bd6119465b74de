use eframe::egui::{Context, Ui};

use crate::{
    config::DF,
    data::{Backend, TaskPoll, TopCoinsTask},
    domain::CoinRow,
    error::FetchResult,
    ui::{
        UI_TEXT, UiStyleExt,
        chart::{Chart, ChartSlot, top_coins_chart},
        table::{CoinTableRow, render_coin_table},
        views::{LoadStatus, render_page_header, render_status},
    },
    utils::now_local_hms,
};

pub struct TopCoinsView {
    backend: Backend,
    rows: Vec<CoinTableRow>,
    chart: ChartSlot<Chart>,
    status: LoadStatus,
    task: Option<TopCoinsTask>,
    updated_at: Option<String>,
}

impl TopCoinsView {
    pub fn new(backend: Backend) -> Self {
        Self {
            backend,
            rows: Vec::new(),
            chart: ChartSlot::new("top-coins"),
            status: LoadStatus::Idle,
            task: None,
            updated_at: None,
        }
    }

    /// Starts a fetch. A trigger while one is already in flight is ignored and returns false.
    pub fn load(&mut self, ctx: &Context) -> bool {
        if self.task.is_some() {
            if DF.log_requests {
                log::info!("top coins load already in flight, ignoring trigger");
            }
            return false;
        }
        self.task = Some(self.backend.fetch_top_coins(ctx));
        self.status = LoadStatus::Loading;
        true
    }

    pub fn poll(&mut self, ctx: &Context) {
        let Some(task) = &self.task else {
            return;
        };
        match task.try_take() {
            TaskPoll::Pending => {}
            TaskPoll::Ready(result) => {
                self.task = None;
                self.apply(ctx, result);
            }
            TaskPoll::Lost => {
                self.task = None;
                self.status = LoadStatus::lost();
            }
        }
    }

    /// Success replaces table and chart. Failure leaves both untouched.
    pub fn apply(&mut self, ctx: &Context, result: FetchResult<Vec<CoinRow>>) {
        match result {
            Ok(coins) => {
                self.rows = crate::trace_time!("format top coins table", 2_000, {
                    coins.iter().map(CoinTableRow::from).collect::<Vec<_>>()
                });
                self.chart
                    .replace(ctx, Chart::new("top-coins", top_coins_chart(&coins)));
                self.status = LoadStatus::Loaded;
                self.updated_at = Some(now_local_hms());
            }
            Err(err) => {
                log::warn!("top coins load failed: {}", err);
                self.status = LoadStatus::failed(&err);
            }
        }
    }

    pub fn render(&mut self, ui: &mut Ui) {
        if render_page_header(ui, &UI_TEXT.top_coins_heading, &self.status) {
            self.load(ui.ctx());
        }
        render_status(ui, &self.status, self.updated_at.as_deref());
        ui.add_space(8.0);

        if self.rows.is_empty() && !self.chart.is_live() {
            if !self.status.is_loading() {
                ui.label_subdued(UI_TEXT.label_no_data.as_str());
            }
            return;
        }

        render_coin_table(ui, &self.rows);
        ui.add_space(16.0);
        if let Some(chart) = self.chart.get() {
            ui.label_subheader(&chart.model().series_label);
            chart.show(ui);
        }
    }

    pub fn status(&self) -> &LoadStatus {
        &self.status
    }

    pub fn rows(&self) -> &[CoinTableRow] {
        &self.rows
    }

    pub fn chart(&self) -> &ChartSlot<Chart> {
        &self.chart
    }

    pub fn is_loading(&self) -> bool {
        self.task.is_some()
    }
}
