use eframe::egui::{Context, Ui};

use crate::{
    config::{DF, PLOT_CONFIG},
    data::{Backend, OverviewTask, TaskPoll},
    domain::{MarketPoint, latest_point},
    error::FetchResult,
    ui::{
        UI_TEXT, UiStyleExt,
        chart::{Chart, ChartSlot, overview_chart},
        views::{LoadStatus, render_page_header, render_status},
    },
    utils::{format_number, format_usd, now_local_hms},
};

pub struct OverviewView {
    backend: Backend,
    points: Vec<MarketPoint>,
    chart: ChartSlot<Chart>,
    status: LoadStatus,
    task: Option<OverviewTask>,
    updated_at: Option<String>,
}

impl OverviewView {
    pub fn new(backend: Backend) -> Self {
        Self {
            backend,
            points: Vec::new(),
            chart: ChartSlot::new("overview"),
            status: LoadStatus::Idle,
            task: None,
            updated_at: None,
        }
    }

    /// Starts a fetch. A trigger while one is already in flight is ignored and returns false.
    pub fn load(&mut self, ctx: &Context) -> bool {
        if self.task.is_some() {
            if DF.log_requests {
                log::info!("overview load already in flight, ignoring trigger");
            }
            return false;
        }
        self.task = Some(self.backend.fetch_overview(ctx));
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

    pub fn apply(&mut self, ctx: &Context, result: FetchResult<Vec<MarketPoint>>) {
        match result {
            Ok(points) => {
                let model = crate::trace_time!("build overview chart", 2_000, {
                    overview_chart(&points)
                });
                self.chart.replace(ctx, Chart::new("overview", model));
                self.points = points;
                self.status = LoadStatus::Loaded;
                self.updated_at = Some(now_local_hms());
            }
            Err(err) => {
                log::warn!("overview load failed: {}", err);
                self.status = LoadStatus::failed(&err);
            }
        }
    }

    /// Latest point's optional columns, as (label, value) pairs ready for display.
    pub fn summary(&self) -> Vec<(&str, String)> {
        let Some(latest) = latest_point(&self.points).filter(|p| p.has_summary()) else {
            return Vec::new();
        };

        let mut items = vec![(UI_TEXT.overview_latest.as_str(), latest.date_key.clone())];
        if let Some(coins) = latest.total_coins {
            items.push((UI_TEXT.overview_total_coins.as_str(), coins.to_string()));
        }
        if let Some(volume) = latest.total_volume {
            items.push((UI_TEXT.overview_total_volume.as_str(), format_usd(volume)));
        }
        if let Some(leader) = &latest.top_coin {
            let text = match latest.top_coin_market_cap {
                Some(cap) => format!("{} ({})", leader, format_usd(cap)),
                None => leader.clone(),
            };
            items.push((UI_TEXT.overview_leader.as_str(), text));
        }
        items
    }

    pub fn render(&mut self, ui: &mut Ui) {
        if render_page_header(ui, &UI_TEXT.overview_heading, &self.status) {
            self.load(ui.ctx());
        }
        render_status(ui, &self.status, self.updated_at.as_deref());
        ui.add_space(8.0);

        let summary = self.summary();
        if !summary.is_empty() {
            ui.horizontal_wrapped(|ui| {
                for (label, value) in &summary {
                    ui.metric(label, value, PLOT_CONFIG.color_text_neutral);
                    ui.add_space(12.0);
                }
            });
            ui.add_space(8.0);
        }

        match self.chart.get() {
            Some(chart) => {
                ui.label_subheader(format!(
                    "{} ({} points)",
                    chart.model().series_label,
                    format_number(chart.model().len() as f64)
                ));
                chart.show(ui);
            }
            None if !self.status.is_loading() => {
                ui.label_subdued(UI_TEXT.label_no_data.as_str());
            }
            None => {}
        }
    }

    pub fn status(&self) -> &LoadStatus {
        &self.status
    }

    pub fn points(&self) -> &[MarketPoint] {
        &self.points
    }

    pub fn chart(&self) -> &ChartSlot<Chart> {
        &self.chart
    }

    pub fn is_loading(&self) -> bool {
        self.task.is_some()
    }
}
