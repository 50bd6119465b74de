//! The three dashboard pages. Each view owns its data, its status and its chart slot.

mod analyst;
mod overview;
mod top_coins;

pub use analyst::AnalystView;
pub use overview::OverviewView;
pub use top_coins::TopCoinsView;

use eframe::egui::{Button, Ui};

use crate::{
    error::FetchError,
    ui::{UI_TEXT, UiStyleExt},
};

#[derive(Debug, Clone, Default, PartialEq)]
pub enum LoadStatus {
    #[default]
    Idle,
    Loading,
    Loaded,
    /// Shown inline; whatever was on screen before stays there.
    Failed(String),
}

impl LoadStatus {
    pub fn is_loading(&self) -> bool {
        matches!(self, LoadStatus::Loading)
    }

    pub(crate) fn failed(err: &FetchError) -> Self {
        LoadStatus::Failed(format!("{}: {}", UI_TEXT.label_load_failed, err))
    }

    pub(crate) fn lost() -> Self {
        LoadStatus::Failed(format!(
            "{}: request ended without a result",
            UI_TEXT.label_load_failed
        ))
    }
}

/// Page heading with a reload button. Returns true when reload was clicked.
pub(crate) fn render_page_header(ui: &mut Ui, title: &str, status: &LoadStatus) -> bool {
    let mut reload = false;
    ui.horizontal(|ui| {
        ui.heading(title);
        ui.add_space(12.0);
        reload = ui
            .add_enabled(!status.is_loading(), Button::new(UI_TEXT.label_reload.as_str()))
            .clicked();
    });
    reload
}

pub(crate) fn render_status(ui: &mut Ui, status: &LoadStatus, updated_at: Option<&str>) {
    match status {
        LoadStatus::Idle => {}
        LoadStatus::Loading => ui.loading_indicator(&UI_TEXT.label_loading),
        LoadStatus::Loaded => {
            if let Some(at) = updated_at {
                ui.label_subdued(format!("{} {}", UI_TEXT.label_updated, at));
            }
        }
        LoadStatus::Failed(message) => ui.label_error(message),
    }
}
