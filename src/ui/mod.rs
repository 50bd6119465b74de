pub mod chart;
mod styles;
pub mod table;
mod ui_config;
mod ui_text;
pub mod views;

pub(crate) use styles::UiStyleExt;

pub use ui_config::{UI_CONFIG, UI_TEXT};
pub use views::{AnalystView, LoadStatus, OverviewView, TopCoinsView};
