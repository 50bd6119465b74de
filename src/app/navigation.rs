use std::str::FromStr;

use eframe::egui::Key;
use strum_macros::{AsRefStr, Display, EnumIter, EnumString};

use crate::{config::DF, error::NavError, ui::UI_TEXT};

/// Dashboard pages. The kebab-case form is the page id (`top-coins`, `overview`, `analyst`).
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Display, EnumIter, EnumString, AsRefStr,
)]
#[strum(serialize_all = "kebab-case")]
pub enum Page {
    #[default]
    TopCoins,
    Overview,
    Analyst,
}

impl Page {
    pub fn title(&self) -> &'static str {
        match self {
            Page::TopCoins => &UI_TEXT.nav_top_coins,
            Page::Overview => &UI_TEXT.nav_overview,
            Page::Analyst => &UI_TEXT.nav_analyst,
        }
    }

    pub fn shortcut(&self) -> Key {
        match self {
            Page::TopCoins => Key::Num1,
            Page::Overview => Key::Num2,
            Page::Analyst => Key::Num3,
        }
    }
}

/// Tracks the single visible page.
#[derive(Debug, Default)]
pub struct Navigator {
    current: Page,
}

impl Navigator {
    pub fn new(start: Page) -> Self {
        Self { current: start }
    }

    pub fn current(&self) -> Page {
        self.current
    }

    pub fn show(&mut self, page: Page) {
        if DF.log_navigation && page != self.current {
            log::info!("page {} -> {}", self.current, page);
        }
        self.current = page;
    }

    /// Switches by page id. An unknown id leaves the current page visible.
    pub fn show_page(&mut self, id: &str) -> Result<Page, NavError> {
        match Page::from_str(id) {
            Ok(page) => {
                self.show(page);
                Ok(page)
            }
            Err(_) => {
                log::warn!("ignoring navigation to unknown page '{}'", id);
                Err(NavError::UnknownPage(id.to_string()))
            }
        }
    }
}
