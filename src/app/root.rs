use eframe::{
    Frame,
    egui::{
        Align, CentralPanel, Context, FontId, Grid, Key, Layout, Order, RichText, ScrollArea,
        TopBottomPanel, Visuals, Window,
    },
};
use strum::IntoEnumIterator;

use crate::{
    app::{Navigator, Page},
    config::PLOT_CONFIG,
    data::Backend,
    ui::{AnalystView, OverviewView, TopCoinsView, UI_CONFIG, UI_TEXT, UiStyleExt},
};

pub struct App {
    pub(crate) nav: Navigator,
    pub(crate) top_coins: TopCoinsView,
    pub(crate) overview: OverviewView,
    pub(crate) analyst: AnalystView,
    pub(crate) show_help: bool,
    api_base: String,
}

impl App {
    pub(crate) fn new(
        cc: &eframe::CreationContext<'_>,
        backend: Backend,
        api_base: String,
        start_page: &str,
    ) -> Self {
        setup_custom_visuals(&cc.egui_ctx);

        let mut app = Self::with_backend(backend, api_base);
        // Unknown ids were already logged; the default page stays
        let _ = app.nav.show_page(start_page);
        app.start_initial_loads(&cc.egui_ctx);
        app
    }

    pub fn with_backend(backend: Backend, api_base: String) -> Self {
        Self {
            nav: Navigator::default(),
            top_coins: TopCoinsView::new(backend.clone()),
            overview: OverviewView::new(backend.clone()),
            analyst: AnalystView::new(backend),
            show_help: false,
            api_base,
        }
    }

    /// Top coins and overview load at startup. The analyst page waits for a symbol.
    pub fn start_initial_loads(&mut self, ctx: &Context) {
        self.top_coins.load(ctx);
        self.overview.load(ctx);
    }

    pub fn reload_current(&mut self, ctx: &Context) {
        match self.nav.current() {
            Page::TopCoins => {
                self.top_coins.load(ctx);
            }
            Page::Overview => {
                self.overview.load(ctx);
            }
            Page::Analyst => {
                // The alert carries the message
                let _ = self.analyst.load(ctx);
            }
        }
    }

    pub(crate) fn poll_views(&mut self, ctx: &Context) {
        self.top_coins.poll(ctx);
        self.overview.poll(ctx);
        self.analyst.poll(ctx);
    }

    pub(crate) fn handle_global_shortcuts(&mut self, ctx: &Context) {
        if ctx.wants_keyboard_input() {
            // If the user typing in text box, don't trigger global hotkeys.
            return;
        }

        let (target, reload, toggle_help, escape) = ctx.input(|i| {
            (
                Page::iter().find(|p| i.key_pressed(p.shortcut())),
                i.key_pressed(Key::R),
                i.key_pressed(Key::H),
                i.key_pressed(Key::Escape),
            )
        });

        if let Some(page) = target {
            self.nav.show(page);
        }
        if reload {
            self.reload_current(ctx);
        }
        if toggle_help {
            self.show_help = !self.show_help;
        }
        if escape {
            self.show_help = false;
            self.analyst.close_alert();
        }
    }

    fn render_nav_bar(&mut self, ctx: &Context) {
        TopBottomPanel::top("nav_bar")
            .frame(UI_CONFIG.top_panel_frame())
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    ui.label(
                        RichText::new(UI_TEXT.app_title.as_str())
                            .strong()
                            .color(UI_CONFIG.colors.heading),
                    );
                    ui.add_space(16.0);
                    for page in Page::iter() {
                        let selected = self.nav.current() == page;
                        if ui
                            .interactive_label(
                                page.title(),
                                selected,
                                UI_CONFIG.colors.nav_idle,
                                FontId::proportional(14.0),
                            )
                            .clicked()
                        {
                            self.nav.show(page);
                        }
                    }
                    ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                        if ui
                            .interactive_label(
                                &UI_TEXT.nav_help,
                                self.show_help,
                                PLOT_CONFIG.color_info,
                                FontId::proportional(12.0),
                            )
                            .clicked()
                        {
                            self.show_help = !self.show_help;
                        }
                    });
                });
            });
    }

    fn render_status_bar(&self, ctx: &Context) {
        TopBottomPanel::bottom("status_bar")
            .frame(UI_CONFIG.bottom_panel_frame())
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    ui.metric(
                        &UI_TEXT.label_backend,
                        &self.api_base,
                        PLOT_CONFIG.color_text_neutral,
                    );
                    let busy = self.top_coins.is_loading()
                        || self.overview.is_loading()
                        || self.analyst.is_loading();
                    if busy {
                        ui.add_space(12.0);
                        ui.loading_indicator(&UI_TEXT.label_loading);
                    }
                });
            });
    }

    fn render_help_panel(&mut self, ctx: &Context) {
        Window::new(UI_TEXT.help_title.as_str())
            .open(&mut self.show_help)
            .resizable(false)
            .order(Order::Tooltip) // Plots draw on Foreground, so the window must sit above them
            .collapsible(false)
            .default_width(320.0)
            .show(ctx, |ui| {
                Grid::new("general_shortcuts_grid")
                    .num_columns(2)
                    .spacing([24.0, 6.0])
                    .striped(true)
                    .show(ui, |ui| {
                        for (key, description) in UI_TEXT.help_shortcuts {
                            ui.label(RichText::new(*key).strong().color(PLOT_CONFIG.color_warning));
                            ui.label(*description);
                            ui.end_row();
                        }
                    });
            });
    }

    /// One UI pass: drain finished fetches, react to keys, draw.
    pub(crate) fn run_frame(&mut self, ctx: &Context) {
        self.poll_views(ctx);
        self.handle_global_shortcuts(ctx);

        self.render_nav_bar(ctx);
        self.render_status_bar(ctx);
        self.render_current_page(ctx);
        if self.show_help {
            self.render_help_panel(ctx);
        }
    }

    fn render_current_page(&mut self, ctx: &Context) {
        CentralPanel::default()
            .frame(UI_CONFIG.central_panel_frame())
            .show(ctx, |ui| {
                ScrollArea::vertical()
                    .auto_shrink([false, false])
                    .show(ui, |ui| match self.nav.current() {
                        Page::TopCoins => self.top_coins.render(ui),
                        Page::Overview => self.overview.render(ui),
                        Page::Analyst => self.analyst.render(ui),
                    });
            });
    }
}

impl eframe::App for App {
    fn update(&mut self, ctx: &Context, _frame: &mut Frame) {
        self.run_frame(ctx);
    }
}

fn setup_custom_visuals(ctx: &Context) {
    let mut visuals = Visuals::dark();
    visuals.window_fill = UI_CONFIG.colors.central_panel;
    visuals.panel_fill = UI_CONFIG.colors.side_panel;
    visuals.widgets.noninteractive.fg_stroke.color = UI_CONFIG.colors.label;
    visuals.widgets.inactive.fg_stroke.color = UI_CONFIG.colors.label;
    visuals.widgets.hovered.fg_stroke.color = UI_CONFIG.colors.heading;
    visuals.widgets.active.fg_stroke.color = UI_CONFIG.colors.heading;
    ctx.set_visuals(visuals);
    ctx.style_mut(|s| s.interaction.selectable_labels = false);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::views::testing::{FakeApi, backend, ctx, poll_until};
    use eframe::egui::{Event, Modifiers, RawInput};
    use std::sync::Arc;

    fn key_press(key: Key) -> RawInput {
        RawInput {
            events: vec![Event::Key {
                key,
                physical_key: None,
                pressed: true,
                repeat: false,
                modifiers: Modifiers::NONE,
            }],
            ..Default::default()
        }
    }

    #[test]
    fn startup_loads_top_coins_and_overview_only() {
        let api = Arc::new(FakeApi::default());
        let ctx = ctx();
        let mut app = App::with_backend(backend(api.clone()), "http://test/api".into());

        app.start_initial_loads(&ctx);
        poll_until(|| {
            app.poll_views(&ctx);
            !app.top_coins.is_loading() && !app.overview.is_loading()
        });

        let mut calls = api.calls();
        calls.sort();
        assert_eq!(calls, ["overview", "top-coins"]);
        assert!(app.top_coins.chart().is_live());
        assert!(app.overview.chart().is_live());
        assert!(!app.analyst.chart().is_live());
    }

    #[test]
    fn number_keys_switch_pages() {
        let api = Arc::new(FakeApi::default());
        let ctx = ctx();
        let mut app = App::with_backend(backend(api), "http://test/api".into());

        let _ = ctx.run(key_press(Key::Num3), |ctx| app.handle_global_shortcuts(ctx));
        assert_eq!(app.nav.current(), Page::Analyst);

        let _ = ctx.run(key_press(Key::Num2), |ctx| app.handle_global_shortcuts(ctx));
        assert_eq!(app.nav.current(), Page::Overview);

        let _ = ctx.run(key_press(Key::H), |ctx| app.handle_global_shortcuts(ctx));
        assert!(app.show_help);
        let _ = ctx.run(key_press(Key::Escape), |ctx| app.handle_global_shortcuts(ctx));
        assert!(!app.show_help);
    }

    #[test]
    fn reload_on_analyst_page_with_blank_symbol_only_alerts() {
        let api = Arc::new(FakeApi::default());
        let ctx = ctx();
        let mut app = App::with_backend(backend(api.clone()), "http://test/api".into());

        app.nav.show(Page::Analyst);
        app.reload_current(&ctx);

        assert_eq!(app.analyst.alert(), Some("Enter a symbol first!"));
        assert!(api.calls().is_empty());
    }

    #[test]
    fn full_frame_renders_every_page() {
        let api = Arc::new(FakeApi::default());
        let ctx = ctx();
        let mut app = App::with_backend(backend(api), "http://test/api".into());
        app.start_initial_loads(&ctx);
        poll_until(|| {
            app.poll_views(&ctx);
            !app.top_coins.is_loading() && !app.overview.is_loading()
        });

        for page in Page::iter() {
            app.nav.show(page);
            let _ = ctx.run(RawInput::default(), |ctx| app.run_frame(ctx));
        }
        assert_eq!(app.nav.current(), Page::Analyst);
    }
}
