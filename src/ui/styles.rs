use {
    crate::{config::PLOT_CONFIG, ui::UI_CONFIG},
    eframe::egui::{
        Color32, CornerRadius, FontId, Response, RichText, Sense, Stroke, StrokeKind, Ui, Vec2,
        WidgetInfo, WidgetType,
    },
};

pub(crate) fn colored_subsection_heading(text: impl Into<String>) -> RichText {
    RichText::new(text.into()).color(UI_CONFIG.colors.subsection_heading)
}

pub(crate) trait UiStyleExt {
    /// Interactive label acting as button: transparent when idle, gray bg on hover, blue bg when selected.
    fn interactive_label(
        &mut self,
        text: &str,
        is_selected: bool,
        idle_color: Color32,
        font_id: FontId,
    ) -> Response;

    fn label_subdued(&mut self, text: impl Into<String>);
    fn label_error(&mut self, text: impl Into<String>);
    fn metric(&mut self, label: &str, value: &str, color: Color32);
    fn label_subheader(&mut self, text: impl Into<String>);
    fn loading_indicator(&mut self, text: &str);
}

impl UiStyleExt for Ui {
    fn interactive_label(
        &mut self,
        text: &str,
        is_selected: bool,
        idle_color: Color32,
        font_id: FontId,
    ) -> Response {
        let padding = Vec2::new(6.0, 4.0);
        let galley = self
            .painter()
            .layout_no_wrap(text.to_string(), font_id, idle_color);
        let desired_size = galley.size() + padding * 2.0;
        let (rect, response) = self.allocate_exact_size(desired_size, Sense::click());
        response.widget_info(|| WidgetInfo::selected(WidgetType::Button, true, is_selected, text));

        if self.is_rect_visible(rect) {
            let visuals = self.style().visuals.clone();
            let (bg_fill, text_color) = if is_selected {
                (visuals.selection.bg_fill, Color32::WHITE)
            } else if response.hovered() || response.has_focus() {
                (visuals.widgets.hovered.bg_fill, PLOT_CONFIG.color_warning)
            } else {
                (Color32::TRANSPARENT, idle_color)
            };

            if is_selected || response.hovered() {
                self.painter().rect(
                    rect,
                    CornerRadius::same(4),
                    bg_fill,
                    Stroke::NONE,
                    StrokeKind::Inside,
                );
            }
            let text_pos = rect.left_top() + padding;
            self.painter().galley(text_pos, galley, text_color);
        }
        response
    }

    fn label_subdued(&mut self, text: impl Into<String>) {
        self.label(
            RichText::new(text)
                .small()
                .color(PLOT_CONFIG.color_text_subdued),
        );
    }

    fn label_error(&mut self, text: impl Into<String>) {
        self.label(RichText::new(text).color(PLOT_CONFIG.color_loss));
    }

    fn metric(&mut self, label: &str, value: &str, color: Color32) {
        self.horizontal(|ui| {
            ui.spacing_mut().item_spacing.x = 2.0; // Tight spacing
            ui.label_subdued(format!("{}:", label));
            ui.label(RichText::new(value).small().color(color));
        });
    }

    fn label_subheader(&mut self, text: impl Into<String>) {
        self.label(colored_subsection_heading(text));
    }

    fn loading_indicator(&mut self, text: &str) {
        self.horizontal(|ui| {
            ui.spinner();
            ui.label_subdued(text);
        });
    }
}
