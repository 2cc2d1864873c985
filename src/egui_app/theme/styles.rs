//! Theme Styling Functions

use eframe::egui::{self, CornerRadius, Stroke};

use super::colors::{palette, Palette};
use crate::egui_app::types::ThemePreference;

/// Apply the chosen theme to the egui context
pub fn apply_theme(ctx: &egui::Context, theme: ThemePreference) {
    let colors = palette(theme);
    let mut visuals = match theme {
        ThemePreference::Light => egui::Visuals::light(),
        ThemePreference::Dark => egui::Visuals::dark(),
    };

    visuals.panel_fill = colors.background;
    visuals.window_fill = colors.panel;
    visuals.override_text_color = Some(colors.text);
    visuals.selection.bg_fill = colors.accent;
    visuals.selection.stroke = Stroke::new(1.0, colors.accent_text);
    visuals.widgets.hovered.bg_stroke = Stroke::new(1.0, colors.accent);

    ctx.set_visuals(visuals);
}

pub fn top_bar_frame(colors: Palette) -> egui::Frame {
    egui::Frame::new()
        .fill(colors.top_bar)
        .inner_margin(egui::Margin::symmetric(12, 8))
}

pub fn content_frame(colors: Palette) -> egui::Frame {
    egui::Frame::new()
        .fill(colors.background)
        .inner_margin(egui::Margin::same(24))
}

/// Frame around a single note
pub fn card_frame(colors: Palette) -> egui::Frame {
    egui::Frame::new()
        .fill(colors.card)
        .stroke(Stroke::new(1.0, colors.card_border))
        .corner_radius(CornerRadius::same(10))
        .inner_margin(egui::Margin::same(12))
}

pub fn primary_button(text: &str, colors: Palette) -> egui::Button<'static> {
    egui::Button::new(egui::RichText::new(text.to_string()).color(egui::Color32::WHITE))
        .fill(colors.accent)
        .corner_radius(CornerRadius::same(8))
}

pub fn danger_button(text: &str, colors: Palette) -> egui::Button<'static> {
    egui::Button::new(egui::RichText::new(text.to_string()).color(egui::Color32::WHITE))
        .fill(colors.danger)
        .corner_radius(CornerRadius::same(8))
}
