use eframe::egui;

use crate::egui_app::state::AppState;
use crate::egui_app::theme::{self, palette};
use crate::egui_app::types::ThemePreference;
use crate::egui_app::AppView;

pub mod auth_view;
pub mod notes_view;

pub fn render_top_bar(ctx: &egui::Context, state: &mut AppState) {
    let colors = palette(state.theme);

    egui::TopBottomPanel::top("top_panel")
        .frame(theme::top_bar_frame(colors))
        .show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.colored_label(
                    colors.accent_text,
                    egui::RichText::new("📝 Notes App").size(18.0).strong(),
                );

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if state.is_authenticated() {
                        if ui.add(theme::danger_button("Logout", colors)).clicked() {
                            state.logout();
                        }
                    }

                    let toggle_label = match state.theme {
                        ThemePreference::Light => "🌙 Dark",
                        ThemePreference::Dark => "☀ Light",
                    };
                    if ui.add(theme::primary_button(toggle_label, colors)).clicked() {
                        state.toggle_theme();
                    }

                    if state.has_pending_requests() {
                        ui.spinner();
                    }
                });
            });
        });
}

pub fn render_main_panel(ctx: &egui::Context, state: &mut AppState) {
    let colors = palette(state.theme);

    egui::CentralPanel::default()
        .frame(theme::content_frame(colors))
        .show(ctx, |ui| match state.current_view {
            AppView::Login => auth_view::render_login(ui, state),
            AppView::Register => auth_view::render_register(ui, state),
            AppView::Notes => notes_view::render(ui, state),
        });
}
