use eframe::egui;

use crate::egui_app::state::AppState;
use crate::egui_app::theme::{self, palette, Palette};

const INPUT_WIDTH: f32 = 280.0;

fn render_messages(ui: &mut egui::Ui, state: &AppState, colors: Palette) {
    if let Some(ref error) = state.auth_state.error {
        ui.label(egui::RichText::new(error).color(colors.danger));
        ui.add_space(10.0);
    } else if let Some(ref notice) = state.auth_state.notice {
        ui.label(egui::RichText::new(notice).color(colors.success));
        ui.add_space(10.0);
    }
}

fn field(ui: &mut egui::Ui, hint: &str, value: &mut String, password: bool) -> egui::Response {
    ui.add_sized(
        [INPUT_WIDTH, 28.0],
        egui::TextEdit::singleline(value).hint_text(hint).password(password),
    )
}

pub fn render_login(ui: &mut egui::Ui, state: &mut AppState) {
    let colors = palette(state.theme);

    ui.vertical_centered(|ui| {
        ui.add_space(60.0);
        ui.label(egui::RichText::new("Login").size(24.0).strong());
        ui.add_space(16.0);

        render_messages(ui, state, colors);

        field(ui, "Username", &mut state.username_input, false);
        ui.add_space(8.0);
        let password = field(ui, "Password", &mut state.password_input, true);
        ui.add_space(16.0);

        let submitted = password.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));
        let clicked = ui
            .add_enabled(!state.auth_state.loading, theme::primary_button("Login", colors))
            .clicked();
        if clicked || (submitted && !state.auth_state.loading) {
            state.handle_login();
        }

        ui.add_space(12.0);
        ui.horizontal(|ui| {
            ui.add_space((ui.available_width() - 200.0).max(0.0) / 2.0);
            ui.label("No account?");
            if ui.link(egui::RichText::new("Register").color(colors.accent_text)).clicked() {
                state.show_register();
            }
        });

        if state.auth_state.loading {
            ui.add_space(12.0);
            ui.spinner();
        }
    });
}

pub fn render_register(ui: &mut egui::Ui, state: &mut AppState) {
    let colors = palette(state.theme);

    ui.vertical_centered(|ui| {
        ui.add_space(60.0);
        ui.label(egui::RichText::new("Register").size(24.0).strong());
        ui.add_space(16.0);

        render_messages(ui, state, colors);

        field(ui, "Username", &mut state.username_input, false);
        ui.add_space(8.0);
        field(ui, "Email (optional)", &mut state.email_input, false);
        ui.add_space(8.0);
        field(ui, "Password", &mut state.password_input, true);
        ui.add_space(16.0);

        if ui
            .add_enabled(!state.auth_state.loading, theme::primary_button("Register", colors))
            .clicked()
        {
            state.handle_register();
        }

        ui.add_space(12.0);
        ui.horizontal(|ui| {
            ui.add_space((ui.available_width() - 240.0).max(0.0) / 2.0);
            ui.label("Already have an account?");
            if ui.link(egui::RichText::new("Login").color(colors.accent_text)).clicked() {
                state.show_login();
            }
        });

        if state.auth_state.loading {
            ui.add_space(12.0);
            ui.spinner();
        }
    });
}
