use eframe::egui;

use crate::egui_app::notes::LoadState;
use crate::egui_app::state::AppState;
use crate::egui_app::theme::{self, palette, Palette};
use crate::shared::notes::NoteId;

enum NoteAction {
    Edit(NoteId),
    Delete(NoteId),
}

pub fn render(ui: &mut egui::Ui, state: &mut AppState) {
    let colors = palette(state.theme);

    egui::ScrollArea::vertical().show(ui, |ui| {
        ui.set_max_width(720.0);

        if let Some(session) = state.session() {
            ui.horizontal(|ui| {
                ui.label("Welcome,");
                ui.label(
                    egui::RichText::new(session.username())
                        .strong()
                        .color(colors.accent_text),
                );
                ui.label("!");
            });
            ui.add_space(12.0);
        }

        render_create_form(ui, state, colors);
        ui.add_space(16.0);

        if let Some(ref message) = state.notes_error {
            ui.label(egui::RichText::new(message).color(colors.danger));
            ui.add_space(8.0);
        }

        render_list(ui, state, colors);
    });
}

fn render_create_form(ui: &mut egui::Ui, state: &mut AppState, colors: Palette) {
    let width = ui.available_width();
    ui.add(
        egui::TextEdit::singleline(&mut state.title_input)
            .hint_text("Title")
            .desired_width(width),
    );
    ui.add_space(8.0);
    ui.add(
        egui::TextEdit::multiline(&mut state.content_input)
            .hint_text("Content")
            .desired_rows(3)
            .desired_width(width),
    );
    ui.add_space(8.0);

    let label = if state.is_creating() { "Adding..." } else { "Add Note" };
    if ui
        .add_enabled(
            !state.is_creating(),
            theme::primary_button(label, colors).min_size(egui::vec2(width, 32.0)),
        )
        .clicked()
    {
        state.handle_create();
    }
}

fn render_list(ui: &mut egui::Ui, state: &mut AppState, colors: Palette) {
    match state.notes.state() {
        LoadState::Loading if state.notes.is_empty() => {
            ui.vertical_centered(|ui| ui.spinner());
            return;
        }
        LoadState::Error(message) => {
            let message = format!("Could not load notes: {}", message);
            ui.horizontal(|ui| {
                ui.label(egui::RichText::new(message).color(colors.danger));
                if ui.button("Retry").clicked() {
                    state.refresh_notes();
                }
            });
            ui.add_space(8.0);
        }
        _ => {}
    }

    if state.notes.is_empty() {
        ui.vertical_centered(|ui| {
            ui.label(
                egui::RichText::new("No notes yet. Start writing something!")
                    .color(colors.text_muted),
            );
        });
        return;
    }

    let mut action = None;
    let deleting = state.deleting_id();
    let editing_id = state.editing.as_ref().map(|edit| edit.id);

    for note in state.notes.notes() {
        if editing_id == Some(note.id) {
            continue;
        }
        theme::card_frame(colors).show(ui, |ui| {
            ui.set_width(ui.available_width());
            ui.horizontal(|ui| {
                ui.label(
                    egui::RichText::new(&note.title)
                        .size(17.0)
                        .strong()
                        .color(colors.accent_text),
                );
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    let delete_enabled = deleting.is_none();
                    if ui.add_enabled(delete_enabled, egui::Button::new("🗑")).clicked() {
                        action = Some(NoteAction::Delete(note.id));
                    }
                    if ui.add_enabled(editing_id.is_none(), egui::Button::new("✏")).clicked() {
                        action = Some(NoteAction::Edit(note.id));
                    }
                    if deleting == Some(note.id) {
                        ui.spinner();
                    }
                });
            });
            ui.label(&note.content);
        });
        ui.add_space(8.0);
    }

    if editing_id.is_some() {
        render_edit_card(ui, state, colors);
    }

    match action {
        Some(NoteAction::Edit(id)) => state.start_edit(id),
        Some(NoteAction::Delete(id)) => state.handle_delete(id),
        None => {}
    }
}

fn render_edit_card(ui: &mut egui::Ui, state: &mut AppState, colors: Palette) {
    let saving = state.is_saving_edit();
    let mut save = false;
    let mut cancel = false;

    if let Some(edit) = state.editing.as_mut() {
        theme::card_frame(colors).show(ui, |ui| {
            ui.set_width(ui.available_width());
            ui.label(egui::RichText::new("Edit note").color(colors.text_muted));
            ui.add(egui::TextEdit::singleline(&mut edit.title).desired_width(f32::INFINITY));
            ui.add(
                egui::TextEdit::multiline(&mut edit.content)
                    .desired_rows(3)
                    .desired_width(f32::INFINITY),
            );
            ui.horizontal(|ui| {
                save = ui
                    .add_enabled(!saving, theme::primary_button("Save", colors))
                    .clicked();
                cancel = ui.add_enabled(!saving, egui::Button::new("Cancel")).clicked();
                if saving {
                    ui.spinner();
                }
            });
        });
        ui.add_space(8.0);
    }

    if save {
        state.handle_update();
    } else if cancel {
        state.cancel_edit();
    }
}
