/**
 * Notes App - Desktop Entry Point
 *
 * Installs tracing, restores the stored session and theme, and runs the
 * egui views until the window closes.
 */
use eframe::egui;
use notekeeper::egui_app::{theme, views, AppState};

fn init_tracing() {
    let env_filter = std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());

    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new(&env_filter))
        .with_target(false)
        .init();
}

fn main() -> Result<(), eframe::Error> {
    init_tracing();
    tracing::info!(version = env!("CARGO_PKG_VERSION"), "starting notes app");

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([900.0, 700.0])
            .with_min_inner_size([480.0, 400.0]),
        ..Default::default()
    };
    eframe::run_native(
        "Notes App",
        options,
        Box::new(|_cc| Ok(Box::new(NotesApp::default()))),
    )
}

struct NotesApp {
    state: AppState,
}

impl Default for NotesApp {
    fn default() -> Self {
        Self {
            state: AppState::new(),
        }
    }
}

impl eframe::App for NotesApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.state.poll_results();

        theme::apply_theme(ctx, self.state.theme);
        views::render_top_bar(ctx, &mut self.state);
        views::render_main_panel(ctx, &mut self.state);

        if self.state.has_pending_requests() {
            ctx.request_repaint_after(std::time::Duration::from_millis(100));
        }
    }
}
