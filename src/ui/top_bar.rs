//! Top bar UI: app title and status line.

use eframe::egui::{self, RichText};

use crate::state::AppState;
use crate::ui::colors;

pub fn render_top_bar(ctx: &egui::Context, state: &mut AppState) {
    egui::TopBottomPanel::top("top_bar")
        .exact_height(36.0)
        .show(ctx, |ui| {
            ui.horizontal_centered(|ui| {
                ui.label(
                    RichText::new("Same Latitude Explorer")
                        .strong()
                        .size(16.0)
                        .color(colors::ui::TITLE),
                );

                ui.separator();

                ui.label(
                    RichText::new(&state.status_message)
                        .size(13.0)
                        .color(colors::ui::STATUS),
                );
            });
        });
}
