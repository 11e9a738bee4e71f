//! Central canvas UI: the base/overlay map pair and its interactions.

use eframe::egui::{self, CursorIcon, RichText, Sense, Vec2};

use crate::atlas::WorldAtlas;
use crate::geo::{render_map, MapStyle, WorldProjection, ACCENT_LATITUDES};
use crate::state::{AppState, LoadPhase, WheelBehavior, ZOOM_STEP};
use crate::ui::colors;

/// Logical canvas size in device-independent units. The canvas scales
/// uniformly into the available panel space; pointer input converts back
/// through the same scale.
pub const MAP_WIDTH: f32 = 700.0;
pub const MAP_HEIGHT: f32 = 400.0;

pub fn render_canvas(ctx: &egui::Context, state: &mut AppState, atlas: Option<&WorldAtlas>) {
    egui::CentralPanel::default().show(ctx, |ui| match state.load_phase.clone() {
        LoadPhase::Loading => render_loading(ui),
        LoadPhase::Failed(message) => render_error(ui, &message),
        LoadPhase::Ready => {
            if let Some(atlas) = atlas {
                render_map_pair(ui, state, atlas);
            }
        }
    });
}

fn render_loading(ui: &mut egui::Ui) {
    ui.vertical_centered(|ui| {
        ui.add_space(ui.available_height() * 0.4);
        ui.label(
            RichText::new("SAME LATITUDE EXPLORER")
                .size(11.0)
                .color(colors::ui::HEADING),
        );
        ui.add_space(8.0);
        ui.spinner();
        ui.label(RichText::new("Loading world data...").size(13.0));
    });
}

fn render_error(ui: &mut egui::Ui, message: &str) {
    ui.vertical_centered(|ui| {
        ui.add_space(ui.available_height() * 0.4);
        ui.label(
            RichText::new("SAME LATITUDE EXPLORER")
                .size(11.0)
                .color(colors::ui::HEADING),
        );
        ui.add_space(8.0);
        ui.label(
            RichText::new(format!("Could not load map data: {message}"))
                .size(13.0)
                .color(colors::ui::ERROR),
        );
        ui.label(
            RichText::new("Check your connection and reload.")
                .size(13.0)
                .color(colors::ui::HINT),
        );
    });
}

fn render_map_pair(ui: &mut egui::Ui, state: &mut AppState, atlas: &WorldAtlas) {
    // Uniform aspect fit of the logical canvas into the panel.
    let available = ui.available_size();
    let fit = (available.x / MAP_WIDTH).min(available.y / MAP_HEIGHT);
    let map_size = Vec2::new(MAP_WIDTH * fit, MAP_HEIGHT * fit);

    ui.with_layout(
        egui::Layout::top_down(egui::Align::Center),
        |ui| {
            let (response, painter) = ui.allocate_painter(map_size, Sense::click_and_drag());
            let rect = response.rect;
            let painter = painter.with_clip_rect(rect);

            // Pan and anchors are kept in canvas units; the projection works
            // in screen points, so convert at the boundary.
            let points_per_unit = rect.width() / MAP_WIDTH;
            let pan_points = state.view.pan_offset * points_per_unit;

            let base = WorldProjection::fitted(rect, 0.0, false, state.view.zoom(), pan_points);
            render_map(
                &painter,
                &atlas.countries,
                Some(&atlas.states),
                &base,
                &ACCENT_LATITUDES,
                None,
                &MapStyle::base(),
            );

            let overlay = WorldProjection::fitted(
                rect,
                state.view.rotation_deg(),
                state.view.flip_poles,
                state.view.zoom(),
                pan_points,
            );
            render_map(
                &painter,
                &atlas.countries,
                Some(&atlas.states),
                &overlay,
                &ACCENT_LATITUDES,
                None,
                &MapStyle::overlay(),
            );

            handle_canvas_interaction(&response, state);
        },
    );
}

fn handle_canvas_interaction(response: &egui::Response, state: &mut AppState) {
    let rect = response.rect;
    let units_per_point = MAP_WIDTH / rect.width();

    let response = response.clone().on_hover_cursor(CursorIcon::Grab);
    if response.dragged() {
        response.ctx.set_cursor_icon(CursorIcon::Grabbing);

        // Raw move deltas accumulate here and commit once per frame below.
        let delta = response.drag_delta();
        if delta != Vec2::ZERO {
            state.pan_coalescer.accumulate(delta * units_per_point);
        }
    }

    if response.hovered() {
        let scroll = response.ctx.input(|i| i.raw_scroll_delta);
        if scroll.y != 0.0 {
            match state.wheel_behavior {
                WheelBehavior::Zoom => {
                    let factor = if scroll.y > 0.0 {
                        ZOOM_STEP
                    } else {
                        1.0 / ZOOM_STEP
                    };
                    // Anchor on the pointer so the geography under it holds
                    // still across the zoom change.
                    let anchor = response
                        .hover_pos()
                        .map(|pos| (pos - rect.center()) * units_per_point);
                    state.view.adjust_zoom(state.view.zoom() * factor, anchor);
                }
                WheelBehavior::Pan => {
                    state.pan_coalescer.accumulate(scroll * units_per_point);
                }
            }
        }
    }

    if response.double_clicked() {
        state.view.reset_camera();
    }

    // Single pan commit per frame, covering every delta observed above.
    if let Some(delta) = state.pan_coalescer.flush() {
        state.view.pan_offset += delta;
    }
}
