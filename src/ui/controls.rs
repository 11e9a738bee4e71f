//! Bottom controls: the rotate drag bar and the view buttons.

use eframe::egui::{self, Align2, CursorIcon, FontId, Sense, Vec2};

use crate::state::{AppState, LoadPhase, RotateDrag, WheelBehavior};
use crate::ui::colors;

pub fn render_controls(ctx: &egui::Context, state: &mut AppState) {
    egui::TopBottomPanel::bottom("controls").show(ctx, |ui| {
        let ready = state.load_phase == LoadPhase::Ready;
        ui.add_space(6.0);
        ui.add_enabled_ui(ready, |ui| {
            render_drag_bar(ui, state);
            ui.add_space(6.0);
            render_buttons(ui, state);
        });
        ui.add_space(6.0);
    });
}

/// The dedicated rotate surface, decoupled from the map itself: dragging
/// along the bar spins the overlay without disturbing pan.
fn render_drag_bar(ui: &mut egui::Ui, state: &mut AppState) {
    let desired = Vec2::new(ui.available_width(), 28.0);
    let (rect, response) = ui.allocate_exact_size(desired, Sense::drag());
    let response = response.on_hover_cursor(CursorIcon::ResizeHorizontal);

    let fill = if response.dragged() {
        colors::controls::DRAG_BAR_ACTIVE
    } else {
        colors::controls::DRAG_BAR
    };
    ui.painter().rect_filled(rect, 8.0, fill);
    ui.painter().text(
        rect.center(),
        Align2::CENTER_CENTER,
        "Drag along this bar to adjust the overlay map",
        FontId::proportional(13.0),
        colors::controls::DRAG_BAR_TEXT,
    );

    if response.drag_started() {
        if let Some(pos) = response.interact_pointer_pos() {
            state.rotate_drag = Some(RotateDrag::begin(
                pos.x,
                state.view.rotation_deg(),
                rect.width(),
                state.view.zoom(),
            ));
        }
    }
    if response.dragged() {
        if let (Some(drag), Some(pos)) = (&state.rotate_drag, response.interact_pointer_pos()) {
            let next = drag.rotation_at(pos.x);
            state.view.set_rotation(next);
        }
    }
    if response.drag_stopped() {
        state.rotate_drag = None;
    }
}

fn render_buttons(ui: &mut egui::Ui, state: &mut AppState) {
    ui.horizontal(|ui| {
        if ui
            .add_enabled(!state.view.at_min_zoom(), egui::Button::new("\u{2212}"))
            .on_hover_text("Zoom out")
            .clicked()
        {
            state.view.zoom_out();
        }
        if ui
            .add_enabled(!state.view.at_max_zoom(), egui::Button::new("+"))
            .on_hover_text("Zoom in")
            .clicked()
        {
            state.view.zoom_in();
        }

        ui.separator();

        if ui
            .add_enabled(state.view.rotation_deg() != 0.0, egui::Button::new("Reset"))
            .on_hover_text("Reset the overlay rotation")
            .clicked()
        {
            state.view.reset_rotation();
        }

        let flip_label = if state.view.flip_poles { "Unflip" } else { "Flip" };
        if ui.button(flip_label).clicked() {
            state.view.flip_poles = !state.view.flip_poles;
        }

        ui.separator();

        ui.label("Wheel:");
        for behavior in WheelBehavior::all() {
            ui.selectable_value(&mut state.wheel_behavior, *behavior, behavior.label());
        }

        ui.separator();

        ui.label(format!(
            "Rotation {:+.1}\u{b0}   Zoom {:.2}x",
            state.view.rotation_deg(),
            state.view.zoom()
        ));
    });
}
