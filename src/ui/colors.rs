//! Centralized color constants for the UI chrome.
//!
//! Map layer colors live with the layer styles in the renderer; these are
//! the panel and text colors shared across the UI.

use eframe::egui::Color32;

pub mod ui {
    use super::Color32;

    /// App title in the top bar.
    pub const TITLE: Color32 = Color32::WHITE;
    /// Status line and secondary labels.
    pub const STATUS: Color32 = Color32::GRAY;
    /// Small caps heading on the loading and error screens.
    pub const HEADING: Color32 = Color32::from_rgb(148, 163, 184);
    /// Error message text.
    pub const ERROR: Color32 = Color32::from_rgb(252, 165, 165);
    /// Hint text under the error message.
    pub const HINT: Color32 = Color32::from_rgb(148, 163, 184);
}

pub mod controls {
    use super::Color32;

    /// Drag bar fill.
    pub const DRAG_BAR: Color32 = Color32::from_rgb(51, 65, 85);
    /// Drag bar fill while a drag is in progress.
    pub const DRAG_BAR_ACTIVE: Color32 = Color32::from_rgb(71, 85, 105);
    /// Drag bar caption.
    pub const DRAG_BAR_TEXT: Color32 = Color32::from_rgb(203, 213, 225);
}
