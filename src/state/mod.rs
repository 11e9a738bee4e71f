//! Application state management.
//!
//! State is grouped by concern: the shared view of the map layer pair, the
//! load lifecycle of the remote atlas data, and the per-gesture scratch
//! state for the pointer handlers.

mod gesture;
mod view;

pub use gesture::{PanCoalescer, RotateDrag};
pub use view::{normalize_rotation, ViewState, MAX_ZOOM, MIN_ZOOM, ZOOM_STEP};

/// Where the one-shot atlas load currently stands.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LoadPhase {
    #[default]
    Loading,
    Ready,
    Failed(String),
}

/// What the mouse wheel does over the map canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WheelBehavior {
    /// Anchor-preserving zoom about the pointer.
    Zoom,
    /// Scrolling pans the shared camera instead.
    #[default]
    Pan,
}

impl WheelBehavior {
    pub fn label(&self) -> &'static str {
        match self {
            WheelBehavior::Zoom => "Zoom",
            WheelBehavior::Pan => "Pan",
        }
    }

    pub fn all() -> &'static [WheelBehavior] {
        &[WheelBehavior::Zoom, WheelBehavior::Pan]
    }
}

/// Root application state containing all sub-states.
#[derive(Default)]
pub struct AppState {
    /// Shared rotation/zoom/pan/flip view of the base and overlay layers.
    pub view: ViewState,

    /// Atlas load lifecycle.
    pub load_phase: LoadPhase,

    /// Active wheel configuration.
    pub wheel_behavior: WheelBehavior,

    /// Frame-coalesced pan commits for the map drag gesture.
    pub pan_coalescer: PanCoalescer,

    /// Live rotate gesture on the drag bar, if one is in progress.
    /// Discarded on release.
    pub rotate_drag: Option<RotateDrag>,

    /// Status message displayed in the top bar.
    pub status_message: String,
}

impl AppState {
    pub fn new() -> Self {
        Self {
            status_message: "Loading world data...".to_string(),
            ..Default::default()
        }
    }
}
