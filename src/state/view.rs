//! View state: rotation, zoom, and pan for the map layer pair.

use eframe::egui::Vec2;

/// Lower zoom clamp.
pub const MIN_ZOOM: f32 = 0.8;

/// Upper zoom clamp.
pub const MAX_ZOOM: f32 = 10.0;

/// Multiplicative step used by the zoom buttons and wheel-zoom.
pub const ZOOM_STEP: f32 = 1.2;

/// Margin for deciding whether a zoom button sits at a clamp bound.
const ZOOM_BOUND_MARGIN: f32 = 1e-3;

/// Zoom changes smaller than this are floating-point noise, not input.
const ZOOM_NOISE: f32 = 1e-4;

/// Wraps a rotation in degrees into (-180, 180].
///
/// Continuous across full turns, so a drag past the antimeridian never
/// produces a jump at the boundary.
pub fn normalize_rotation(value: f64) -> f64 {
    let wrapped = ((value % 360.0) + 360.0) % 360.0;
    if wrapped > 180.0 {
        wrapped - 360.0
    } else {
        wrapped
    }
}

/// Mutable view shared by the base map and the rotatable overlay.
///
/// Invariants are enforced by the setters, not at read time: rotation is
/// always normalized into (-180, 180], zoom is always clamped into
/// [`MIN_ZOOM`, `MAX_ZOOM`] and rounded to two decimal places.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewState {
    rotation_deg: f64,
    zoom: f32,

    /// Pan offset in canvas units. Unconstrained.
    pub pan_offset: Vec2,

    /// Mirrors the overlay across the horizontal axis.
    pub flip_poles: bool,
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            rotation_deg: 0.0,
            zoom: 1.0,
            pan_offset: Vec2::ZERO,
            flip_poles: false,
        }
    }
}

impl ViewState {
    pub fn rotation_deg(&self) -> f64 {
        self.rotation_deg
    }

    pub fn zoom(&self) -> f32 {
        self.zoom
    }

    pub fn set_rotation(&mut self, degrees: f64) {
        self.rotation_deg = normalize_rotation(degrees);
    }

    pub fn reset_rotation(&mut self) {
        self.rotation_deg = 0.0;
    }

    /// Restores the default zoom and pan, leaving rotation and pole flip
    /// alone.
    pub fn reset_camera(&mut self) {
        self.zoom = 1.0;
        self.pan_offset = Vec2::ZERO;
    }

    /// Applies a zoom request, keeping the anchor point visually stationary.
    ///
    /// The request is clamped and rounded first; a request that rounds to
    /// (within noise of) the current zoom changes nothing and returns false.
    /// Without an anchor the pan offset scales by the zoom ratio, which keeps
    /// the canvas center fixed. With an anchor (in canvas units, relative to
    /// the canvas center) the pan offset is recomputed as a similarity
    /// transform about the anchor instead.
    pub fn adjust_zoom(&mut self, requested: f32, anchor: Option<Vec2>) -> bool {
        let bounded = requested.clamp(MIN_ZOOM, MAX_ZOOM);
        let next = (bounded * 100.0).round() / 100.0;
        if (next - self.zoom).abs() < ZOOM_NOISE {
            return false;
        }

        let ratio = next / self.zoom;
        self.pan_offset = match anchor {
            Some(anchor) => (self.pan_offset - anchor) * ratio + anchor,
            None => self.pan_offset * ratio,
        };
        self.zoom = next;
        true
    }

    pub fn zoom_in(&mut self) -> bool {
        self.adjust_zoom(self.zoom * ZOOM_STEP, None)
    }

    pub fn zoom_out(&mut self) -> bool {
        self.adjust_zoom(self.zoom / ZOOM_STEP, None)
    }

    pub fn at_min_zoom(&self) -> bool {
        self.zoom <= MIN_ZOOM + ZOOM_BOUND_MARGIN
    }

    pub fn at_max_zoom(&self) -> bool {
        self.zoom >= MAX_ZOOM - ZOOM_BOUND_MARGIN
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_rotation_range_and_idempotence() {
        for &value in &[
            -720.0, -540.0, -360.0, -181.0, -180.0, -1.0, 0.0, 1.0, 179.9, 180.0, 181.0, 359.0,
            360.0, 540.0, 123456.7,
        ] {
            let once = normalize_rotation(value);
            assert!(once > -180.0 && once <= 180.0, "{value} -> {once}");
            assert_eq!(normalize_rotation(once), once);
        }
    }

    #[test]
    fn test_normalize_rotation_boundary() {
        assert_eq!(normalize_rotation(180.0), 180.0);
        assert_eq!(normalize_rotation(-180.0), 180.0);
        assert_eq!(normalize_rotation(540.0), 180.0);
    }

    #[test]
    fn test_normalize_rotation_full_turn_equivalence() {
        let expected = normalize_rotation(-540.0);
        for k in -3_i32..=3 {
            assert_eq!(normalize_rotation(-540.0 + 360.0 * f64::from(k)), expected);
        }
    }

    #[test]
    fn test_zoom_clamps_to_bounds() {
        let mut view = ViewState::default();
        assert!(view.adjust_zoom(0.1, None));
        assert_eq!(view.zoom(), MIN_ZOOM);

        assert!(view.adjust_zoom(50.0, None));
        assert_eq!(view.zoom(), MAX_ZOOM);
    }

    #[test]
    fn test_zoom_noise_is_a_no_op() {
        let mut view = ViewState::default();
        view.pan_offset = Vec2::new(3.0, -4.0);
        let before = view.clone();

        assert!(!view.adjust_zoom(view.zoom() + 1e-5, None));
        assert_eq!(view, before);
    }

    #[test]
    fn test_zoom_without_anchor_scales_pan() {
        let mut view = ViewState::default();
        view.pan_offset = Vec2::new(10.0, -6.0);

        assert!(view.adjust_zoom(2.0, None));
        assert_eq!(view.pan_offset, Vec2::new(20.0, -12.0));
    }

    #[test]
    fn test_zoom_about_anchor() {
        let mut view = ViewState::default();
        view.pan_offset = Vec2::new(10.0, 10.0);

        assert!(view.adjust_zoom(2.0, Some(Vec2::ZERO)));
        assert_eq!(view.pan_offset, Vec2::new(20.0, 20.0));
    }

    #[test]
    fn test_zoom_anchor_at_pan_is_fixed() {
        let mut view = ViewState::default();
        view.pan_offset = Vec2::new(10.0, 10.0);

        assert!(view.adjust_zoom(2.0, Some(Vec2::new(10.0, 10.0))));
        assert_eq!(view.pan_offset, Vec2::new(10.0, 10.0));
    }

    #[test]
    fn test_zoom_result_is_rounded() {
        let mut view = ViewState::default();
        assert!(view.adjust_zoom(1.23456, None));
        assert_eq!(view.zoom(), 1.23);
    }

    #[test]
    fn test_zoom_button_bounds() {
        let mut view = ViewState::default();
        assert!(!view.at_min_zoom());
        assert!(!view.at_max_zoom());

        view.adjust_zoom(MIN_ZOOM, None);
        assert!(view.at_min_zoom());

        view.adjust_zoom(MAX_ZOOM, None);
        assert!(view.at_max_zoom());
    }

    #[test]
    fn test_rotation_setter_normalizes() {
        let mut view = ViewState::default();
        view.set_rotation(190.0);
        assert_eq!(view.rotation_deg(), -170.0);

        view.reset_rotation();
        assert_eq!(view.rotation_deg(), 0.0);
    }
}
