//! Pointer gesture bookkeeping for the drag bar and the map canvas.

use eframe::egui::Vec2;

use super::view::normalize_rotation;

/// State captured when a rotate drag starts on the drag bar.
///
/// A full traversal of the bar sweeps 360 degrees at zoom 1; higher zoom
/// slows the sweep proportionally so a given drag distance stays meaningful
/// on screen at any zoom level.
#[derive(Debug, Clone)]
pub struct RotateDrag {
    start_x: f32,
    start_rotation: f64,
    degrees_per_pixel: f64,
}

impl RotateDrag {
    pub fn begin(start_x: f32, start_rotation: f64, surface_width: f32, zoom: f32) -> Self {
        let width = if surface_width > 0.0 { surface_width } else { 1.0 };
        Self {
            start_x,
            start_rotation,
            degrees_per_pixel: 360.0 / f64::from(width) / f64::from(zoom),
        }
    }

    /// Rotation implied by the pointer's current x position.
    pub fn rotation_at(&self, current_x: f32) -> f64 {
        let delta = f64::from(current_x - self.start_x);
        normalize_rotation(self.start_rotation + delta * self.degrees_per_pixel)
    }
}

/// Batches pan deltas between frames.
///
/// Rapid pointer moves accumulate into a working offset; `flush` hands the
/// sum over exactly once per frame, so any number of move events between two
/// frame boundaries collapses into a single state commit that loses none of
/// the observed motion.
#[derive(Debug, Default)]
pub struct PanCoalescer {
    working: Vec2,
    dirty: bool,
}

impl PanCoalescer {
    pub fn accumulate(&mut self, delta: Vec2) {
        self.working += delta;
        self.dirty = true;
    }

    /// Takes the pending offset, if any. Returns `None` when no deltas
    /// arrived since the previous flush.
    pub fn flush(&mut self) -> Option<Vec2> {
        if !self.dirty {
            return None;
        }
        self.dirty = false;
        Some(std::mem::take(&mut self.working))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rotate_drag_scales_with_bar_width_and_zoom() {
        let drag = RotateDrag::begin(0.0, 0.0, 360.0, 1.0);
        assert_eq!(drag.rotation_at(90.0), 90.0);

        // Doubling the zoom halves the sweep for the same drag distance.
        let drag = RotateDrag::begin(0.0, 0.0, 360.0, 2.0);
        assert_eq!(drag.rotation_at(90.0), 45.0);
    }

    #[test]
    fn test_rotate_drag_wraps_continuously() {
        let drag = RotateDrag::begin(0.0, 170.0, 360.0, 1.0);
        assert_eq!(drag.rotation_at(20.0), -170.0);
        assert_eq!(drag.rotation_at(-20.0), 150.0);
    }

    #[test]
    fn test_rotate_drag_zero_width_surface() {
        let drag = RotateDrag::begin(0.0, 0.0, 0.0, 1.0);
        assert!(drag.rotation_at(1.0).is_finite());
    }

    #[test]
    fn test_coalescer_collapses_moves_into_one_commit() {
        let mut coalescer = PanCoalescer::default();
        let mut pan_offset = Vec2::new(1.0, 2.0);

        coalescer.accumulate(Vec2::new(5.0, 0.0));
        coalescer.accumulate(Vec2::new(3.0, 0.0));
        coalescer.accumulate(Vec2::new(-2.0, 1.0));

        // One frame boundary: a single commit carrying the full sum.
        let committed = coalescer.flush().unwrap();
        pan_offset += committed;
        assert_eq!(committed, Vec2::new(6.0, 1.0));
        assert_eq!(pan_offset, Vec2::new(7.0, 3.0));

        // Nothing pending on the next frame.
        assert!(coalescer.flush().is_none());
    }

    #[test]
    fn test_coalescer_idle_frames_commit_nothing() {
        let mut coalescer = PanCoalescer::default();
        assert!(coalescer.flush().is_none());

        coalescer.accumulate(Vec2::ZERO);
        // A zero delta is still an observed move and commits a zero sum.
        assert_eq!(coalescer.flush(), Some(Vec2::ZERO));
    }
}
