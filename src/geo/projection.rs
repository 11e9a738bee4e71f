//! Map projection and coordinate transformation.
//!
//! Converts geographic coordinates (lon/lat) to canvas positions through a
//! Natural Earth pseudo-cylindrical projection of the whole sphere, rotated
//! about the polar axis and fitted to the canvas rectangle.

use std::f64::consts::{FRAC_PI_2, PI};

use eframe::egui::{Pos2, Rect, Vec2};
use geo_types::Coord;

use crate::state::normalize_rotation;

/// Samples along each half of the sphere outline.
const OUTLINE_SAMPLES: usize = 90;

/// Natural Earth raw projection. Input in radians, output in projection
/// units with y growing toward the north pole.
fn natural_earth_raw(lambda: f64, phi: f64) -> (f64, f64) {
    let phi2 = phi * phi;
    let phi4 = phi2 * phi2;
    let x = lambda
        * (0.8707
            - 0.131979 * phi2
            + phi4 * (-0.013791 + phi4 * (0.003971 * phi2 - 0.001529 * phi4)));
    let y = phi
        * (1.007226
            + phi2 * (0.015085 + phi4 * (-0.044475 + 0.028874 * phi2 - 0.005916 * phi4)));
    (x, y)
}

/// Projection of the full sphere for one map layer.
///
/// Construction fits the sphere into the canvas rect; `geo_to_screen` then
/// applies, in order: polar-axis rotation, the raw projection, the optional
/// pole flip, the fitted scale, zoom about the canvas center, and the pan
/// translation. Recomputed every frame, never mutated in place.
#[derive(Debug, Clone)]
pub struct WorldProjection {
    rotation_deg: f64,
    flip_poles: bool,
    zoom: f32,
    pan_offset: Vec2,
    rect: Rect,
    /// Canvas points per projection unit at zoom 1.
    scale: f64,
}

impl WorldProjection {
    /// Fits the sphere into `rect`. The fit is rotation-invariant, so the
    /// base and overlay layers of one frame share identical scale.
    pub fn fitted(
        rect: Rect,
        rotation_deg: f64,
        flip_poles: bool,
        zoom: f32,
        pan_offset: Vec2,
    ) -> Self {
        let (x_max, _) = natural_earth_raw(PI, 0.0);
        let (_, y_max) = natural_earth_raw(0.0, FRAC_PI_2);
        let scale = f64::min(
            f64::from(rect.width()) / (2.0 * x_max),
            f64::from(rect.height()) / (2.0 * y_max),
        );

        Self {
            rotation_deg,
            flip_poles,
            zoom,
            pan_offset,
            rect,
            scale,
        }
    }

    pub fn rect(&self) -> Rect {
        self.rect
    }

    /// Converts geographic coordinates (lon, lat in degrees) to a canvas
    /// position. Total over all real inputs.
    pub fn geo_to_screen(&self, coord: Coord<f64>) -> Pos2 {
        let lon = normalize_rotation(coord.x + self.rotation_deg);
        self.raw_to_screen(lon, coord.y)
    }

    fn raw_to_screen(&self, lon_deg: f64, lat_deg: f64) -> Pos2 {
        let (x, mut y) = natural_earth_raw(lon_deg.to_radians(), lat_deg.to_radians());
        if self.flip_poles {
            y = -y;
        }

        let center = self.rect.center();
        Pos2::new(
            center.x + (x * self.scale) as f32 * self.zoom + self.pan_offset.x,
            center.y - (y * self.scale) as f32 * self.zoom + self.pan_offset.y,
        )
    }

    /// Closed outline of the projected sphere, used for the ocean
    /// background. Polar-axis rotation leaves the outline unchanged, so it
    /// samples the raw antimeridian pair directly.
    pub fn sphere_outline(&self) -> Vec<Pos2> {
        let mut points = Vec::with_capacity(2 * (OUTLINE_SAMPLES + 1));
        for i in 0..=OUTLINE_SAMPLES {
            let lat = -90.0 + 180.0 * (i as f64) / (OUTLINE_SAMPLES as f64);
            points.push(self.raw_to_screen(180.0, lat));
        }
        for i in 0..=OUTLINE_SAMPLES {
            let lat = 90.0 - 180.0 * (i as f64) / (OUTLINE_SAMPLES as f64);
            points.push(self.raw_to_screen(-180.0, lat));
        }
        points
    }

    /// Horizontal jump between consecutive projected points beyond which a
    /// line is assumed to have wrapped around the antimeridian seam. Half
    /// the projected sphere width.
    pub fn seam_threshold(&self) -> f32 {
        let (x_max, _) = natural_earth_raw(PI, 0.0);
        (x_max * self.scale) as f32 * self.zoom
    }
}
