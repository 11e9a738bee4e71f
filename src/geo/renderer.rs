//! Map layer rendering.
//!
//! Builds the ordered shape list for one map layer: ocean, graticule,
//! accent latitudes, country polygons, boundary outlines, and the optional
//! label. The builder is a pure function of its inputs, so rendering the
//! same state twice yields the same shapes with nothing stale left behind.

use eframe::egui::epaint::PathShape;
use eframe::egui::{vec2, Align2, Color32, FontId, Painter, Pos2, Shape, Stroke};
use geo_types::Coord;

use super::{FeatureCollection, WorldProjection};

/// Latitudes highlighted with full-width accent guide lines.
pub const ACCENT_LATITUDES: [f64; 5] = [-60.0, -30.0, 0.0, 30.0, 60.0];

/// Sampling step for graticule and accent geodesics, in degrees.
const LINE_STEP_DEG: f64 = 2.0;

/// Graticule spacing: meridians every 30 degrees, parallels every 15.
const MERIDIAN_STEP_DEG: i32 = 30;
const PARALLEL_STEP_DEG: i32 = 15;

/// Meridians stop short of the poles; the outermost parallels too.
const MERIDIAN_LAT_LIMIT: f64 = 80.0;
const PARALLEL_LAT_LIMIT: i32 = 75;

/// Dash patterns (dash length, gap length) in canvas points.
const GRID_DASH: (f32, f32) = (2.0, 3.0);
const ACCENT_DASH: (f32, f32) = (6.0, 5.0);

/// Fill and stroke styling for one map layer.
#[derive(Debug, Clone)]
pub struct MapStyle {
    /// Overlay layers drop the ocean and graticule and blank the accent
    /// stroke; land and boundaries stay visible.
    pub is_overlay: bool,
    pub ocean: Color32,
    pub grid: Stroke,
    pub accent: Stroke,
    pub land_fill: Color32,
    pub land_outline: Stroke,
    pub boundary: Stroke,
    pub label: Color32,
}

impl MapStyle {
    /// Opaque styling for the static base layer.
    pub fn base() -> Self {
        Self {
            is_overlay: false,
            ocean: Color32::from_rgb(11, 25, 44),
            grid: Stroke::new(0.6, Color32::from_rgb(56, 72, 94)),
            accent: Stroke::new(1.6, Color32::from_rgb(250, 204, 21)),
            land_fill: Color32::from_rgb(51, 65, 85),
            land_outline: Stroke::new(0.6, Color32::from_rgb(148, 163, 184)),
            boundary: Stroke::new(0.5, Color32::from_rgb(100, 116, 139)),
            label: Color32::from_rgb(203, 213, 225),
        }
    }

    /// Translucent styling for the rotatable comparison overlay. The accent
    /// lines keep their geometry with a fully transparent stroke so the two
    /// layers stay structurally identical above the suppressed backdrop.
    pub fn overlay() -> Self {
        Self {
            is_overlay: true,
            ocean: Color32::TRANSPARENT,
            grid: Stroke::NONE,
            accent: Stroke::new(1.6, Color32::TRANSPARENT),
            land_fill: Color32::from_rgba_unmultiplied(56, 189, 248, 70),
            land_outline: Stroke::new(0.8, Color32::from_rgba_unmultiplied(125, 211, 252, 160)),
            boundary: Stroke::new(0.5, Color32::from_rgba_unmultiplied(125, 211, 252, 90)),
            label: Color32::from_rgb(186, 230, 253),
        }
    }
}

/// Builds the back-to-front shape list for one map layer.
pub fn build_map_shapes(
    countries: &FeatureCollection,
    boundaries: Option<&FeatureCollection>,
    projection: &WorldProjection,
    accent_latitudes: &[f64],
    style: &MapStyle,
) -> Vec<Shape> {
    let mut shapes = Vec::new();

    if !style.is_overlay {
        shapes.push(Shape::Path(PathShape {
            points: projection.sphere_outline(),
            closed: true,
            fill: style.ocean,
            stroke: Stroke::NONE.into(),
        }));
        push_graticule(&mut shapes, projection, style.grid);
    }

    for &lat in accent_latitudes {
        push_polyline(
            &mut shapes,
            sample_parallel(projection, lat),
            style.accent,
            Some(ACCENT_DASH),
            projection.seam_threshold(),
        );
    }

    push_features(
        &mut shapes,
        countries,
        projection,
        Some(style.land_fill),
        style.land_outline,
    );

    if let Some(boundaries) = boundaries {
        push_features(&mut shapes, boundaries, projection, None, style.boundary);
    }

    shapes
}

/// Renders one map layer onto the painter, plus the optional text label at
/// its fixed top-left anchor.
pub fn render_map(
    painter: &Painter,
    countries: &FeatureCollection,
    boundaries: Option<&FeatureCollection>,
    projection: &WorldProjection,
    accent_latitudes: &[f64],
    label: Option<&str>,
    style: &MapStyle,
) {
    painter.extend(build_map_shapes(
        countries,
        boundaries,
        projection,
        accent_latitudes,
        style,
    ));

    if let Some(text) = label.filter(|text| !text.is_empty()) {
        painter.text(
            projection.rect().left_top() + vec2(16.0, 28.0),
            Align2::LEFT_BOTTOM,
            text,
            FontId::proportional(14.0),
            style.label,
        );
    }
}

fn push_graticule(shapes: &mut Vec<Shape>, projection: &WorldProjection, stroke: Stroke) {
    let threshold = projection.seam_threshold();

    let mut lon = -180;
    while lon <= 180 {
        push_polyline(
            shapes,
            sample_meridian(projection, f64::from(lon)),
            stroke,
            Some(GRID_DASH),
            threshold,
        );
        lon += MERIDIAN_STEP_DEG;
    }

    let mut lat = -PARALLEL_LAT_LIMIT;
    while lat <= PARALLEL_LAT_LIMIT {
        push_polyline(
            shapes,
            sample_parallel(projection, f64::from(lat)),
            stroke,
            Some(GRID_DASH),
            threshold,
        );
        lat += PARALLEL_STEP_DEG;
    }
}

fn sample_parallel(projection: &WorldProjection, lat: f64) -> Vec<Pos2> {
    let mut points = Vec::with_capacity((360.0 / LINE_STEP_DEG) as usize + 1);
    let mut lon = -180.0;
    while lon <= 180.0 + 1e-9 {
        points.push(projection.geo_to_screen(Coord { x: lon, y: lat }));
        lon += LINE_STEP_DEG;
    }
    points
}

fn sample_meridian(projection: &WorldProjection, lon: f64) -> Vec<Pos2> {
    let mut points = Vec::with_capacity((2.0 * MERIDIAN_LAT_LIMIT / LINE_STEP_DEG) as usize + 1);
    let mut lat = -MERIDIAN_LAT_LIMIT;
    while lat <= MERIDIAN_LAT_LIMIT + 1e-9 {
        points.push(projection.geo_to_screen(Coord { x: lon, y: lat }));
        lat += LINE_STEP_DEG;
    }
    points
}

fn push_features(
    shapes: &mut Vec<Shape>,
    collection: &FeatureCollection,
    projection: &WorldProjection,
    fill: Option<Color32>,
    stroke: Stroke,
) {
    let threshold = projection.seam_threshold();

    for feature in &collection.features {
        for polygon in &feature.polygons {
            for (ring_index, ring) in polygon.iter().enumerate() {
                let points: Vec<Pos2> = ring
                    .iter()
                    .map(|coord| projection.geo_to_screen(*coord))
                    .collect();

                for part in split_at_seam(points, threshold) {
                    match fill {
                        // Exterior rings are filled; holes stay outline-only.
                        Some(fill) if ring_index == 0 && part.len() >= 3 => {
                            shapes.push(Shape::Path(PathShape {
                                points: part,
                                closed: true,
                                fill,
                                stroke: stroke.into(),
                            }));
                        }
                        _ if part.len() >= 2 => shapes.push(Shape::line(part, stroke)),
                        _ => {}
                    }
                }
            }
        }
    }
}

fn push_polyline(
    shapes: &mut Vec<Shape>,
    points: Vec<Pos2>,
    stroke: Stroke,
    dash: Option<(f32, f32)>,
    threshold: f32,
) {
    for part in split_at_seam(points, threshold) {
        if part.len() < 2 {
            continue;
        }
        match dash {
            Some((dash_len, gap_len)) => {
                shapes.extend(Shape::dashed_line(&part, stroke, dash_len, gap_len));
            }
            None => shapes.push(Shape::line(part, stroke)),
        }
    }
}

/// Splits a projected polyline wherever consecutive points jump across the
/// antimeridian seam, so rotated geometry never streaks across the canvas.
fn split_at_seam(points: Vec<Pos2>, threshold: f32) -> Vec<Vec<Pos2>> {
    let mut parts = Vec::with_capacity(1);
    let mut current: Vec<Pos2> = Vec::new();

    for point in points {
        if let Some(last) = current.last() {
            if (point.x - last.x).abs() > threshold {
                parts.push(std::mem::take(&mut current));
            }
        }
        current.push(point);
    }
    if !current.is_empty() {
        parts.push(current);
    }
    parts
}

#[cfg(test)]
mod tests {
    use super::*;
    use eframe::egui::{Rect, Vec2};

    fn projection(rotation_deg: f64) -> WorldProjection {
        let rect = Rect::from_min_size(Pos2::ZERO, Vec2::new(700.0, 400.0));
        WorldProjection::fitted(rect, rotation_deg, false, 1.0, Vec2::ZERO)
    }

    fn square_country() -> FeatureCollection {
        let ring = vec![
            Coord { x: -10.0, y: -10.0 },
            Coord { x: 10.0, y: -10.0 },
            Coord { x: 10.0, y: 10.0 },
            Coord { x: -10.0, y: 10.0 },
            Coord { x: -10.0, y: -10.0 },
        ];
        FeatureCollection {
            features: vec![super::super::Feature {
                id: "004".to_string(),
                name: "Square".to_string(),
                polygons: vec![vec![ring]],
            }],
        }
    }

    #[test]
    fn test_identical_inputs_build_identical_shapes() {
        let projection = projection(23.0);
        let countries = square_country();
        let first = build_map_shapes(
            &countries,
            None,
            &projection,
            &ACCENT_LATITUDES,
            &MapStyle::base(),
        );
        let second = build_map_shapes(
            &countries,
            None,
            &projection,
            &ACCENT_LATITUDES,
            &MapStyle::base(),
        );
        assert_eq!(first, second);
    }

    #[test]
    fn test_base_layer_starts_with_ocean() {
        let shapes = build_map_shapes(
            &FeatureCollection::default(),
            None,
            &projection(0.0),
            &[],
            &MapStyle::base(),
        );
        match &shapes[0] {
            Shape::Path(path) => {
                assert!(path.closed);
                assert_eq!(path.fill, MapStyle::base().ocean);
            }
            other => panic!("expected ocean path first, got {other:?}"),
        }
    }

    #[test]
    fn test_overlay_suppresses_backdrop_but_keeps_land() {
        let countries = square_country();
        let projection = projection(0.0);

        let base = build_map_shapes(&countries, None, &projection, &[], &MapStyle::base());
        let overlay = build_map_shapes(&countries, None, &projection, &[], &MapStyle::overlay());

        // Only the land polygon survives in the overlay when no accents are
        // configured.
        assert_eq!(overlay.len(), 1);
        assert!(matches!(overlay[0], Shape::Path(_)));
        assert!(base.len() > overlay.len());
    }

    #[test]
    fn test_overlay_accents_are_present_but_invisible() {
        let projection = projection(0.0);
        let empty = FeatureCollection::default();

        let without = build_map_shapes(&empty, None, &projection, &[], &MapStyle::overlay());
        let with = build_map_shapes(&empty, None, &projection, &[0.0], &MapStyle::overlay());

        assert!(with.len() > without.len());
        for shape in &with {
            match shape {
                Shape::LineSegment { stroke, .. } => {
                    assert_eq!(stroke.color, Color32::TRANSPARENT);
                }
                other => panic!("expected dashed accent segments, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_boundaries_are_outline_only() {
        let projection = projection(0.0);
        let shapes = build_map_shapes(
            &FeatureCollection::default(),
            Some(&square_country()),
            &projection,
            &[],
            &MapStyle::overlay(),
        );
        assert_eq!(shapes.len(), 1);
        assert!(matches!(shapes[0], Shape::Path(_) | Shape::LineSegment { .. }));
        if let Shape::Path(path) = &shapes[0] {
            assert!(!path.closed);
        }
    }

    #[test]
    fn test_split_at_seam_breaks_wrapped_lines() {
        let points = vec![
            Pos2::new(0.0, 0.0),
            Pos2::new(10.0, 0.0),
            Pos2::new(500.0, 0.0),
            Pos2::new(510.0, 0.0),
        ];
        let parts = split_at_seam(points, 100.0);
        assert_eq!(parts.len(), 2);
        assert_eq!(parts[0].len(), 2);
        assert_eq!(parts[1].len(), 2);
    }

    #[test]
    fn test_split_at_seam_keeps_contiguous_lines_whole() {
        let points: Vec<Pos2> = (0..10).map(|i| Pos2::new(i as f32, 0.0)).collect();
        let parts = split_at_seam(points, 100.0);
        assert_eq!(parts.len(), 1);
        assert_eq!(parts[0].len(), 10);
    }
}
