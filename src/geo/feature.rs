//! Decoded geographic feature containers.

use geo_types::Coord;

/// One closed ring of a polygon, in (lon, lat) degrees.
pub type Ring = Vec<Coord<f64>>;

/// A country or state outline: one or more polygons, each a list of rings
/// with the exterior first and any holes after it.
#[derive(Debug, Clone, PartialEq)]
pub struct Feature {
    /// Stable identifier from the source topology.
    pub id: String,
    /// Display name, when the source carries one.
    pub name: String,
    pub polygons: Vec<Vec<Ring>>,
}

/// An ordered set of features decoded from one topology object.
///
/// Immutable once decoded; the renderer only ever borrows it.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FeatureCollection {
    pub features: Vec<Feature>,
}
