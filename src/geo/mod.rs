//! Geographic primitives for the map layer pair.
//!
//! Feature containers, the fitted world projection, and the shape-building
//! renderer that turns both into one layer's draw list.

mod feature;
mod projection;
mod renderer;

pub use feature::{Feature, FeatureCollection, Ring};
pub use projection::WorldProjection;
pub use renderer::{build_map_shapes, render_map, MapStyle, ACCENT_LATITUDES};
