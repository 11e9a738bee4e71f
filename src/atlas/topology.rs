//! Decoder for the arc-encoded topology documents served by the world-atlas
//! and us-atlas packages.
//!
//! A topology stores every shared border once, as a table of delta-encoded
//! (and usually quantized) coordinate runs called arcs. Each geometry then
//! references arcs by index, with a negative index meaning the arc taken in
//! reverse. Decoding stitches the referenced arcs back into per-feature
//! polygon rings.

use std::collections::BTreeMap;

use geo_types::Coord;
use serde::Deserialize;
use serde_json::Value;

use super::AtlasError;
use crate::geo::{Feature, FeatureCollection, Ring};

/// A parsed topology document, still in arc-encoded form.
#[derive(Debug, Deserialize)]
pub struct Topology {
    #[serde(default)]
    transform: Option<Transform>,
    arcs: Vec<Vec<Vec<f64>>>,
    objects: BTreeMap<String, Geometry>,
}

#[derive(Debug, Deserialize)]
struct Transform {
    scale: [f64; 2],
    translate: [f64; 2],
}

#[derive(Debug, Deserialize)]
#[serde(tag = "type")]
enum Geometry {
    GeometryCollection {
        geometries: Vec<Geometry>,
    },
    Polygon {
        #[serde(default)]
        id: Option<Value>,
        #[serde(default)]
        properties: Option<Value>,
        arcs: Vec<Vec<i64>>,
    },
    MultiPolygon {
        #[serde(default)]
        id: Option<Value>,
        #[serde(default)]
        properties: Option<Value>,
        arcs: Vec<Vec<Vec<i64>>>,
    },
}

/// Parses a topology document from its JSON text.
pub fn parse_topology(text: &str) -> Result<Topology, AtlasError> {
    serde_json::from_str(text).map_err(|e| AtlasError::Decode(e.to_string()))
}

impl Topology {
    /// Decodes one named object into per-feature polygon geometries.
    pub fn decode_object(&self, name: &str) -> Result<FeatureCollection, AtlasError> {
        let object = self
            .objects
            .get(name)
            .ok_or_else(|| AtlasError::Decode(format!("missing object {name:?}")))?;

        let arcs = self.decode_arcs();
        let mut features = Vec::new();
        collect_features(object, &arcs, &mut features)?;
        Ok(FeatureCollection { features })
    }

    /// Expands the shared arc table into absolute coordinates.
    fn decode_arcs(&self) -> Vec<Vec<Coord<f64>>> {
        self.arcs
            .iter()
            .map(|arc| {
                let mut x = 0.0;
                let mut y = 0.0;
                arc.iter()
                    .filter(|position| position.len() >= 2)
                    .map(|position| match &self.transform {
                        Some(transform) => {
                            x += position[0];
                            y += position[1];
                            Coord {
                                x: x * transform.scale[0] + transform.translate[0],
                                y: y * transform.scale[1] + transform.translate[1],
                            }
                        }
                        None => Coord {
                            x: position[0],
                            y: position[1],
                        },
                    })
                    .collect()
            })
            .collect()
    }
}

fn collect_features(
    geometry: &Geometry,
    arcs: &[Vec<Coord<f64>>],
    out: &mut Vec<Feature>,
) -> Result<(), AtlasError> {
    match geometry {
        Geometry::GeometryCollection { geometries } => {
            for child in geometries {
                collect_features(child, arcs, out)?;
            }
        }
        Geometry::Polygon {
            id,
            properties,
            arcs: rings,
        } => out.push(Feature {
            id: id_string(id),
            name: name_string(properties),
            polygons: vec![decode_polygon(rings, arcs)?],
        }),
        Geometry::MultiPolygon {
            id,
            properties,
            arcs: polygons,
        } => out.push(Feature {
            id: id_string(id),
            name: name_string(properties),
            polygons: polygons
                .iter()
                .map(|rings| decode_polygon(rings, arcs))
                .collect::<Result<_, _>>()?,
        }),
    }
    Ok(())
}

fn decode_polygon(rings: &[Vec<i64>], arcs: &[Vec<Coord<f64>>]) -> Result<Vec<Ring>, AtlasError> {
    rings.iter().map(|ring| stitch_ring(ring, arcs)).collect()
}

/// Concatenates the referenced arcs into one ring. Consecutive arcs share
/// their junction point, which is dropped from every arc after the first.
fn stitch_ring(indices: &[i64], arcs: &[Vec<Coord<f64>>]) -> Result<Ring, AtlasError> {
    let mut ring: Ring = Vec::new();

    for &index in indices {
        let (arc_index, reversed) = if index < 0 {
            ((!index) as usize, true)
        } else {
            (index as usize, false)
        };
        let arc = arcs
            .get(arc_index)
            .ok_or_else(|| AtlasError::Decode(format!("arc index {index} out of range")))?;

        let skip = usize::from(!ring.is_empty());
        if reversed {
            ring.extend(arc.iter().rev().skip(skip).copied());
        } else {
            ring.extend(arc.iter().skip(skip).copied());
        }
    }

    Ok(ring)
}

fn id_string(id: &Option<Value>) -> String {
    match id {
        Some(Value::String(text)) => text.clone(),
        Some(Value::Number(number)) => number.to_string(),
        _ => String::new(),
    }
}

fn name_string(properties: &Option<Value>) -> String {
    properties
        .as_ref()
        .and_then(|properties| properties.get("name"))
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}
