//! World atlas data: fetching and decoding the remote topology documents.

mod download;
mod topology;

pub use download::{AtlasChannel, AtlasResult};
pub use topology::{parse_topology, Topology};

use thiserror::Error;

use crate::geo::FeatureCollection;

/// Decoded country and state feature collections, published together only
/// once both topology fetches have succeeded.
#[derive(Debug, Clone, Default)]
pub struct WorldAtlas {
    pub countries: FeatureCollection,
    pub states: FeatureCollection,
}

/// Failures while loading the atlas.
///
/// Every kind collapses into the single user-visible error state; there is
/// no partial success and no automatic retry.
#[derive(Debug, Clone, Error)]
pub enum AtlasError {
    /// The server answered with a non-success status.
    #[error("request failed: {0}")]
    Http(u16),

    /// The request itself could not be completed.
    #[error("network error: {0}")]
    Network(String),

    /// The response body was not a usable topology document.
    #[error("malformed topology: {0}")]
    Decode(String),
}
