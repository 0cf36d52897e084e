//! Modules d'export (GeoJSON)

pub mod geojson;

pub use self::geojson::{export_to_geojson, segment_collection};
