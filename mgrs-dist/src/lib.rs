//! # mgrs-dist
//!
//! Distance géodésique entre deux références MGRS, en ligne de commande.
//!
//! ## Features
//!
//! - Distance entre deux points (km, 3 décimales par défaut)
//! - Conversion MGRS -> latitude/longitude WGS84
//! - Calcul par lots parallélisé avec rapport JSON
//! - Export GeoJSON du segment
//!
//! ## Usage CLI
//!
//! ```bash
//! mgrs-dist 52SCH456178 52SCH100400
//! mgrs-dist convert 52SCH456178 --json
//! mgrs-dist batch --path ./pairs.txt --output ./report.json
//! mgrs-dist to-geojson --from 52SCH456178 --to 52SCH100400 --output ./segment.geojson
//! ```

pub mod config;
pub mod export;
pub mod report;

pub use config::{DistanceUnit, OutputConfig};
pub use report::{BatchReport, BatchStatus};
