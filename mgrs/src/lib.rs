//! # mgrs
//!
//! Conversion de coordonnées MGRS (Military Grid Reference System) vers
//! latitude/longitude WGS84, et distance géodésique entre deux points.
//!
//! ## Features
//!
//! - Décodage et validation stricte des chaînes MGRS (précision 0 à 5)
//! - Résolution des carrés de 100 km par la table standard des bandes de latitude
//! - UTM inverse par série de Krüger
//! - Distance par la formule inverse de Vincenty
//!
//! Pas de conversion directe (lat/lon vers MGRS), pas de zones polaires (UPS).
//!
//! ## Usage
//!
//! ```rust,ignore
//! use mgrs::{convert_mgrs_to_geodetic, geodesic_distance_meters};
//!
//! let p = convert_mgrs_to_geodetic("52SCH456178")?;
//! let q = convert_mgrs_to_geodetic("52SCH100400")?;
//! println!("{:.3} km", geodesic_distance_meters(p, q) / 1000.0);
//! ```

pub mod decode;
pub mod ellipsoid;
pub mod error;
pub mod grid;
pub mod types;
pub mod utm;
pub mod vincenty;

pub use decode::decode;
pub use ellipsoid::{Ellipsoid, WGS84};
pub use error::MgrsError;
pub use types::{GeodeticCoordinate, Hemisphere, MgrsCoordinate, UtmCoordinate};

use tracing::debug;

/// Résout une coordonnée MGRS décodée en coordonnée UTM absolue
///
/// # Errors
///
/// [`MgrsError::InvalidFormat`] si les lettres du carré ne correspondent pas à la zone.
pub fn to_utm(mgrs: &MgrsCoordinate) -> Result<UtmCoordinate, MgrsError> {
    let hemisphere = mgrs.hemisphere();
    let in_context = |e: MgrsError| e.with_input(mgrs.to_string());

    let easting = grid::resolve_easting(mgrs.column, mgrs.zone).map_err(in_context)?
        + f64::from(mgrs.easting_offset);
    let northing = grid::resolve_northing(mgrs.row, mgrs.zone, mgrs.band).map_err(in_context)?
        + f64::from(mgrs.northing_offset);
    let northing = grid::apply_hemisphere(northing, hemisphere);

    Ok(UtmCoordinate {
        zone: mgrs.zone,
        hemisphere,
        easting,
        northing,
    })
}

/// Convertit une chaîne MGRS en latitude/longitude WGS84 (degrés)
///
/// La chaîne est normalisée (majuscules, espaces supprimés) avant décodage.
///
/// # Errors
///
/// - [`MgrsError::InvalidFormat`] si la chaîne n'est pas une référence MGRS valide,
///   ou si le carré de 100 km tombe hors de sa bande de latitude
/// - [`MgrsError::OutOfRange`] si le résultat sort de [-90, 90] / [-180, 180]
pub fn convert_mgrs_to_geodetic(mgrs: &str) -> Result<GeodeticCoordinate, MgrsError> {
    let decoded = decode(mgrs)?;
    let utm = to_utm(&decoded)?;
    let geo = utm::utm_to_geodetic(&utm, &WGS84);

    debug!(
        mgrs = %decoded,
        easting = utm.easting,
        northing = utm.northing,
        latitude = geo.latitude,
        longitude = geo.longitude,
        "MGRS converted"
    );

    let geo = validate(geo)?;
    grid::check_band(decoded.band, geo.latitude).map_err(|e| e.with_input(decoded.to_string()))?;
    Ok(geo)
}

/// Rejette les coordonnées hors bornes (jamais de clamp)
pub fn validate(geo: GeodeticCoordinate) -> Result<GeodeticCoordinate, MgrsError> {
    if geo.is_valid() {
        Ok(geo)
    } else {
        Err(MgrsError::OutOfRange {
            latitude: geo.latitude,
            longitude: geo.longitude,
        })
    }
}

/// Distance géodésique WGS84 en mètres entre deux points
pub fn geodesic_distance_meters(p1: GeodeticCoordinate, p2: GeodeticCoordinate) -> f64 {
    vincenty::inverse(p1, p2, &WGS84).distance
}

/// Convertit deux chaînes MGRS et retourne la distance qui les sépare, en mètres
///
/// # Errors
///
/// Propage la première erreur de conversion rencontrée ; aucun calcul de
/// distance n'est fait dans ce cas.
pub fn distance_between(from: &str, to: &str) -> Result<f64, MgrsError> {
    let p1 = convert_mgrs_to_geodetic(from)?;
    let p2 = convert_mgrs_to_geodetic(to)?;
    Ok(geodesic_distance_meters(p1, p2))
}
