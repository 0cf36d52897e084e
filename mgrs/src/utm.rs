//! Projection UTM inverse (Universal Transverse Mercator)
//!
//! Latitude d'appui itérée puis développement en série de Krüger.
//! Zones 1 à 60 uniquement (pas de UPS).

use crate::ellipsoid::Ellipsoid;
use crate::grid::SOUTH_FALSE_NORTHING;
use crate::types::{GeodeticCoordinate, Hemisphere, UtmCoordinate};

/// Facteur d'échelle sur le méridien central
pub const K0: f64 = 0.9996;

/// False easting
pub const FALSE_EASTING: f64 = 500_000.0;

/// Nombre maximal d'itérations pour la latitude d'appui
const FOOTPOINT_MAX_ITER: usize = 5;

/// Seuil de convergence de la latitude d'appui (radians)
const FOOTPOINT_TOLERANCE: f64 = 1e-10;

/// Longitude du méridien central de la zone, en degrés
pub fn central_meridian(zone: u8) -> f64 {
    (f64::from(zone) - 1.0) * 6.0 - 180.0 + 3.0
}

/// Latitude d'appui (footpoint) depuis la latitude rectifiante `mu`
fn footpoint_latitude(mu: f64, e2: f64) -> f64 {
    let e1 = (1.0 - (1.0 - e2).sqrt()) / (1.0 + (1.0 - e2).sqrt());

    let j1 = 3.0 * e1 / 2.0 - 27.0 * e1.powi(3) / 32.0;
    let j2 = 21.0 * e1.powi(2) / 16.0 - 55.0 * e1.powi(4) / 32.0;
    let j3 = 151.0 * e1.powi(3) / 96.0;
    let j4 = 1097.0 * e1.powi(4) / 512.0;

    let mut phi1 = mu;
    for _ in 0..FOOTPOINT_MAX_ITER {
        let next = mu
            + j1 * (2.0 * mu).sin()
            + j2 * (4.0 * mu).sin()
            + j3 * (6.0 * mu).sin()
            + j4 * (8.0 * mu).sin();

        if (next - phi1).abs() < FOOTPOINT_TOLERANCE {
            break;
        }
        phi1 = next;
    }
    phi1
}

/// Convertit une coordonnée UTM en latitude/longitude (degrés)
///
/// Pas de contrôle de bornes ici : voir [`crate::convert_mgrs_to_geodetic`].
pub fn utm_to_geodetic(utm: &UtmCoordinate, ellipsoid: &Ellipsoid) -> GeodeticCoordinate {
    let a = ellipsoid.a;
    let e2 = ellipsoid.e2();
    let ep2 = ellipsoid.ep2();

    let y0 = match utm.hemisphere {
        Hemisphere::North => 0.0,
        Hemisphere::South => SOUTH_FALSE_NORTHING,
    };

    // Coordonnées réduites
    let x = utm.easting - FALSE_EASTING;
    let y = utm.northing - y0;

    let m = y / K0;
    let mu = m / (a * (1.0 - e2 / 4.0 - 3.0 * e2.powi(2) / 64.0 - 5.0 * e2.powi(3) / 256.0));

    let phi1 = footpoint_latitude(mu, e2);

    let sin_phi1 = phi1.sin();
    let cos_phi1 = phi1.cos();
    let tan_phi1 = phi1.tan();

    let n1 = a / (1.0 - e2 * sin_phi1.powi(2)).sqrt();
    let t1 = tan_phi1.powi(2);
    let c1 = ep2 * cos_phi1.powi(2);
    let r1 = a * (1.0 - e2) / (1.0 - e2 * sin_phi1.powi(2)).powf(1.5);
    let d = x / (n1 * K0);

    let lat = phi1
        - (n1 * tan_phi1 / r1)
            * (d.powi(2) / 2.0
                - (5.0 + 3.0 * t1 + 10.0 * c1 - 4.0 * c1.powi(2) - 9.0 * ep2) * d.powi(4) / 24.0
                + (61.0 + 90.0 * t1 + 298.0 * c1 + 45.0 * t1.powi(2)
                    - 252.0 * ep2
                    - 3.0 * c1.powi(2))
                    * d.powi(6)
                    / 720.0);

    let dlon = (d - (1.0 + 2.0 * t1 + c1) * d.powi(3) / 6.0
        + (5.0 - 2.0 * c1 + 28.0 * t1 - 3.0 * c1.powi(2) + 8.0 * ep2 + 24.0 * t1.powi(2))
            * d.powi(5)
            / 120.0)
        / cos_phi1;

    GeodeticCoordinate::new(
        lat.to_degrees(),
        central_meridian(utm.zone) + dlon.to_degrees(),
    )
}
