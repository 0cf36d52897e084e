//! Distance géodésique par la formule inverse de Vincenty
//!
//! Précision sub-millimétrique sauf pour des points quasi antipodaux,
//! pour lesquels l'itération peut ne pas converger : le résultat est alors
//! une meilleure estimation, sans garantie de précision.

use std::cmp::Ordering;

use tracing::warn;

use crate::ellipsoid::Ellipsoid;
use crate::types::GeodeticCoordinate;

/// Nombre maximal d'itérations sur lambda
const MAX_ITER: usize = 100;

/// Seuil de convergence sur lambda (radians)
const TOLERANCE: f64 = 1e-12;

/// Résultat détaillé du problème inverse
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Inverse {
    /// Distance en mètres
    pub distance: f64,
    /// Itérations effectuées (1 pour des points confondus, 0 pour un même pôle)
    pub iterations: usize,
    /// Faux si le budget d'itérations est épuisé
    pub converged: bool,
}

/// Distance géodésique en mètres entre deux points (degrés)
pub fn distance(lat1: f64, lon1: f64, lat2: f64, lon2: f64, ellipsoid: &Ellipsoid) -> f64 {
    inverse(
        GeodeticCoordinate::new(lat1, lon1),
        GeodeticCoordinate::new(lat2, lon2),
        ellipsoid,
    )
    .distance
}

/// Résout le problème inverse entre `p1` et `p2`
///
/// Les extrémités sont ordonnées avant le calcul : `inverse(p, q)` et
/// `inverse(q, p)` donnent exactement le même résultat.
pub fn inverse(p1: GeodeticCoordinate, p2: GeodeticCoordinate, ellipsoid: &Ellipsoid) -> Inverse {
    let (p1, p2) = match cmp_points(&p1, &p2) {
        Ordering::Greater => (p2, p1),
        _ => (p1, p2),
    };

    // Même pôle : la longitude n'a pas de sens, tan(u) diverge
    if p1.latitude.abs() == 90.0 && p1.latitude == p2.latitude {
        return Inverse {
            distance: 0.0,
            iterations: 0,
            converged: true,
        };
    }

    let a = ellipsoid.a;
    let f = ellipsoid.f;
    let b = ellipsoid.b();

    let l = (p2.longitude - p1.longitude).to_radians();

    // Latitudes réduites
    let u1 = ((1.0 - f) * p1.latitude.to_radians().tan()).atan();
    let u2 = ((1.0 - f) * p2.latitude.to_radians().tan()).atan();
    let (sin_u1, cos_u1) = u1.sin_cos();
    let (sin_u2, cos_u2) = u2.sin_cos();

    let mut lambda = l;
    let mut sin_sigma = 0.0;
    let mut cos_sigma = 0.0;
    let mut sigma = 0.0;
    let mut cos_sq_alpha = 0.0;
    let mut cos_2sigma_m = 0.0;
    let mut iterations = 0;
    let mut converged = false;

    while iterations < MAX_ITER {
        iterations += 1;
        let (sin_lambda, cos_lambda) = lambda.sin_cos();

        sin_sigma = ((cos_u2 * sin_lambda).powi(2)
            + (cos_u1 * sin_u2 - sin_u1 * cos_u2 * cos_lambda).powi(2))
        .sqrt();

        // Points confondus
        if sin_sigma == 0.0 {
            return Inverse {
                distance: 0.0,
                iterations,
                converged: true,
            };
        }

        cos_sigma = sin_u1 * sin_u2 + cos_u1 * cos_u2 * cos_lambda;
        sigma = sin_sigma.atan2(cos_sigma);
        let sin_alpha = cos_u1 * cos_u2 * sin_lambda / sin_sigma;
        cos_sq_alpha = 1.0 - sin_alpha * sin_alpha;

        // Ligne équatoriale
        cos_2sigma_m = if cos_sq_alpha != 0.0 {
            cos_sigma - 2.0 * sin_u1 * sin_u2 / cos_sq_alpha
        } else {
            0.0
        };
        let c = f / 16.0 * cos_sq_alpha * (4.0 + f * (4.0 - 3.0 * cos_sq_alpha));

        let previous = lambda;
        lambda = l
            + (1.0 - c)
                * f
                * sin_alpha
                * (sigma
                    + c * sin_sigma
                        * (cos_2sigma_m + c * cos_sigma * (-1.0 + 2.0 * cos_2sigma_m.powi(2))));

        if (lambda - previous).abs() < TOLERANCE {
            converged = true;
            break;
        }
    }

    if !converged {
        warn!(
            lat1 = p1.latitude,
            lon1 = p1.longitude,
            lat2 = p2.latitude,
            lon2 = p2.longitude,
            "Vincenty did not converge, returning best estimate"
        );
    }

    let u_sq = cos_sq_alpha * (a * a - b * b) / (b * b);
    let big_a = 1.0 + u_sq / 16384.0 * (4096.0 + u_sq * (-768.0 + u_sq * (320.0 - 175.0 * u_sq)));
    let big_b = u_sq / 1024.0 * (256.0 + u_sq * (-128.0 + u_sq * (74.0 - 47.0 * u_sq)));

    let delta_sigma = big_b
        * sin_sigma
        * (cos_2sigma_m
            + big_b / 4.0
                * (cos_sigma * (-1.0 + 2.0 * cos_2sigma_m.powi(2))
                    - big_b / 6.0
                        * cos_2sigma_m
                        * (-3.0 + 4.0 * sin_sigma.powi(2))
                        * (-3.0 + 4.0 * cos_2sigma_m.powi(2))));

    Inverse {
        distance: b * big_a * (sigma - delta_sigma),
        iterations,
        converged,
    }
}

fn cmp_points(p: &GeodeticCoordinate, q: &GeodeticCoordinate) -> Ordering {
    p.latitude
        .total_cmp(&q.latitude)
        .then(p.longitude.total_cmp(&q.longitude))
}
