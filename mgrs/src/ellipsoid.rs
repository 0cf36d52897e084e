//! Définitions de l'ellipsoïde de référence

/// Ellipsoïde de révolution, défini par son demi-grand axe et son aplatissement
///
/// Valeur immuable : les grandeurs dérivées sont recalculées à la demande.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ellipsoid {
    /// Demi-grand axe (rayon équatorial) en mètres
    pub a: f64,
    /// Aplatissement
    pub f: f64,
}

/// Ellipsoïde WGS84
pub const WGS84: Ellipsoid = Ellipsoid::new(6378137.0, 1.0 / 298.257223563);

impl Ellipsoid {
    pub const fn new(a: f64, f: f64) -> Self {
        Self { a, f }
    }

    /// Demi-petit axe (rayon polaire) en mètres
    pub fn b(&self) -> f64 {
        self.a * (1.0 - self.f)
    }

    /// Première excentricité au carré
    pub fn e2(&self) -> f64 {
        self.f * (2.0 - self.f)
    }

    /// Première excentricité
    pub fn e(&self) -> f64 {
        self.e2().sqrt()
    }

    /// Deuxième excentricité au carré
    pub fn ep2(&self) -> f64 {
        let e2 = self.e2();
        e2 / (1.0 - e2)
    }
}
