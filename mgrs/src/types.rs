//! Types de données pour le crate mgrs

use std::fmt;

use geo::Point;

/// Coordonnée MGRS décodée, lettres non encore résolues
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MgrsCoordinate {
    /// Numéro de zone UTM (1-60)
    pub zone: u8,

    /// Bande de latitude (C-X, sans I ni O)
    pub band: char,

    /// Lettre de colonne du carré de 100 km
    pub column: char,

    /// Lettre de ligne du carré de 100 km
    pub row: char,

    /// Décalage est dans le carré, en mètres (complété à 5 chiffres)
    pub easting_offset: u32,

    /// Décalage nord dans le carré, en mètres (complété à 5 chiffres)
    pub northing_offset: u32,

    /// Nombre de chiffres par axe (0-5)
    pub precision: u8,
}

impl MgrsCoordinate {
    /// Hémisphère déduit de la bande de latitude
    pub fn hemisphere(&self) -> Hemisphere {
        Hemisphere::from_band(self.band)
    }

    /// Taille de la cellule de précision, en mètres
    pub fn cell_size(&self) -> u32 {
        10u32.pow(5 - u32::from(self.precision))
    }
}

impl fmt::Display for MgrsCoordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let p = usize::from(self.precision);
        let divisor = 10u32.pow(5 - u32::from(self.precision));
        write!(f, "{:02}{}{}{}", self.zone, self.band, self.column, self.row)?;
        if p > 0 {
            write!(
                f,
                "{:0p$}{:0p$}",
                self.easting_offset / divisor,
                self.northing_offset / divisor,
                p = p
            )?;
        }
        Ok(())
    }
}

/// Hémisphère UTM
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Hemisphere {
    North,
    South,
}

impl Hemisphere {
    /// Les bandes antérieures à 'N' sont dans l'hémisphère sud
    pub fn from_band(band: char) -> Self {
        if band < 'N' {
            Self::South
        } else {
            Self::North
        }
    }
}

/// Coordonnée UTM résolue
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UtmCoordinate {
    pub zone: u8,
    pub hemisphere: Hemisphere,
    /// Easting en mètres (false easting 500000 inclus)
    pub easting: f64,
    /// Northing en mètres (false northing 10000000 inclus au sud)
    pub northing: f64,
}

/// Point géodésique WGS84, en degrés
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeodeticCoordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl GeodeticCoordinate {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Vérifie que latitude et longitude sont dans leurs bornes
    pub fn is_valid(&self) -> bool {
        (-90.0..=90.0).contains(&self.latitude) && (-180.0..=180.0).contains(&self.longitude)
    }
}

impl From<GeodeticCoordinate> for Point<f64> {
    fn from(c: GeodeticCoordinate) -> Self {
        Point::new(c.longitude, c.latitude)
    }
}

impl From<Point<f64>> for GeodeticCoordinate {
    fn from(p: Point<f64>) -> Self {
        Self::new(p.y(), p.x())
    }
}
