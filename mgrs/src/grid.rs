//! Résolution des lettres du carré de 100 km
//!
//! - Colonnes : trois jeux de 8 lettres qui alternent selon la zone
//! - Lignes : 20 lettres qui bouclent tous les 2000 km de northing,
//!   décalées de 5 lettres pour les zones paires
//!
//! Le cycle des lignes étant bien plus court que l'étendue d'une zone,
//! le bon multiple de 2000 km est choisi à partir du northing minimal
//! de la bande de latitude.

use tracing::trace;

use crate::decode::LATITUDE_BANDS;
use crate::types::Hemisphere;
use crate::MgrsError;

/// Jeux de lettres de colonne, sélectionnés par `(zone - 1) % 3`
const COLUMN_SETS: [&str; 3] = ["ABCDEFGH", "JKLMNPQR", "STUVWXYZ"];

/// Lettres de ligne (sans I ni O)
const ROW_LETTERS: &str = "ABCDEFGHJKLMNPQRSTUV";

/// Décalage des lettres de ligne pour les zones paires
const EVEN_ZONE_ROW_SHIFT: usize = 5;

/// Taille d'un carré MGRS
pub const SQUARE_SIZE: f64 = 100_000.0;

/// Période du cycle des lettres de ligne
pub const ROW_CYCLE: f64 = 2_000_000.0;

/// False northing de l'hémisphère sud
pub const SOUTH_FALSE_NORTHING: f64 = 10_000_000.0;

/// Northing minimal de chaque bande de latitude (table MGRS standard)
///
/// Les bandes sud sont exprimées avec le false northing de 10000 km.
const BAND_MIN_NORTHING: [(char, f64); 20] = [
    ('C', 1_100_000.0),
    ('D', 2_000_000.0),
    ('E', 2_800_000.0),
    ('F', 3_700_000.0),
    ('G', 4_600_000.0),
    ('H', 5_500_000.0),
    ('J', 6_400_000.0),
    ('K', 7_300_000.0),
    ('L', 8_200_000.0),
    ('M', 9_100_000.0),
    ('N', 0.0),
    ('P', 800_000.0),
    ('Q', 1_700_000.0),
    ('R', 2_600_000.0),
    ('S', 3_500_000.0),
    ('T', 4_400_000.0),
    ('U', 5_300_000.0),
    ('V', 6_200_000.0),
    ('W', 7_000_000.0),
    ('X', 7_900_000.0),
];

/// Débordement admis sous la limite sud d'une bande : l'origine d'un carré
/// de 100 km à cheval sur cette limite reste à moins d'un degré
const BAND_TOLERANCE_DEG: f64 = 1.0;

/// Latitudes (sud, nord) couvertes par la bande ; X s'étend sur 12°
pub fn band_latitude_range(band: char) -> Option<(f64, f64)> {
    let idx = LATITUDE_BANDS.find(band)?;
    let south = -80.0 + 8.0 * idx as f64;
    let north = if band == 'X' { 84.0 } else { south + 8.0 };
    Some((south, north))
}

/// Vérifie que la latitude calculée tombe bien dans la bande annoncée
///
/// L'origine d'un carré (coin sud-ouest) peut déborder sous la bande, jamais
/// au-dessus : la limite nord est exclusive.
///
/// # Errors
///
/// [`MgrsError::InvalidFormat`] si la ligne du carré place le point hors de la bande.
pub fn check_band(band: char, latitude: f64) -> Result<(), MgrsError> {
    let (south, north) = band_latitude_range(band).ok_or_else(|| {
        MgrsError::invalid_format(band, format!("unknown latitude band {}", band))
    })?;

    if latitude < south - BAND_TOLERANCE_DEG || latitude >= north {
        return Err(MgrsError::invalid_format(
            band,
            format!(
                "grid square lies at latitude {:.4}, outside band {} ({} to {})",
                latitude, band, south, north
            ),
        ));
    }
    Ok(())
}

/// Northing minimal de la bande, dans le repère de l'hémisphère (false northing inclus)
pub fn band_min_northing(band: char) -> Option<f64> {
    BAND_MIN_NORTHING
        .iter()
        .find(|(b, _)| *b == band)
        .map(|&(_, n)| n)
}

/// Easting de l'origine du carré de 100 km
///
/// # Errors
///
/// [`MgrsError::InvalidFormat`] si la lettre n'appartient pas au jeu de la zone.
pub fn resolve_easting(column: char, zone: u8) -> Result<f64, MgrsError> {
    let set = COLUMN_SETS[usize::from(zone.saturating_sub(1)) % 3];
    let idx = set.find(column).ok_or_else(|| {
        MgrsError::invalid_format(
            column,
            format!("column letter {} is not used in zone {} ({})", column, zone, set),
        )
    })?;

    Ok((idx + 1) as f64 * SQUARE_SIZE)
}

/// Northing de l'origine du carré de 100 km, relatif à l'équateur
///
/// Le résultat est négatif dans l'hémisphère sud ; l'ajustement
/// d'hémisphère ([`apply_hemisphere`]) le ramène au false northing UTM.
///
/// # Errors
///
/// [`MgrsError::InvalidFormat`] si la lettre de ligne ou la bande est invalide.
pub fn resolve_northing(row: char, zone: u8, band: char) -> Result<f64, MgrsError> {
    let idx = ROW_LETTERS.find(row).ok_or_else(|| {
        MgrsError::invalid_format(row, format!("row letter {} is not a valid MGRS row (A-V)", row))
    })?;
    let min = band_min_northing(band).ok_or_else(|| {
        MgrsError::invalid_format(band, format!("unknown latitude band {}", band))
    })?;

    let idx = if zone % 2 == 0 {
        (idx + ROW_LETTERS.len() - EVEN_ZONE_ROW_SHIFT) % ROW_LETTERS.len()
    } else {
        idx
    };

    // Repère relatif à l'équateur : 10000 km est un multiple du cycle
    let (mut northing, min) = match Hemisphere::from_band(band) {
        Hemisphere::North => (idx as f64 * SQUARE_SIZE, min),
        Hemisphere::South => (
            idx as f64 * SQUARE_SIZE - SOUTH_FALSE_NORTHING,
            min - SOUTH_FALSE_NORTHING,
        ),
    };
    while northing < min {
        northing += ROW_CYCLE;
    }

    trace!(%row, zone, %band, northing, "Row letter resolved");
    Ok(northing)
}

/// Ajustement d'hémisphère : au sud, un northing sous 10000 km reçoit le false northing
pub fn apply_hemisphere(northing: f64, hemisphere: Hemisphere) -> f64 {
    match hemisphere {
        Hemisphere::South if northing < SOUTH_FALSE_NORTHING => northing + SOUTH_FALSE_NORTHING,
        _ => northing,
    }
}
