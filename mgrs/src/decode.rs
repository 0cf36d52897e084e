//! Décodage des chaînes MGRS
//!
//! Format attendu (après normalisation) :
//! `ZZ B CR EEEEENNNNN` soit 2 chiffres de zone, 1 lettre de bande,
//! 2 lettres de carré de 100 km, puis 0 à 10 chiffres (nombre pair).

use std::sync::OnceLock;

use regex::Regex;
use tracing::trace;

use crate::types::MgrsCoordinate;
use crate::MgrsError;

/// Bandes de latitude valides, du sud au nord
pub const LATITUDE_BANDS: &str = "CDEFGHJKLMNPQRSTUVWX";

/// Nombre maximal de chiffres par axe (précision métrique)
const MAX_PRECISION: usize = 5;

fn shape() -> &'static Regex {
    static SHAPE: OnceLock<Regex> = OnceLock::new();
    SHAPE.get_or_init(|| {
        Regex::new(r"^([0-9]{2})([A-Z])([A-Z])([A-Z])([0-9]*)$").expect("static MGRS regex")
    })
}

/// Met en majuscules (ASCII seulement) et supprime tous les espaces
///
/// Les caractères non ASCII sont laissés tels quels et font échouer le décodage.
pub fn normalize(raw: &str) -> String {
    raw.chars()
        .filter(|c| !c.is_whitespace())
        .map(|c| c.to_ascii_uppercase())
        .collect()
}

/// Décode une chaîne MGRS en ses composantes
///
/// Les lettres du carré de 100 km ne sont pas résolues ici, voir [`crate::grid`].
///
/// # Errors
///
/// Retourne [`MgrsError::InvalidFormat`] si la chaîne ne respecte pas la structure MGRS.
pub fn decode(raw: &str) -> Result<MgrsCoordinate, MgrsError> {
    let input = normalize(raw);
    let fail = |reason: &str| MgrsError::invalid_format(input.as_str(), reason);

    let caps = shape()
        .captures(&input)
        .ok_or_else(|| fail("expected 2-digit zone, band letter, 2 grid letters and digits"))?;

    let zone: u8 = caps[1]
        .parse()
        .map_err(|_| fail("zone is not a number"))?;
    if !(1..=60).contains(&zone) {
        return Err(fail("zone must be between 01 and 60"));
    }

    let band = first_char(&caps[2]);
    if !LATITUDE_BANDS.contains(band) {
        return Err(fail("latitude band must be C-X, excluding I and O"));
    }

    let column = first_char(&caps[3]);
    let row = first_char(&caps[4]);
    if matches!(column, 'I' | 'O') || matches!(row, 'I' | 'O') {
        return Err(fail("grid square letters cannot be I or O"));
    }

    let digits = &caps[5];
    if digits.len() % 2 != 0 {
        return Err(fail("numeric part must have an even number of digits"));
    }
    let precision = digits.len() / 2;
    if precision > MAX_PRECISION {
        return Err(fail("numeric part cannot exceed 10 digits"));
    }

    let (easting_digits, northing_digits) = digits.split_at(precision);
    let easting_offset = pad_offset(easting_digits);
    let northing_offset = pad_offset(northing_digits);

    trace!(
        mgrs = %input,
        zone,
        %band,
        %column,
        %row,
        easting_offset,
        northing_offset,
        precision,
        "MGRS decoded"
    );

    Ok(MgrsCoordinate {
        zone,
        band,
        column,
        row,
        easting_offset,
        northing_offset,
        precision: precision as u8,
    })
}

fn first_char(s: &str) -> char {
    s.chars().next().unwrap_or_default()
}

/// Complète à droite avec des zéros jusqu'à 5 chiffres ("4" -> 40000)
fn pad_offset(digits: &str) -> u32 {
    digits
        .bytes()
        .chain(std::iter::repeat(b'0'))
        .take(MAX_PRECISION)
        .fold(0, |acc, b| acc * 10 + u32::from(b - b'0'))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_full() {
        let c = decode("52SCH456178").unwrap();
        assert_eq!(c.zone, 52);
        assert_eq!(c.band, 'S');
        assert_eq!(c.column, 'C');
        assert_eq!(c.row, 'H');
        assert_eq!(c.easting_offset, 45600);
        assert_eq!(c.northing_offset, 17800);
        assert_eq!(c.precision, 3);
    }

    #[test]
    fn test_normalize() {
        assert_eq!(normalize(" 52s ch 456 178\t"), "52SCH456178");
        let c = decode("52s ch 45600 17800").unwrap();
        assert_eq!(c.easting_offset, 45600);
        assert_eq!(c.precision, 5);
    }

    #[test]
    fn test_non_ascii_is_not_folded() {
        assert_eq!(normalize("03ßa1234"), "03ßA1234");
        for s in ["03ßA1234", "52ſCH456178", "52SCH４５６178", "ﬀ52SCH456178"] {
            assert!(
                matches!(decode(s), Err(MgrsError::InvalidFormat { .. })),
                "should reject {:?}",
                s
            );
        }
    }

    #[test]
    fn test_padding() {
        let c = decode("52SCH41").unwrap();
        assert_eq!(c.easting_offset, 40000);
        assert_eq!(c.northing_offset, 10000);
        assert_eq!(c.precision, 1);
        assert_eq!(pad_offset(""), 0);
        assert_eq!(pad_offset("00012"), 12);
    }

    #[test]
    fn test_precision_zero() {
        let c = decode("52SCH").unwrap();
        assert_eq!(c.precision, 0);
        assert_eq!(c.easting_offset, 0);
        assert_eq!(c.northing_offset, 0);
    }

    #[test]
    fn test_invalid_letters() {
        assert!(matches!(decode("52SIH1234"), Err(MgrsError::InvalidFormat { .. })));
        assert!(matches!(decode("52SCO1234"), Err(MgrsError::InvalidFormat { .. })));
        assert!(matches!(decode("52OCH1234"), Err(MgrsError::InvalidFormat { .. })));
        assert!(matches!(decode("52ACH1234"), Err(MgrsError::InvalidFormat { .. })));
        assert!(matches!(decode("52YCH1234"), Err(MgrsError::InvalidFormat { .. })));
    }

    #[test]
    fn test_invalid_shape() {
        for s in [
            "",
            "5SCH1234",
            "520SCH1234",
            "52SC1234",
            "52SCH123",
            "52SCH12345678901",
            "52SCH12345678901X",
            "52SCH12-34",
            "00SCH1234",
            "61SCH1234",
        ] {
            assert!(
                matches!(decode(s), Err(MgrsError::InvalidFormat { .. })),
                "should reject {:?}",
                s
            );
        }
    }

    #[test]
    fn test_error_message_keeps_input() {
        let err = decode("52sch123").unwrap_err();
        assert!(err.to_string().contains("52SCH123"), "{}", err);
    }
}
