//! Tests d'intégration sur la chaîne complète MGRS -> lat/lon -> distance

use geo::{Point, VincentyDistance};
use mgrs::{
    convert_mgrs_to_geodetic, decode, distance_between, geodesic_distance_meters, to_utm,
    GeodeticCoordinate, Hemisphere, MgrsError,
};

fn assert_close(geo: GeodeticCoordinate, lat: f64, lon: f64, tol: f64) {
    assert!(
        (geo.latitude - lat).abs() < tol,
        "lat={} expected {}",
        geo.latitude,
        lat
    );
    assert!(
        (geo.longitude - lon).abs() < tol,
        "lon={} expected {}",
        geo.longitude,
        lon
    );
}

#[test]
fn test_seoul_reference_point() {
    // Hôtel de ville de Séoul
    let geo = convert_mgrs_to_geodetic("52SCG2304858728").unwrap();
    assert_close(geo, 37.5586, 126.9966, 1e-3);
}

#[test]
fn test_seoul_area_sanity_example() {
    let geo = convert_mgrs_to_geodetic("52SCH456178").unwrap();
    assert_close(geo, 38.0948, 127.2392, 1e-3);

    // Même point, saisie en minuscules avec espaces
    let same = convert_mgrs_to_geodetic(" 52s ch 456 178 ").unwrap();
    assert_eq!(geo, same);
}

#[test]
fn test_known_places() {
    // Tour Eiffel
    let geo = convert_mgrs_to_geodetic("31UDQ4825111932").unwrap();
    assert_close(geo, 48.8582, 2.2945, 1e-3);

    // Empire State Building
    let geo = convert_mgrs_to_geodetic("18TWL8563811223").unwrap();
    assert_close(geo, 40.7475, -73.9856, 1e-3);

    // Opéra de Sydney
    let geo = convert_mgrs_to_geodetic("56HLH3490052288").unwrap();
    assert_close(geo, -33.8568, 151.2153, 1e-3);
}

#[test]
fn test_distance_matches_reference_vincenty() {
    let p = convert_mgrs_to_geodetic("52SCH456178").unwrap();
    let q = convert_mgrs_to_geodetic("52SCH100400").unwrap();

    let d = geodesic_distance_meters(p, q);
    let reference = Point::from(p).vincenty_distance(&Point::from(q)).unwrap();

    assert!((d - reference).abs() < 0.1, "d={} reference={}", d, reference);
    assert!((d - 41956.143).abs() < 0.1, "d={}", d);

    let via_strings = distance_between("52SCH456178", "52SCH100400").unwrap();
    assert_eq!(d, via_strings);
}

#[test]
fn test_distance_coincident_points() {
    for s in ["52SCH456178", "56HLH3490052288", "01CEM0000074220", "60XWU2965017573"] {
        let p = convert_mgrs_to_geodetic(s).unwrap();
        assert_eq!(geodesic_distance_meters(p, p), 0.0, "{}", s);
    }
    assert_eq!(distance_between("52SCH456178", "52sch 456 178").unwrap(), 0.0);
}

#[test]
fn test_distance_symmetry() {
    let points: Vec<_> = [
        "52SCH456178",
        "52SCH100400",
        "31UDQ4825111932",
        "18TWL8563811223",
        "56HLH3490052288",
    ]
    .iter()
    .map(|s| convert_mgrs_to_geodetic(s).unwrap())
    .collect();

    for p in &points {
        for q in &points {
            assert_eq!(
                geodesic_distance_meters(*p, *q),
                geodesic_distance_meters(*q, *p)
            );
        }
    }
}

#[test]
fn test_invalid_letters_rejected() {
    for s in ["52SIH456178", "52SOH456178", "52SCI456178", "52SCO456178"] {
        assert!(
            matches!(convert_mgrs_to_geodetic(s), Err(MgrsError::InvalidFormat { .. })),
            "should reject {}",
            s
        );
    }
}

#[test]
fn test_malformed_length_rejected() {
    for s in ["52SCH45617", "52SCH4", "52SCH12345678901", "2SCH456178", "52S456178"] {
        assert!(
            matches!(convert_mgrs_to_geodetic(s), Err(MgrsError::InvalidFormat { .. })),
            "should reject {}",
            s
        );
    }
}

#[test]
fn test_southern_hemisphere() {
    let mgrs = decode("56HLH3490052288").unwrap();
    assert_eq!(mgrs.hemisphere(), Hemisphere::South);

    // Northing de ligne relatif à l'équateur, puis false northing ajouté
    let row = mgrs::grid::resolve_northing(mgrs.row, mgrs.zone, mgrs.band).unwrap();
    assert!(row + f64::from(mgrs.northing_offset) < 10_000_000.0);
    let utm = to_utm(&mgrs).unwrap();
    assert_eq!(utm.northing, row + f64::from(mgrs.northing_offset) + 10_000_000.0);

    let geo = convert_mgrs_to_geodetic("56HLH3490052288").unwrap();
    assert!(geo.latitude < 0.0, "lat={}", geo.latitude);

    // Juste sous l'équateur
    let geo = convert_mgrs_to_geodetic("32MNE0000088946").unwrap();
    assert_close(geo, -0.1, 9.0, 1e-4);
}

#[test]
fn test_band_fixes_hemisphere_for_every_row() {
    const ROWS: &str = "ABCDEFGHJKLMNPQRSTUV";

    for (band, south) in [('M', true), ('N', false)] {
        let mut accepted = 0;
        for row in ROWS.chars() {
            let mgrs = format!("31{}D{}0000000000", band, row);
            match convert_mgrs_to_geodetic(&mgrs) {
                Ok(geo) => {
                    accepted += 1;
                    if south {
                        assert!(geo.latitude < 0.0, "{} -> {}", mgrs, geo.latitude);
                    } else {
                        assert!(geo.latitude >= 0.0, "{} -> {}", mgrs, geo.latitude);
                    }
                }
                Err(e) => assert!(matches!(e, MgrsError::InvalidFormat { .. }), "{}: {:?}", mgrs, e),
            }
        }
        assert!(accepted > 0, "no row accepted in band {}", band);
    }

    assert!(matches!(
        convert_mgrs_to_geodetic("31MDE0000000000"),
        Err(MgrsError::InvalidFormat { .. })
    ));
}

#[test]
fn test_zone_boundaries() {
    let geo = convert_mgrs_to_geodetic("01CEM0000074220").unwrap();
    assert_close(geo, -79.5, -177.0, 1e-4);

    let geo = convert_mgrs_to_geodetic("60XWU2965017573").unwrap();
    assert_close(geo, 83.9, 179.5, 1e-4);
}

#[test]
fn test_precision_refinement_stays_in_cell() {
    let ladder = [
        "52SCH41",
        "52SCH4517",
        "52SCH451174",
        "52SCH45121745",
        "52SCH4512317456",
    ];

    for pair in ladder.windows(2) {
        let coarse = decode(pair[0]).unwrap();
        let cell = f64::from(coarse.cell_size());
        let d = distance_between(pair[0], pair[1]).unwrap();
        assert!(
            d < cell * std::f64::consts::SQRT_2,
            "{} -> {}: {} m for a {} m cell",
            pair[0],
            pair[1],
            d,
            cell
        );
    }

    let d = distance_between("52SCH41", "52SCH4512317456").unwrap();
    assert!(d < 10_000.0, "d={}", d);
}

#[test]
fn test_precision_zero_is_square_corner() {
    let corner = convert_mgrs_to_geodetic("52SCH").unwrap();
    let explicit = convert_mgrs_to_geodetic("52SCH0000000000").unwrap();
    assert_eq!(corner, explicit);
}

#[test]
fn test_foreign_column_letter_rejected() {
    // Zone 52 utilise A-H : S n'existe pas
    let err = convert_mgrs_to_geodetic("52SSH456178").unwrap_err();
    assert!(matches!(err, MgrsError::InvalidFormat { .. }));
}

#[test]
fn test_concurrent_calls() {
    use rayon::prelude::*;

    let inputs: Vec<String> = (0..200)
        .map(|i| format!("52SCH{:05}{:05}", i * 400, i * 300))
        .collect();

    let sequential: Vec<_> = inputs
        .iter()
        .map(|s| convert_mgrs_to_geodetic(s).unwrap())
        .collect();
    let parallel: Vec<_> = inputs
        .par_iter()
        .map(|s| convert_mgrs_to_geodetic(s).unwrap())
        .collect();

    assert_eq!(sequential, parallel);
}
