//! Export GeoJSON d'un segment entre deux points MGRS

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use ::geojson::{Feature, FeatureCollection, Geometry, JsonObject, JsonValue, Value};
use anyhow::{Context, Result};
use geo::{LineString, Point};
use mgrs::GeodeticCoordinate;

/// Point nommé par sa référence MGRS
#[derive(Debug, Clone)]
pub struct NamedPoint {
    pub mgrs: String,
    pub position: GeodeticCoordinate,
}

/// Construit une FeatureCollection : les deux points et le segment qui les relie
pub fn segment_collection(from: &NamedPoint, to: &NamedPoint, distance_m: f64) -> FeatureCollection {
    let start: Point<f64> = from.position.into();
    let end: Point<f64> = to.position.into();
    let line = LineString::from(vec![start, end]);

    let mut line_props = JsonObject::new();
    line_props.insert("from".to_string(), JsonValue::from(from.mgrs.clone()));
    line_props.insert("to".to_string(), JsonValue::from(to.mgrs.clone()));
    line_props.insert("distance_m".to_string(), JsonValue::from(distance_m));

    FeatureCollection {
        bbox: None,
        features: vec![
            point_feature("from", from, &start),
            point_feature("to", to, &end),
            Feature {
                bbox: None,
                geometry: Some(Geometry::new(Value::from(&line))),
                id: None,
                properties: Some(line_props),
                foreign_members: None,
            },
        ],
        foreign_members: None,
    }
}

fn point_feature(role: &str, named: &NamedPoint, point: &Point<f64>) -> Feature {
    let mut props = JsonObject::new();
    props.insert("role".to_string(), JsonValue::from(role));
    props.insert("mgrs".to_string(), JsonValue::from(named.mgrs.clone()));

    Feature {
        bbox: None,
        geometry: Some(Geometry::new(Value::from(point))),
        id: None,
        properties: Some(props),
        foreign_members: None,
    }
}

/// Écrit le segment en GeoJSON
pub fn export_to_geojson(
    from: &NamedPoint,
    to: &NamedPoint,
    distance_m: f64,
    output_path: &Path,
) -> Result<()> {
    let file = File::create(output_path)
        .context(format!("Failed to create file: {}", output_path.display()))?;
    let mut writer = BufWriter::new(file);

    let collection = segment_collection(from, to, distance_m);
    write!(writer, "{}", collection)?;
    writer.flush()?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn named(mgrs: &str, lat: f64, lon: f64) -> NamedPoint {
        NamedPoint {
            mgrs: mgrs.to_string(),
            position: GeodeticCoordinate::new(lat, lon),
        }
    }

    #[test]
    fn test_segment_collection() {
        let from = named("52SCH456178", 38.09, 127.24);
        let to = named("52SCH100400", 38.29, 126.83);

        let fc = segment_collection(&from, &to, 41956.14);
        assert_eq!(fc.features.len(), 3);

        let json = fc.to_string();
        assert!(json.contains(r#""type":"FeatureCollection""#));
        assert!(json.contains(r#""type":"LineString""#));
        assert!(json.contains(r#""mgrs":"52SCH456178""#));
        // Ordre GeoJSON : longitude d'abord
        assert!(json.contains("[127.24,38.09]"), "{}", json);
    }

    #[test]
    fn test_export_to_geojson() {
        let from = named("52SCH456178", 38.09, 127.24);
        let to = named("52SCH100400", 38.29, 126.83);

        let output_path = std::env::temp_dir().join("mgrs_dist_test_segment.geojson");
        export_to_geojson(&from, &to, 41956.14, &output_path).unwrap();

        let content = std::fs::read_to_string(&output_path).unwrap();
        let parsed: ::geojson::GeoJson = content.parse().unwrap();
        assert!(matches!(parsed, ::geojson::GeoJson::FeatureCollection(_)));
        assert!(content.contains(r#""distance_m":41956.14"#));

        std::fs::remove_file(output_path).ok();
    }
}
