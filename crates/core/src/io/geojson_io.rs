//! GeoJSON line-layer reading
//!
//! Loads a vector layer (e.g. railroad centerlines) from a GeoJSON file
//! into a [`FeatureCollection`]. Only the geometry kinds the toolkit
//! consumes are converted; attributes are carried along as-is.

use crate::error::{Error, Result};
use crate::vector::{AttributeValue, Feature, FeatureCollection};
use geojson::{GeoJson, JsonValue};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// Read a GeoJSON file into a feature collection.
///
/// Accepts a FeatureCollection, a single Feature, or a bare Geometry
/// document. Returns an error if the document contains no line
/// geometry at all, since every caller is after a line layer.
pub fn read_line_layer<P: AsRef<Path>>(path: P) -> Result<FeatureCollection> {
    let file = File::open(path.as_ref())?;
    let gj = GeoJson::from_reader(BufReader::new(file))
        .map_err(|e| Error::Other(format!("GeoJSON parse error: {}", e)))?;

    let mut collection = FeatureCollection::new();

    match gj {
        GeoJson::FeatureCollection(fc) => {
            for feature in fc.features {
                if let Some(converted) = convert_feature(feature)? {
                    collection.push(converted);
                }
            }
        }
        GeoJson::Feature(feature) => {
            if let Some(converted) = convert_feature(feature)? {
                collection.push(converted);
            }
        }
        GeoJson::Geometry(geometry) => {
            let geom = geo_types::Geometry::<f64>::try_from(geometry)
                .map_err(|e| Error::Other(format!("Unsupported geometry: {}", e)))?;
            collection.push(Feature::new(geom));
        }
    }

    if collection.line_strings().is_empty() {
        return Err(Error::NoGeometry(format!(
            "{}: no LineString or MultiLineString features",
            path.as_ref().display()
        )));
    }

    Ok(collection)
}

fn convert_feature(feature: geojson::Feature) -> Result<Option<Feature>> {
    let Some(geometry) = feature.geometry else {
        return Ok(None);
    };

    let geom = geo_types::Geometry::<f64>::try_from(geometry)
        .map_err(|e| Error::Other(format!("Unsupported geometry: {}", e)))?;

    let mut converted = Feature::new(geom);

    if let Some(props) = feature.properties {
        for (key, value) in props {
            converted.set_property(key, convert_value(value));
        }
    }

    Ok(Some(converted))
}

fn convert_value(value: JsonValue) -> AttributeValue {
    match value {
        JsonValue::Bool(b) => AttributeValue::Bool(b),
        JsonValue::Number(n) => {
            if let Some(i) = n.as_i64() {
                AttributeValue::Int(i)
            } else {
                AttributeValue::Float(n.as_f64().unwrap_or(f64::NAN))
            }
        }
        JsonValue::String(s) => AttributeValue::String(s),
        _ => AttributeValue::Null,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const RAIL_GEOJSON: &str = r#"{
        "type": "FeatureCollection",
        "features": [
            {
                "type": "Feature",
                "properties": {"name": "mainline", "track_id": 27075},
                "geometry": {
                    "type": "LineString",
                    "coordinates": [[0.0, 0.0], [100.0, 0.0], [200.0, 50.0]]
                }
            }
        ]
    }"#;

    fn write_temp(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_read_line_layer() {
        let file = write_temp(RAIL_GEOJSON);
        let layer = read_line_layer(file.path()).unwrap();

        assert_eq!(layer.len(), 1);
        let lines = layer.line_strings();
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].0.len(), 3);

        let feature = layer.iter().next().unwrap();
        assert!(matches!(
            feature.get_property("track_id"),
            Some(AttributeValue::Int(27075))
        ));
    }

    #[test]
    fn test_rejects_layer_without_lines() {
        let file = write_temp(
            r#"{"type": "Feature", "properties": {},
                "geometry": {"type": "Point", "coordinates": [1.0, 2.0]}}"#,
        );
        assert!(matches!(
            read_line_layer(file.path()),
            Err(Error::NoGeometry(_))
        ));
    }
}
