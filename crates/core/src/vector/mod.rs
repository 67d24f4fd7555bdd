//! Vector feature types
//!
//! Thin wrappers around geo-types geometries with attribute maps. The
//! toolkit only ever works with one line layer (the railroads) and one
//! derived polygon layer (the buffer), so the types stay deliberately
//! small.

use geo_types::{Geometry, LineString};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Attribute value types
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum AttributeValue {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
}

/// A geographic feature with geometry and attributes
#[derive(Debug, Clone)]
pub struct Feature {
    /// Feature geometry
    pub geometry: Option<Geometry<f64>>,
    /// Feature attributes
    pub properties: HashMap<String, AttributeValue>,
}

impl Feature {
    /// Create a new feature with geometry
    pub fn new(geometry: Geometry<f64>) -> Self {
        Self {
            geometry: Some(geometry),
            properties: HashMap::new(),
        }
    }

    /// Set an attribute
    pub fn set_property(&mut self, key: impl Into<String>, value: AttributeValue) {
        self.properties.insert(key.into(), value);
    }

    /// Get an attribute
    pub fn get_property(&self, key: &str) -> Option<&AttributeValue> {
        self.properties.get(key)
    }

    /// The feature's line strings, if it carries line geometry.
    ///
    /// MultiLineString parts are returned individually; other geometry
    /// kinds yield an empty vector.
    pub fn line_strings(&self) -> Vec<&LineString<f64>> {
        match &self.geometry {
            Some(Geometry::LineString(ls)) => vec![ls],
            Some(Geometry::MultiLineString(mls)) => mls.0.iter().collect(),
            _ => Vec::new(),
        }
    }
}

/// Collection of features
#[derive(Debug, Clone, Default)]
pub struct FeatureCollection {
    pub features: Vec<Feature>,
}

impl FeatureCollection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, feature: Feature) {
        self.features.push(feature);
    }

    pub fn len(&self) -> usize {
        self.features.len()
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Feature> {
        self.features.iter()
    }

    /// All line strings across the collection
    pub fn line_strings(&self) -> Vec<&LineString<f64>> {
        self.features.iter().flat_map(|f| f.line_strings()).collect()
    }
}

impl IntoIterator for FeatureCollection {
    type Item = Feature;
    type IntoIter = std::vec::IntoIter<Feature>;

    fn into_iter(self) -> Self::IntoIter {
        self.features.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo_types::line_string;

    #[test]
    fn test_line_strings_from_feature() {
        let ls = line_string![(x: 0.0, y: 0.0), (x: 10.0, y: 0.0)];
        let feature = Feature::new(Geometry::LineString(ls));
        assert_eq!(feature.line_strings().len(), 1);
    }

    #[test]
    fn test_non_line_geometry_yields_nothing() {
        let feature = Feature::new(Geometry::Point(geo_types::Point::new(1.0, 2.0)));
        assert!(feature.line_strings().is_empty());
    }

    #[test]
    fn test_collection_properties() {
        let ls = line_string![(x: 0.0, y: 0.0), (x: 5.0, y: 5.0)];
        let mut feature = Feature::new(Geometry::LineString(ls));
        feature.set_property("name", AttributeValue::String("railroad".into()));

        let mut fc = FeatureCollection::new();
        fc.push(feature);

        assert_eq!(fc.len(), 1);
        assert_eq!(fc.line_strings().len(), 1);
        assert!(matches!(
            fc.iter().next().unwrap().get_property("name"),
            Some(AttributeValue::String(_))
        ));
    }
}
