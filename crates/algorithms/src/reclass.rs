//! Raster reclassification
//!
//! Maps raw cell values into discrete class codes via an ordered remap
//! table. Range bounds are inclusive on both ends, matching the remap
//! convention of the geodatabase tables this pipeline mirrors: the
//! elevation bands `1..=1000`, `1001..=1400`, ... only tile the value
//! space under inclusive semantics.

use ndarray::Array2;
use rayon::prelude::*;
use terratab_core::raster::{Raster, RasterElement};
use terratab_core::{Error, Result};

/// A single remap rule
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RemapRule {
    /// Map values in `min..=max` to `class`
    Range { min: f64, max: f64, class: i32 },
    /// Map an exact value to `class`
    Value { value: f64, class: i32 },
    /// Map values in `min..=max` to no-data
    NoData { min: f64, max: f64 },
}

impl RemapRule {
    fn matches(&self, v: f64) -> bool {
        match *self {
            RemapRule::Range { min, max, .. } | RemapRule::NoData { min, max } => {
                v >= min && v <= max
            }
            RemapRule::Value { value, .. } => (v - value).abs() < f64::EPSILON,
        }
    }
}

/// An ordered remap table
///
/// Rules are evaluated in order; the first match wins. Cells matching
/// no rule, like cells matching a `NoData` rule, become no-data.
#[derive(Debug, Clone, Default)]
pub struct RemapTable {
    rules: Vec<RemapRule>,
}

impl RemapTable {
    pub fn new(rules: Vec<RemapRule>) -> Self {
        Self { rules }
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// The set of target class codes, in rule order
    pub fn classes(&self) -> Vec<i32> {
        let mut classes = Vec::new();
        for rule in &self.rules {
            match *rule {
                RemapRule::Range { class, .. } | RemapRule::Value { class, .. } => {
                    if !classes.contains(&class) {
                        classes.push(class);
                    }
                }
                RemapRule::NoData { .. } => {}
            }
        }
        classes
    }

    /// Resolve a value to a class code, or `None` for no-data
    pub fn class_of(&self, v: f64) -> Option<i32> {
        for rule in &self.rules {
            if rule.matches(v) {
                return match *rule {
                    RemapRule::Range { class, .. } | RemapRule::Value { class, .. } => Some(class),
                    RemapRule::NoData { .. } => None,
                };
            }
        }
        None
    }
}

/// Reclassify a raster into discrete class codes.
///
/// Output cells carry either a class code from the table or the no-data
/// sentinel; no raw input value can escape the mapping. The output
/// inherits the input's geotransform.
///
/// # Arguments
/// * `raster` - Input raster of continuous or coded values
/// * `table` - Ordered remap table
pub fn reclassify(raster: &Raster<f64>, table: &RemapTable) -> Result<Raster<i32>> {
    if table.is_empty() {
        return Err(Error::InvalidParameter {
            name: "table",
            value: "[]".to_string(),
            reason: "remap table has no rules".to_string(),
        });
    }

    let (rows, cols) = raster.shape();
    let nodata = i32::default_nodata();

    let data: Vec<i32> = (0..rows)
        .into_par_iter()
        .flat_map(|row| {
            let mut row_data = vec![nodata; cols];
            for (col, out) in row_data.iter_mut().enumerate() {
                let val = unsafe { raster.get_unchecked(row, col) };
                if raster.is_nodata(val) {
                    continue;
                }
                if let Some(class) = table.class_of(val) {
                    *out = class;
                }
            }
            row_data
        })
        .collect();

    let mut output = raster.with_same_meta::<i32>();
    output.set_nodata(Some(nodata));
    *output.data_mut() =
        Array2::from_shape_vec((rows, cols), data).map_err(|e| Error::Other(e.to_string()))?;

    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use terratab_core::GeoTransform;

    fn elevation_table() -> RemapTable {
        RemapTable::new(vec![
            RemapRule::Range { min: -9999.0, max: -1.0, class: 1 },
            RemapRule::NoData { min: 0.0, max: 0.0 },
            RemapRule::Range { min: 1.0, max: 1000.0, class: 1 },
            RemapRule::Range { min: 1001.0, max: 1400.0, class: 2 },
            RemapRule::Range { min: 1401.0, max: 1800.0, class: 3 },
            RemapRule::Range { min: 1801.0, max: 2200.0, class: 4 },
        ])
    }

    fn make_dem() -> Raster<f64> {
        let values = vec![
            -50.0, 0.0, 500.0, 1000.0, //
            1001.0, 1200.0, 1400.0, 1401.0, //
            1650.0, 1800.0, 1801.0, 2200.0, //
            2500.0, f64::NAN, 900.0, 1100.0,
        ];
        let mut r = Raster::from_vec(values, 4, 4).unwrap();
        r.set_transform(GeoTransform::new(0.0, 4.0, 1.0, -1.0));
        r
    }

    #[test]
    fn test_band_boundaries_are_inclusive() {
        let result = reclassify(&make_dem(), &elevation_table()).unwrap();

        assert_eq!(result.get(0, 3).unwrap(), 1); // 1000
        assert_eq!(result.get(1, 0).unwrap(), 2); // 1001
        assert_eq!(result.get(1, 2).unwrap(), 2); // 1400
        assert_eq!(result.get(1, 3).unwrap(), 3); // 1401
        assert_eq!(result.get(2, 1).unwrap(), 3); // 1800
        assert_eq!(result.get(2, 2).unwrap(), 4); // 1801
        assert_eq!(result.get(2, 3).unwrap(), 4); // 2200
    }

    #[test]
    fn test_negative_values_fold_into_first_band() {
        let result = reclassify(&make_dem(), &elevation_table()).unwrap();
        assert_eq!(result.get(0, 0).unwrap(), 1); // -50
    }

    #[test]
    fn test_nodata_rule_and_unmatched_values() {
        let result = reclassify(&make_dem(), &elevation_table()).unwrap();

        // 0 hits the explicit NoData rule
        assert!(result.is_nodata(result.get(0, 1).unwrap()));
        // 2500 matches no rule
        assert!(result.is_nodata(result.get(3, 0).unwrap()));
        // NaN input stays no-data
        assert!(result.is_nodata(result.get(3, 1).unwrap()));
    }

    #[test]
    fn test_no_raw_value_escapes() {
        let result = reclassify(&make_dem(), &elevation_table()).unwrap();
        let classes = elevation_table().classes();

        for row in 0..result.rows() {
            for col in 0..result.cols() {
                let v = result.get(row, col).unwrap();
                assert!(
                    result.is_nodata(v) || classes.contains(&v),
                    "raw value escaped at ({}, {}): {}",
                    row,
                    col,
                    v
                );
            }
        }
    }

    #[test]
    fn test_value_rule_exact_match() {
        let table = RemapTable::new(vec![RemapRule::Value { value: 51.0, class: 5 }]);
        let raster = Raster::from_vec(vec![51.0, 51.5, 50.0, 52.0], 2, 2).unwrap();
        let result = reclassify(&raster, &table).unwrap();

        assert_eq!(result.get(0, 0).unwrap(), 5);
        assert!(result.is_nodata(result.get(0, 1).unwrap()));
    }

    #[test]
    fn test_empty_table_is_rejected() {
        let raster = Raster::from_vec(vec![1.0; 4], 2, 2).unwrap();
        assert!(reclassify(&raster, &RemapTable::default()).is_err());
    }

    #[test]
    fn test_first_matching_rule_wins() {
        let table = RemapTable::new(vec![
            RemapRule::NoData { min: 0.0, max: 10.0 },
            RemapRule::Range { min: 0.0, max: 100.0, class: 1 },
        ]);
        let raster = Raster::from_vec(vec![5.0, 50.0, 5.0, 50.0], 2, 2).unwrap();
        let result = reclassify(&raster, &table).unwrap();

        assert!(result.is_nodata(result.get(0, 0).unwrap()));
        assert_eq!(result.get(0, 1).unwrap(), 1);
    }
}
