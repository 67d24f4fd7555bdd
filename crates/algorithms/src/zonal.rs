//! Zonal histogram
//!
//! Counts classified-raster cell populations within each zone of a zone
//! raster: one row per class value, one column per zone id. The
//! analysis mask is an explicit parameter rather than ambient state, so
//! concurrent counts over different masks cannot interfere.

use ndarray::Array2;
use std::collections::BTreeMap;
use terratab_core::raster::Raster;
use terratab_core::{Error, Result};

/// Pixel counts per (class value, zone id) pair
#[derive(Debug, Clone)]
pub struct ZonalHistogram {
    /// Sorted zone ids (columns)
    zones: Vec<i32>,
    /// Sorted class values (rows)
    classes: Vec<i32>,
    /// counts[(class index, zone index)]
    counts: Array2<u64>,
}

impl ZonalHistogram {
    /// Rebuild a histogram from its parts (e.g. a persisted table)
    pub fn from_parts(zones: Vec<i32>, classes: Vec<i32>, counts: Array2<u64>) -> Result<Self> {
        if counts.dim() != (classes.len(), zones.len()) {
            return Err(Error::Table(format!(
                "count matrix is {:?}, expected ({}, {})",
                counts.dim(),
                classes.len(),
                zones.len()
            )));
        }
        Ok(Self { zones, classes, counts })
    }

    /// Zone ids, ascending
    pub fn zones(&self) -> &[i32] {
        &self.zones
    }

    /// Class values, ascending
    pub fn classes(&self) -> &[i32] {
        &self.classes
    }

    /// Pixel count for a (class, zone) pair; absent pairs count zero
    pub fn count(&self, class: i32, zone: i32) -> u64 {
        let Ok(ci) = self.classes.binary_search(&class) else {
            return 0;
        };
        let Ok(zi) = self.zones.binary_search(&zone) else {
            return 0;
        };
        self.counts[(ci, zi)]
    }

    /// Pixel count for a class summed across every zone
    pub fn class_total(&self, class: i32) -> u64 {
        let Ok(ci) = self.classes.binary_search(&class) else {
            return 0;
        };
        self.counts.row(ci).iter().sum()
    }

    /// Total pixel count across all classes and zones
    pub fn total(&self) -> u64 {
        self.counts.iter().sum()
    }
}

/// Cross-tabulate class values against zones.
///
/// A cell contributes to the count for (value class, zone) when it is
/// valid in `zones`, `values` and, if given, `mask`. The three rasters
/// must share dimensions.
///
/// # Arguments
/// * `zones` - Zone raster (integer identifiers)
/// * `values` - Classified raster to count
/// * `mask` - Optional analysis mask; its no-data cells are excluded
pub fn zonal_histogram(
    zones: &Raster<i32>,
    values: &Raster<i32>,
    mask: Option<&Raster<i32>>,
) -> Result<ZonalHistogram> {
    check_shape(zones, values)?;
    if let Some(mask) = mask {
        check_shape(zones, mask)?;
    }

    let (rows, cols) = zones.shape();
    let mut tally: BTreeMap<(i32, i32), u64> = BTreeMap::new();

    for row in 0..rows {
        for col in 0..cols {
            let zone = unsafe { zones.get_unchecked(row, col) };
            if zones.is_nodata(zone) {
                continue;
            }
            let value = unsafe { values.get_unchecked(row, col) };
            if values.is_nodata(value) {
                continue;
            }
            if let Some(mask) = mask {
                let m = unsafe { mask.get_unchecked(row, col) };
                if mask.is_nodata(m) {
                    continue;
                }
            }

            *tally.entry((value, zone)).or_insert(0) += 1;
        }
    }

    let mut classes: Vec<i32> = tally.keys().map(|&(c, _)| c).collect();
    classes.dedup();
    let mut zone_ids: Vec<i32> = tally.keys().map(|&(_, z)| z).collect();
    zone_ids.sort_unstable();
    zone_ids.dedup();

    let mut counts = Array2::zeros((classes.len(), zone_ids.len()));
    for ((class, zone), n) in tally {
        let ci = classes.binary_search(&class).ok();
        let zi = zone_ids.binary_search(&zone).ok();
        if let (Some(ci), Some(zi)) = (ci, zi) {
            counts[(ci, zi)] = n;
        }
    }

    ZonalHistogram::from_parts(zone_ids, classes, counts)
}

fn check_shape(a: &Raster<i32>, b: &Raster<i32>) -> Result<()> {
    let (ar, ac) = a.shape();
    let (br, bc) = b.shape();
    if (ar, ac) != (br, bc) {
        return Err(Error::SizeMismatch { er: ar, ec: ac, ar: br, ac: bc });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raster(values: Vec<i32>, rows: usize, cols: usize) -> Raster<i32> {
        let mut r = Raster::from_vec(values, rows, cols).unwrap();
        r.set_nodata(Some(i32::MIN));
        r
    }

    #[test]
    fn test_basic_crosstab() {
        // Zones: left half 1, right half 2
        let zones = raster(vec![1, 1, 2, 2, 1, 1, 2, 2], 2, 4);
        // Classes: top row 10, bottom row 20
        let values = raster(vec![10, 10, 10, 10, 20, 20, 20, 20], 2, 4);

        let hist = zonal_histogram(&zones, &values, None).unwrap();

        assert_eq!(hist.zones(), &[1, 2]);
        assert_eq!(hist.classes(), &[10, 20]);
        assert_eq!(hist.count(10, 1), 2);
        assert_eq!(hist.count(10, 2), 2);
        assert_eq!(hist.count(20, 1), 2);
        assert_eq!(hist.total(), 8);
    }

    #[test]
    fn test_nodata_cells_are_skipped() {
        let nd = i32::MIN;
        let zones = raster(vec![1, nd, 1, 1], 2, 2);
        let values = raster(vec![5, 5, nd, 5], 2, 2);

        let hist = zonal_histogram(&zones, &values, None).unwrap();
        assert_eq!(hist.count(5, 1), 2);
        assert_eq!(hist.total(), 2);
    }

    #[test]
    fn test_mask_excludes_cells() {
        let nd = i32::MIN;
        let zones = raster(vec![1, 1, 1, 1], 2, 2);
        let values = raster(vec![5, 5, 5, 5], 2, 2);
        let mask = raster(vec![1, nd, nd, 1], 2, 2);

        let hist = zonal_histogram(&zones, &values, Some(&mask)).unwrap();
        assert_eq!(hist.count(5, 1), 2);
    }

    #[test]
    fn test_dimension_mismatch() {
        let zones = raster(vec![1; 4], 2, 2);
        let values = raster(vec![5; 6], 2, 3);
        assert!(zonal_histogram(&zones, &values, None).is_err());

        let mask = raster(vec![1; 6], 3, 2);
        let values_ok = raster(vec![5; 4], 2, 2);
        assert!(zonal_histogram(&zones, &values_ok, Some(&mask)).is_err());
    }

    #[test]
    fn test_absent_pair_counts_zero() {
        let zones = raster(vec![1, 1, 1, 1], 2, 2);
        let values = raster(vec![5, 5, 6, 6], 2, 2);

        let hist = zonal_histogram(&zones, &values, None).unwrap();
        assert_eq!(hist.count(7, 1), 0);
        assert_eq!(hist.count(5, 99), 0);
        assert_eq!(hist.class_total(5), 2);
    }

    #[test]
    fn test_from_parts_shape_check() {
        let bad = Array2::zeros((2, 3));
        assert!(ZonalHistogram::from_parts(vec![1], vec![10, 20], bad).is_err());
    }
}
