//! Polygon rasterization
//!
//! Burns a polygon layer onto a grid aligned with a template raster,
//! producing a zone raster for the zonal counter. A cell belongs to the
//! zone when its center falls inside the polygon.

use geo::Contains;
use geo_types::{MultiPolygon, Point};
use ndarray::Array2;
use rayon::prelude::*;
use terratab_core::raster::{Raster, RasterElement};
use terratab_core::{Error, Result};

/// Rasterize a multipolygon onto the template's grid.
///
/// Cells whose center lies inside the polygon receive `zone_id`; all
/// other cells are no-data. The output shares the template's shape and
/// geotransform.
///
/// # Arguments
/// * `polygon` - Zone geometry in the template's coordinate system
/// * `template` - Raster defining grid shape and georeferencing
/// * `zone_id` - Value burned into covered cells
pub fn rasterize<T: RasterElement>(
    polygon: &MultiPolygon<f64>,
    template: &Raster<T>,
    zone_id: i32,
) -> Result<Raster<i32>> {
    if polygon.0.is_empty() {
        return Err(Error::NoGeometry("empty polygon layer".to_string()));
    }

    let (rows, cols) = template.shape();
    let nodata = i32::default_nodata();
    let transform = *template.transform();

    let data: Vec<i32> = (0..rows)
        .into_par_iter()
        .flat_map(|row| {
            let mut row_data = vec![nodata; cols];
            for (col, out) in row_data.iter_mut().enumerate() {
                let (x, y) = transform.pixel_to_geo(col, row);
                if polygon.contains(&Point::new(x, y)) {
                    *out = zone_id;
                }
            }
            row_data
        })
        .collect();

    let mut output = template.with_same_meta::<i32>();
    output.set_nodata(Some(nodata));
    *output.data_mut() =
        Array2::from_shape_vec((rows, cols), data).map_err(|e| Error::Other(e.to_string()))?;

    Ok(output)
}
