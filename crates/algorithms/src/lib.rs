//! # Terratab Algorithms
//!
//! Geoprocessing operations for the land-use cross-tabulation pipeline:
//!
//! - **reclass**: remap-table raster reclassification
//! - **buffer**: flat-capped planar buffering of line layers
//! - **rasterize**: polygon-to-zone-raster conversion
//! - **zonal**: land-use pixel counts per zone (zonal histogram)

pub mod buffer;
pub mod rasterize;
pub mod reclass;
pub mod zonal;

pub use buffer::{buffer_line, buffer_lines, BufferParams};
pub use rasterize::rasterize;
pub use reclass::{reclassify, RemapRule, RemapTable};
pub use zonal::{zonal_histogram, ZonalHistogram};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::buffer::{buffer_line, buffer_lines, BufferParams};
    pub use crate::rasterize::rasterize;
    pub use crate::reclass::{reclassify, RemapRule, RemapTable};
    pub use crate::zonal::{zonal_histogram, ZonalHistogram};
    pub use terratab_core::prelude::*;
}
