//! I/O operations for reading and writing geospatial data

mod geojson_io;
mod geotiff;

pub use geojson_io::read_line_layer;
pub use geotiff::{read_geotiff, read_geotiff_from_buffer, write_geotiff, write_geotiff_to_buffer};
