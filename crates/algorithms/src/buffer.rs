//! Line buffering
//!
//! Builds a fixed-distance planar buffer polygon around line layers.
//! End caps are FLAT (the buffer stops at the line's endpoints) and
//! interior joins are round, approximated by circles with a
//! configurable segment count. All parts are dissolved into a single
//! multipolygon.

use geo::BooleanOps;
use geo_types::{LineString, MultiPolygon, Polygon};
use std::f64::consts::PI;
use terratab_core::{Error, Result};

/// Parameters for buffer operations
#[derive(Debug, Clone)]
pub struct BufferParams {
    /// Buffer distance in map units
    pub distance: f64,
    /// Number of segments to approximate round joins (default: 16)
    pub segments: usize,
}

impl Default for BufferParams {
    fn default() -> Self {
        Self {
            // 6 miles in metres
            distance: 9656.064,
            segments: 16,
        }
    }
}

impl BufferParams {
    fn validate(&self) -> Result<()> {
        if !(self.distance > 0.0) {
            return Err(Error::InvalidParameter {
                name: "distance",
                value: self.distance.to_string(),
                reason: "buffer distance must be positive".to_string(),
            });
        }
        Ok(())
    }
}

/// Buffer a single line with flat end caps.
///
/// Each segment contributes an offset rectangle; each interior vertex
/// contributes a join circle. The union of those parts is the flat-cap,
/// round-join buffer polygon.
///
/// # Arguments
/// * `line` - Input polyline (at least two distinct vertices)
/// * `params` - Distance and join resolution
pub fn buffer_line(line: &LineString<f64>, params: &BufferParams) -> Result<MultiPolygon<f64>> {
    params.validate()?;

    let parts = buffer_parts(line, params)?;
    Ok(dissolve(parts))
}

/// Buffer every line in a layer and merge the results into one feature.
pub fn buffer_lines(lines: &[&LineString<f64>], params: &BufferParams) -> Result<MultiPolygon<f64>> {
    params.validate()?;

    let mut parts = Vec::new();
    for line in lines {
        parts.extend(buffer_parts(line, params)?);
    }
    if parts.is_empty() {
        return Err(Error::NoGeometry("empty line layer".to_string()));
    }
    Ok(dissolve(parts))
}

/// Rectangles and join circles making up one line's buffer
fn buffer_parts(line: &LineString<f64>, params: &BufferParams) -> Result<Vec<Polygon<f64>>> {
    let coords = &line.0;
    let d = params.distance;

    let mut parts: Vec<Polygon<f64>> = Vec::new();

    for pair in coords.windows(2) {
        let (a, b) = (pair[0], pair[1]);
        let dx = b.x - a.x;
        let dy = b.y - a.y;
        let len = (dx * dx + dy * dy).sqrt();
        if len < f64::EPSILON {
            continue; // degenerate segment
        }

        // Unit normal, scaled to the buffer distance
        let nx = -dy / len * d;
        let ny = dx / len * d;

        parts.push(Polygon::new(
            LineString::from(vec![
                (a.x + nx, a.y + ny),
                (b.x + nx, b.y + ny),
                (b.x - nx, b.y - ny),
                (a.x - nx, a.y - ny),
                (a.x + nx, a.y + ny),
            ]),
            vec![],
        ));
    }

    if parts.is_empty() {
        return Err(Error::NoGeometry(
            "line has no segments of non-zero length".to_string(),
        ));
    }

    // Round joins at interior vertices only; the endpoints stay flat
    for coord in &coords[1..coords.len() - 1] {
        parts.push(circle(coord.x, coord.y, d, params.segments));
    }

    Ok(parts)
}

/// Polygon approximation of a circle
fn circle(cx: f64, cy: f64, r: f64, segments: usize) -> Polygon<f64> {
    let n = segments.max(4);

    let mut coords = Vec::with_capacity(n + 1);
    for i in 0..n {
        let angle = 2.0 * PI * i as f64 / n as f64;
        coords.push((cx + r * angle.cos(), cy + r * angle.sin()));
    }
    coords.push(coords[0]);

    Polygon::new(LineString::from(coords), vec![])
}

/// Union a set of polygons into one multipolygon
fn dissolve(parts: Vec<Polygon<f64>>) -> MultiPolygon<f64> {
    let mut merged = MultiPolygon::new(Vec::new());
    for part in parts {
        if merged.0.is_empty() {
            merged.0.push(part);
        } else {
            merged = merged.union(&MultiPolygon::new(vec![part]));
        }
    }
    merged
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use geo::{Area, Contains};
    use geo_types::{line_string, Point};

    #[test]
    fn test_straight_segment_is_a_rectangle() {
        let line = line_string![(x: 0.0, y: 0.0), (x: 10.0, y: 0.0)];
        let buffer = buffer_line(&line, &BufferParams { distance: 2.0, segments: 16 }).unwrap();

        // Flat caps: exactly length x 2*distance
        assert_relative_eq!(buffer.unsigned_area(), 40.0, epsilon = 1e-9);
        assert!(buffer.contains(&Point::new(5.0, 1.9)));
        assert!(buffer.contains(&Point::new(5.0, -1.9)));
    }

    #[test]
    fn test_flat_caps_do_not_extend_past_endpoints() {
        let line = line_string![(x: 0.0, y: 0.0), (x: 10.0, y: 0.0)];
        let buffer = buffer_line(&line, &BufferParams { distance: 2.0, segments: 16 }).unwrap();

        assert!(!buffer.contains(&Point::new(-1.0, 0.0)));
        assert!(!buffer.contains(&Point::new(11.0, 0.0)));
    }

    #[test]
    fn test_round_join_at_interior_vertex() {
        let line = line_string![(x: 0.0, y: 0.0), (x: 10.0, y: 0.0), (x: 10.0, y: 10.0)];
        let buffer = buffer_line(&line, &BufferParams { distance: 2.0, segments: 64 }).unwrap();

        // Point on the outside of the corner, within the join circle
        assert!(buffer.contains(&Point::new(11.3, -1.3)));
        // But not beyond the join radius
        assert!(!buffer.contains(&Point::new(12.0, -2.0)));
    }

    #[test]
    fn test_multiple_lines_merge_into_one_feature() {
        let a = line_string![(x: 0.0, y: 0.0), (x: 10.0, y: 0.0)];
        let b = line_string![(x: 0.0, y: 100.0), (x: 10.0, y: 100.0)];
        let buffer =
            buffer_lines(&[&a, &b], &BufferParams { distance: 2.0, segments: 16 }).unwrap();

        // Disjoint parts stay separate polygons of one multipolygon
        assert_eq!(buffer.0.len(), 2);
        assert_relative_eq!(buffer.unsigned_area(), 80.0, epsilon = 1e-9);
    }

    #[test]
    fn test_zero_length_line_is_rejected() {
        let line = line_string![(x: 5.0, y: 5.0), (x: 5.0, y: 5.0)];
        assert!(buffer_line(&line, &BufferParams { distance: 2.0, segments: 16 }).is_err());
    }

    #[test]
    fn test_non_positive_distance_is_rejected() {
        let line = line_string![(x: 0.0, y: 0.0), (x: 10.0, y: 0.0)];
        assert!(buffer_line(&line, &BufferParams { distance: 0.0, segments: 16 }).is_err());
        assert!(buffer_line(&line, &BufferParams { distance: -5.0, segments: 16 }).is_err());
    }
}
