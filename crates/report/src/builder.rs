//! Report assembly
//!
//! Turns the two zonal count tables into the four percentage views the
//! workbook ships: land-use by elevation band and by railroad
//! proximity, each normalized by row and by column.

use crate::frame::Frame;
use crate::landuse::{ALL_LAND_USES, CLOSE_COL, ELEV_BANDS, FAR_COL, INDEX_NAME, TOTALS};
use terratab_algorithms::ZonalHistogram;
use terratab_core::Result;

/// The assembled report: the full wide frame plus the four sheet views
#[derive(Debug, Clone)]
pub struct Report {
    /// Counts joined with both percentage derivations
    pub combined: Frame,
    pub elev_by_rows: Frame,
    pub elev_by_columns: Frame,
    pub rr_by_rows: Frame,
    pub rr_by_columns: Frame,
}

/// Land-use row labels, sorted alphabetically (pivot order)
fn landuse_rows() -> Vec<String> {
    let mut rows: Vec<String> = ALL_LAND_USES.iter().map(|lu| lu.label().to_string()).collect();
    rows.sort();
    rows
}

/// Count for one land-use label, or zero when the category has no pixels
fn count_for(hist: &ZonalHistogram, label: &str, zone: Option<i32>) -> f64 {
    let Some(lu) = ALL_LAND_USES.iter().copied().find(|lu| lu.label() == label) else {
        return 0.0;
    };
    match zone {
        Some(zone) => hist.count(lu.code(), zone) as f64,
        None => hist.class_total(lu.code()) as f64,
    }
}

/// Pivot the elevation histogram: one column per band, TOTALS margins
/// on both axes.
fn pivot_elevation(hist: &ZonalHistogram) -> Result<Frame> {
    let rows = landuse_rows();
    let mut frame = Frame::new(INDEX_NAME, rows.clone());

    for (zone, label) in ELEV_BANDS {
        let values: Vec<f64> = rows.iter().map(|r| count_for(hist, r, Some(zone))).collect();
        frame.add_column(label, values)?;
    }

    frame.with_totals_row(TOTALS).with_totals_column(TOTALS)
}

/// Pivot the railroad-distance histogram: the single close-to-rail
/// column with a TOTALS margins row. The buffer layer is one dissolved
/// feature, so every zone of the histogram counts as "close".
fn pivot_rrdist(hist: &ZonalHistogram) -> Result<Frame> {
    let rows = landuse_rows();
    let mut frame = Frame::new(INDEX_NAME, rows.clone());

    let values: Vec<f64> = rows.iter().map(|r| count_for(hist, r, None)).collect();
    frame.add_column(CLOSE_COL, values)?;

    Ok(frame.with_totals_row(TOTALS))
}

/// Assemble the report from the two zonal count tables.
///
/// Far-from-rail counts are always derived as `TOTALS - close`, never
/// read from a source table; the percentage frames are derived from,
/// and never mutate, the count frame.
pub fn build_report(elev: &ZonalHistogram, rrdist: &ZonalHistogram) -> Result<Report> {
    let elev_frame = pivot_elevation(elev)?;
    let rr_frame = pivot_rrdist(rrdist)?;

    // Join rail distance onto elevation, then derive the complement
    let mut counts = rr_frame.join(&elev_frame)?;
    let far: Vec<f64> = counts
        .row_labels()
        .to_vec()
        .iter()
        .map(|row| {
            Ok(counts.get(row, TOTALS)? - counts.get(row, CLOSE_COL)?)
        })
        .collect::<Result<_>>()?;
    counts.add_column(FAR_COL, far)?;

    let by_rows = counts.div_by_column(TOTALS, " row %")?;
    let by_columns = counts.div_by_row(TOTALS, " column %")?;

    let combined = counts.join(&by_rows)?.join(&by_columns)?;

    let report = Report {
        elev_by_rows: select_pairs(&combined, &elevation_columns(), " row %")?,
        elev_by_columns: select_pairs(&combined, &elevation_columns(), " column %")?,
        rr_by_rows: select_pairs(&combined, &rail_columns(), " row %")?,
        rr_by_columns: select_pairs(&combined, &rail_columns(), " column %")?,
        combined,
    };

    Ok(report)
}

fn elevation_columns() -> Vec<&'static str> {
    let mut cols: Vec<&'static str> = ELEV_BANDS.iter().map(|&(_, label)| label).collect();
    cols.push(TOTALS);
    cols
}

fn rail_columns() -> Vec<&'static str> {
    vec![CLOSE_COL, FAR_COL, TOTALS]
}

/// View with each count column immediately followed by its percentage
fn select_pairs(combined: &Frame, counts: &[&str], suffix: &str) -> Result<Frame> {
    let pct_names: Vec<String> = counts.iter().map(|c| format!("{}{}", c, suffix)).collect();

    let mut names: Vec<&str> = Vec::with_capacity(counts.len() * 2);
    for (count, pct) in counts.iter().zip(pct_names.iter()) {
        names.push(count);
        names.push(pct.as_str());
    }
    combined.select(&names)
}
