//! XLSX workbook output
//!
//! Writes the four report views to one workbook, one sheet each. Cells
//! holding non-finite percentages (a zero-pixel category divided by its
//! zero total) are left blank, like the source tables they mirror.

use crate::builder::Report;
use crate::frame::Frame;
use rust_xlsxwriter::{Workbook, Worksheet};
use std::path::Path;
use terratab_core::{Error, Result};

/// Sheet names, in workbook order
pub const SHEET_NAMES: [&str; 4] = [
    "elev_by_rows",
    "elev_by_columns",
    "rr_by_rows",
    "rr_by_columns",
];

/// One sheet cell: position plus text or numeric content
#[derive(Debug, Clone, PartialEq)]
enum Cell<'a> {
    Text(u32, u16, &'a str),
    Number(u32, u16, f64),
}

/// Write the report to a four-sheet XLSX workbook
pub fn write_workbook<P: AsRef<Path>>(report: &Report, path: P) -> Result<()> {
    let mut workbook = Workbook::new();

    let views = [
        &report.elev_by_rows,
        &report.elev_by_columns,
        &report.rr_by_rows,
        &report.rr_by_columns,
    ];

    for (name, frame) in SHEET_NAMES.iter().zip(views) {
        let worksheet = workbook.add_worksheet();
        worksheet
            .set_name(*name)
            .map_err(|e| Error::Workbook(e.to_string()))?;
        write_frame(worksheet, frame)?;
    }

    workbook
        .save(path.as_ref())
        .map_err(|e| Error::Workbook(e.to_string()))?;

    Ok(())
}

fn write_frame(worksheet: &mut Worksheet, frame: &Frame) -> Result<()> {
    let wb_err = |e: rust_xlsxwriter::XlsxError| Error::Workbook(e.to_string());

    for cell in frame_cells(frame)? {
        match cell {
            Cell::Text(row, col, text) => worksheet.write_string(row, col, text).map_err(wb_err)?,
            Cell::Number(row, col, v) => worksheet.write_number(row, col, v).map_err(wb_err)?,
        };
    }

    Ok(())
}

/// Lay a frame out as sheet cells: header row holding the index name
/// and column names, then one row per label with its values. Non-finite
/// values produce no cell.
fn frame_cells(frame: &Frame) -> Result<Vec<Cell<'_>>> {
    let mut cells = Vec::new();

    cells.push(Cell::Text(0, 0, frame.index_name()));
    for (ci, name) in frame.column_names().iter().enumerate() {
        cells.push(Cell::Text(0, ci as u16 + 1, *name));
    }

    for (ri, label) in frame.row_labels().iter().enumerate() {
        let row = ri as u32 + 1;
        cells.push(Cell::Text(row, 0, label));

        for (ci, name) in frame.column_names().iter().enumerate() {
            let value = frame.get(label, name)?;
            if value.is_finite() {
                cells.push(Cell::Number(row, ci as u16 + 1, value));
            }
        }
    }

    Ok(cells)
}
