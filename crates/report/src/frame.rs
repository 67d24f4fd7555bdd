//! Tabular report frame
//!
//! A small, purpose-built count frame: ordered row labels by named
//! columns of f64. Every lookup is by name; nothing in the report
//! pipeline addresses a column by position, so reordering upstream
//! columns cannot silently change a sheet.

use indexmap::IndexMap;
use terratab_core::{Error, Result};

/// Rows-by-named-columns table of f64 values
#[derive(Debug, Clone)]
pub struct Frame {
    index_name: String,
    rows: Vec<String>,
    columns: IndexMap<String, Vec<f64>>,
}

impl Frame {
    /// Create an empty frame with fixed row labels
    pub fn new(index_name: impl Into<String>, rows: Vec<String>) -> Self {
        Self {
            index_name: index_name.into(),
            rows,
            columns: IndexMap::new(),
        }
    }

    /// Name of the row index (e.g. "Land Use")
    pub fn index_name(&self) -> &str {
        &self.index_name
    }

    /// Row labels in order
    pub fn row_labels(&self) -> &[String] {
        &self.rows
    }

    /// Column names in order
    pub fn column_names(&self) -> Vec<&str> {
        self.columns.keys().map(String::as_str).collect()
    }

    pub fn n_rows(&self) -> usize {
        self.rows.len()
    }

    pub fn n_columns(&self) -> usize {
        self.columns.len()
    }

    /// Append a column; its length must match the row count
    pub fn add_column(&mut self, name: impl Into<String>, values: Vec<f64>) -> Result<()> {
        let name = name.into();
        if values.len() != self.rows.len() {
            return Err(Error::Table(format!(
                "column '{}' has {} values for {} rows",
                name,
                values.len(),
                self.rows.len()
            )));
        }
        if self.columns.contains_key(&name) {
            return Err(Error::Table(format!("duplicate column '{}'", name)));
        }
        self.columns.insert(name, values);
        Ok(())
    }

    /// Column values by name
    pub fn column(&self, name: &str) -> Result<&[f64]> {
        self.columns
            .get(name)
            .map(Vec::as_slice)
            .ok_or_else(|| Error::MissingColumn(name.to_string()))
    }

    fn row_index(&self, label: &str) -> Result<usize> {
        self.rows
            .iter()
            .position(|r| r == label)
            .ok_or_else(|| Error::MissingRow(label.to_string()))
    }

    /// Cell value by row label and column name
    pub fn get(&self, row: &str, column: &str) -> Result<f64> {
        let ri = self.row_index(row)?;
        Ok(self.column(column)?[ri])
    }

    /// Copy of the frame with a margins row appended: one extra row
    /// labelled `name` holding each column's sum.
    pub fn with_totals_row(&self, name: &str) -> Frame {
        let mut rows = self.rows.clone();
        rows.push(name.to_string());

        let columns = self
            .columns
            .iter()
            .map(|(col, values)| {
                let mut values = values.clone();
                let total: f64 = values.iter().sum();
                values.push(total);
                (col.clone(), values)
            })
            .collect();

        Frame {
            index_name: self.index_name.clone(),
            rows,
            columns,
        }
    }

    /// Copy of the frame with a margins column appended: one extra
    /// column named `name` holding each row's sum.
    pub fn with_totals_column(&self, name: &str) -> Result<Frame> {
        let mut out = self.clone();
        let totals: Vec<f64> = (0..self.rows.len())
            .map(|ri| self.columns.values().map(|v| v[ri]).sum())
            .collect();
        out.add_column(name, totals)?;
        Ok(out)
    }

    /// Join another frame's columns onto this one by row label.
    ///
    /// Row labels must match exactly, in order; a mismatch is an error
    /// rather than a silently wrong report.
    pub fn join(&self, other: &Frame) -> Result<Frame> {
        if self.rows != other.rows {
            let (left, right) = self
                .rows
                .iter()
                .zip(other.rows.iter())
                .find(|(a, b)| a != b)
                .map(|(a, b)| (a.clone(), b.clone()))
                .unwrap_or_else(|| {
                    (format!("{} rows", self.rows.len()), format!("{} rows", other.rows.len()))
                });
            return Err(Error::JoinMismatch { left, right });
        }

        let mut out = self.clone();
        for (col, values) in &other.columns {
            out.add_column(col.clone(), values.clone())?;
        }
        Ok(out)
    }

    /// Derive a frame where every cell is divided by its row's value in
    /// the `denom` column. Columns are renamed with `suffix` appended.
    pub fn div_by_column(&self, denom: &str, suffix: &str) -> Result<Frame> {
        let denom_values = self.column(denom)?.to_vec();

        let mut out = Frame::new(self.index_name.clone(), self.rows.clone());
        for (col, values) in &self.columns {
            let divided: Vec<f64> = values
                .iter()
                .zip(denom_values.iter())
                .map(|(v, d)| v / d)
                .collect();
            out.add_column(format!("{}{}", col, suffix), divided)?;
        }
        Ok(out)
    }

    /// Derive a frame where every cell is divided by the `denom` row's
    /// value in its column. Columns are renamed with `suffix` appended.
    pub fn div_by_row(&self, denom: &str, suffix: &str) -> Result<Frame> {
        let ri = self.row_index(denom)?;

        let mut out = Frame::new(self.index_name.clone(), self.rows.clone());
        for (col, values) in &self.columns {
            let d = values[ri];
            let divided: Vec<f64> = values.iter().map(|v| v / d).collect();
            out.add_column(format!("{}{}", col, suffix), divided)?;
        }
        Ok(out)
    }

    /// Frame restricted to the named columns, in the given order
    pub fn select(&self, names: &[&str]) -> Result<Frame> {
        let mut out = Frame::new(self.index_name.clone(), self.rows.clone());
        for &name in names {
            out.add_column(name, self.column(name)?.to_vec())?;
        }
        Ok(out)
    }
}
