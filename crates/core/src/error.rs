//! Error types for terratab

use thiserror::Error;

/// Main error type for terratab operations
#[derive(Error, Debug)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid raster dimensions: {width}x{height}")]
    InvalidDimensions { width: usize, height: usize },

    #[error("Index out of bounds: ({row}, {col}) in raster of size ({rows}, {cols})")]
    IndexOutOfBounds {
        row: usize,
        col: usize,
        rows: usize,
        cols: usize,
    },

    #[error("Raster size mismatch: expected ({er}, {ec}), got ({ar}, {ac})")]
    SizeMismatch { er: usize, ec: usize, ar: usize, ac: usize },

    #[error("Unsupported data type: {0}")]
    UnsupportedDataType(String),

    #[error("Layer contains no usable geometry: {0}")]
    NoGeometry(String),

    #[error("Invalid parameter: {name} = {value} ({reason})")]
    InvalidParameter {
        name: &'static str,
        value: String,
        reason: String,
    },

    #[error("No column named '{0}'")]
    MissingColumn(String),

    #[error("No row labelled '{0}'")]
    MissingRow(String),

    #[error("Join mismatch: '{left}' vs '{right}'")]
    JoinMismatch { left: String, right: String },

    #[error("Table error: {0}")]
    Table(String),

    #[error("Workbook error: {0}")]
    Workbook(String),

    #[error("{0}")]
    Other(String),
}

/// Result type alias for terratab operations
pub type Result<T> = std::result::Result<T, Error>;
