//! Error types for lsqa

use thiserror::Error;

/// Main error type for lsqa operations
#[derive(Error, Debug)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Scene metadata error: {0}")]
    Xml(String),

    #[error("Band not found in scene metadata: {name} (category {category})")]
    BandNotFound { name: String, category: String },

    #[error("Invalid raster dimensions: {nlines} x {nsamps}")]
    InvalidDimensions { nlines: usize, nsamps: usize },

    #[error("Band size mismatch: expected ({er}, {ec}), got ({ar}, {ac})")]
    SizeMismatch {
        er: usize,
        ec: usize,
        ar: usize,
        ac: usize,
    },

    #[error("Index out of bounds: ({row}, {col}) in raster of size ({rows}, {cols})")]
    IndexOutOfBounds {
        row: usize,
        col: usize,
        rows: usize,
        cols: usize,
    },

    #[error("Unexpected data type for band {band}: expected {expected}, got {actual}")]
    UnexpectedDataType {
        band: String,
        expected: &'static str,
        actual: String,
    },

    #[error("Unknown satellite tag: {0}")]
    UnknownSatellite(String),

    #[error("Invalid parameter: {name} = {value} ({reason})")]
    InvalidParameter {
        name: &'static str,
        value: String,
        reason: String,
    },
}

impl From<roxmltree::Error> for Error {
    fn from(e: roxmltree::Error) -> Self {
        Error::Xml(e.to_string())
    }
}

/// Result type alias for lsqa operations
pub type Result<T> = std::result::Result<T, Error>;
