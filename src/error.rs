use thiserror::Error;

/// Errors reported while building a clustering configuration or loading data.
#[derive(Debug, Error)]
pub enum Error {
    #[error("observation matrix must have at least one row and one column")]
    EmptyData,

    #[error("invalid number of clusters k = {k}, expected at least 1")]
    InvalidClusterCount { k: usize },

    #[error("row {row} has {found} attributes, expected {expected}")]
    RaggedRow {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("non-finite value at row {row}, column {column}")]
    NonFinite { row: usize, column: usize },

    #[error("cannot parse {value:?} as a number (line {line}, column {column})")]
    Parse {
        line: u64,
        column: usize,
        value: String,
    },

    #[error(transparent)]
    Csv(#[from] csv::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
