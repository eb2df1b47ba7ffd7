use thiserror::Error;

/// Why a remote cost table could not be used.
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("service answered with status {0}")]
    Status(u16),
    #[error("response carried no matrix")]
    MissingMatrix,
    #[error("malformed matrix: {0}")]
    Malformed(#[from] MatrixError),
    #[error("{count} points exceed the table limit of {limit}")]
    TooManyPoints { count: usize, limit: usize },
    #[error("client setup failed: {0}")]
    Client(String),
    #[error("no road provider configured")]
    NotConfigured,
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum MatrixError {
    #[error("row {row} has {len} entries, expected {expected}")]
    NotSquare {
        row: usize,
        len: usize,
        expected: usize,
    },
    #[error("entry [{row}][{col}] is not a number")]
    NotANumber { row: usize, col: usize },
    #[error("entry [{row}][{col}] is not finite")]
    NonFinite { row: usize, col: usize },
    #[error("entry [{row}][{col}] is negative")]
    Negative { row: usize, col: usize },
    #[error("diagonal entry [{0}][{0}] is not zero")]
    NonZeroDiagonal(usize),
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum PlanError {
    #[error("no units available to route")]
    EmptySelection,
    #[error("depot coordinate {lat},{lng} is not a valid position")]
    InvalidDepot { lat: f64, lng: f64 },
}
