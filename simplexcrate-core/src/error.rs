//! Error types for simplexcrate

use thiserror::Error;

/// Main error type for simplexcrate operations
#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid data: {0}")]
    InvalidData(String),

    #[error("Invalid simplex: {0}")]
    InvalidSimplex(String),

    #[error("Topology error: {0}")]
    Topology(String),

    #[error("Unsupported operation: {0}")]
    Unsupported(String),
}

/// Result type alias for simplexcrate operations
pub type Result<T> = std::result::Result<T, Error>;
