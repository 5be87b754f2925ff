//! Error types for pivotmesh

use thiserror::Error;

/// Main error type for pivotmesh operations
#[derive(Error, Debug)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid data: {0}")]
    InvalidData(String),

    #[error("Algorithm error: {0}")]
    Algorithm(String),
}

/// Result type alias for pivotmesh operations
pub type Result<T> = std::result::Result<T, Error>;
