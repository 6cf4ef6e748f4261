//! Error types for grading operations.

use thiserror::Error;

/// Error type for grading operations.
#[derive(Error, Debug)]
pub enum OpsError {
    /// Invalid parameter value.
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// Core buffer error.
    #[error(transparent)]
    Core(#[from] filmgrade_core::Error),

    /// LUT load or export error.
    #[error(transparent)]
    Lut(#[from] filmgrade_lut::LutError),
}

/// Result type for grading operations.
pub type OpsResult<T> = Result<T, OpsError>;
