//! Error types for contact analysis

use thiserror::Error;

/// Main error type for contact element operations
#[derive(Error, Debug)]
pub enum FEAError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Invalid geometry: {0}")]
    InvalidGeometry(String),

    #[error("Invalid material parameters: {0}")]
    InvalidMaterial(String),

    #[error("Degenerate surface parametrization (metric determinant {0:e})")]
    DegenerateMetric(f64),

    #[error("Unknown material parameter id {0}")]
    UnknownParameter(i32),

    #[error("Unknown response '{0}'")]
    UnknownResponse(String),

    #[error("Field stream error at position {position}: {message}")]
    Channel { position: usize, message: String },

    #[error("Singular stiffness matrix - contact constraint may be inactive on a free DOF")]
    SingularMatrix,

    #[error("Convergence failed after {0} iterations")]
    ConvergenceFailed(usize),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type for contact element operations
pub type FEAResult<T> = Result<T, FEAError>;
