use thiserror::Error;

#[derive(Error, Debug)]
pub enum ReductionError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Failed to encode TIFF image: {0}")]
    EncodeError(String),

    #[error("Failed to write output file: {0}")]
    OutputWriteError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl ReductionError {
    pub(crate) fn shape_mismatch(
        what: &str,
        expected: (usize, usize),
        actual: (usize, usize),
    ) -> Self {
        ReductionError::ValidationError(format!(
            "{what}: expected shape {}x{}, got {}x{}",
            expected.0, expected.1, actual.0, actual.1
        ))
    }
}

pub type Result<T> = std::result::Result<T, ReductionError>;
