//! Custom error types for raster processing

use std::fmt;

/// Raster-specific error types
#[derive(Debug)]
pub enum RasterError {
    /// No band buffers were supplied
    NoBands,
    /// Raster dimensions are zero
    InvalidDimensions { width: usize, height: usize },
    /// A band buffer's length disagrees with the declared dimensions
    BandSizeMismatch { band: usize, expected: usize, actual: usize },
    /// A requested resampling target shape has a zero dimension
    InvalidTargetShape { width: usize, height: usize },
    /// A geographic window was requested on a model without a resolved affine
    MissingGeoreference,
    /// The affine transform is not invertible
    DegenerateTransform,
    /// Generic error with message
    GenericError(String),
}

impl fmt::Display for RasterError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RasterError::NoBands => write!(f, "No band buffers supplied"),
            RasterError::InvalidDimensions { width, height } =>
                write!(f, "Invalid raster dimensions: {}x{}", width, height),
            RasterError::BandSizeMismatch { band, expected, actual } =>
                write!(f, "Band {} has {} samples, expected {}", band, actual, expected),
            RasterError::InvalidTargetShape { width, height } =>
                write!(f, "Invalid resampling target shape: {}x{}", width, height),
            RasterError::MissingGeoreference =>
                write!(f, "Raster has no resolved georeferencing"),
            RasterError::DegenerateTransform =>
                write!(f, "Affine transform is not invertible"),
            RasterError::GenericError(msg) => write!(f, "Raster error: {}", msg),
        }
    }
}

impl std::error::Error for RasterError {}

impl From<String> for RasterError {
    fn from(msg: String) -> Self {
        RasterError::GenericError(msg)
    }
}

/// Result type for raster operations
pub type RasterResult<T> = Result<T, RasterError>;
