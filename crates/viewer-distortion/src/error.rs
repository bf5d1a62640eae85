use thiserror::Error;

use crate::Real;

/// Invalid calibration input.
///
/// Every variant is raised before any derived value is produced, so a
/// degenerate profile never reaches the renderer as NaN uniforms.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum CalibrationError {
    /// Screen width or height is non-finite, zero, or below one micron.
    #[error("invalid screen dimensions: {width} x {height} m")]
    InvalidScreenParams { width: Real, height: Real },
    /// Screen border is negative or non-finite.
    #[error("invalid screen border size: {0} m")]
    InvalidBorder(Real),
    /// Distortion coefficients are empty or contain a non-finite value.
    #[error("invalid distortion coefficients: {0}")]
    InvalidDistortion(String),
    /// Lens geometry or maximum FOV is not usable.
    #[error("invalid viewer parameters: {0}")]
    InvalidViewerParams(String),
}
