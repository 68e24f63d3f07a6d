//! Core error types.

use thiserror::Error;

/// Result type for core operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Core error types.
#[derive(Error, Debug)]
pub enum Error {
    /// Energy calibration with a non-positive channel width.
    #[error("invalid calibration: channel width {0} keV is not positive")]
    InvalidCalibration(f64),

    /// A block size of zero cannot chunk a stream.
    #[error("nominal block size must be non-zero")]
    InvalidBlockSize,
}
