//! Decoder error types.

use rusteds_core::CountDepth;
use thiserror::Error;

/// Result type for decode operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Decoder error types.
///
/// All of these are non-recoverable: a partially filled cube is invalid.
/// Row bands already yielded by the chunked API stay valid; the band in
/// flight when the error surfaced is discarded.
#[derive(Error, Debug)]
pub enum Error {
    /// Block stream ended while a record still needed bytes.
    #[error("block stream exhausted: needed {needed} bytes, {available} available")]
    StreamExhausted {
        /// Bytes the pending read required.
        needed: usize,
        /// Bytes left ahead of the cursor when the stream ended.
        available: usize,
    },

    /// The stream contradicts its own declared sizes.
    #[error("format violation: {0}")]
    FormatViolation(String),

    /// 64-bit count cells are not supported.
    #[error("unsupported count depth: {0:?}")]
    UnsupportedCountDepth(CountDepth),

    /// Invalid decode configuration.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Core data-model error.
    #[error("core error: {0}")]
    Core(#[from] rusteds_core::Error),
}
