//! rusteds-core: Core types for EDS hypermap decoding.
//!
//! This crate provides the foundational data model shared by the format
//! decoders: the output count cube, count-depth selection, the energy
//! calibration of the channel axis, and the contract a container
//! implementation must expose to feed a decoder with raw data blocks.
//!
//! # Key Components
//!
//! - [`Cube`] - The dense `(channel, x, y)` count cube a decode produces
//! - [`Count`] / [`CountDepth`] - Cube cell types and width selection
//! - [`SpectrumSource`] - Contract between a container and a decoder
//! - [`EnergyCalibration`] - Energy-to-channel conversion for cutoffs

pub mod calib;
pub mod counts;
pub mod cube;
pub mod error;
pub mod source;

pub use calib::EnergyCalibration;
pub use counts::{Count, CountDepth};
pub use cube::Cube;
pub use error::{Error, Result};
pub use source::{BufferSource, SpectrumSource};
