//! rusteds-bcf: streaming decoder for Bruker BCF hypermap spectra.
//!
//! Decodes the packed per-pixel spectrum stream of a BCF container into
//! a dense `(channel, x, y)` count cube. The outer archive (virtual
//! file system, block decompression, XML headers) stays behind the
//! [`rusteds_core::SpectrumSource`] contract; this crate consumes only
//! the raw block stream of the spectrum data item.
//!
//! # Stream layout
//!
//! The stream opens with a 0x1A0-byte prologue, then one record per
//! raster row: a pixel count followed by that many pixel records. Each
//! pixel carries a fixed 22-byte header and a payload in one of two
//! packings: an explicit 12-bit pulse list for dense pixels, or
//! instructed bunches (runs of consecutive channels sharing a baseline
//! and a per-value width) for sparse ones, optionally trailed by a short
//! additional-pulse list.
//!
//! # Key Components
//!
//! - [`HypermapDecoder`] - Whole-map and banded decode entry points
//! - [`BlockReader`] - Linear byte stream over the container's blocks
//! - [`unpack_bunches`] / [`unpack_pulses12`] - The two spectrum packings
//!
//! # Quick Start
//!
//! ```
//! use rusteds_bcf::{DecodeConfig, HypermapDecoder};
//! use rusteds_core::{BufferSource, CountDepth};
//!
//! # fn main() -> rusteds_bcf::Result<()> {
//! # let stream = vec![0u8; 0x1A4];
//! let source = BufferSource::new(stream, 0x1000)?
//!     .with_raster(1, 1)
//!     .with_channels(1024)
//!     .with_count_depth(CountDepth::U16);
//!
//! let decoder = HypermapDecoder::with_config(
//!     DecodeConfig::new().with_cutoff(512),
//! );
//! let cube = decoder.decode(&source)?;
//! assert_eq!(cube.shape(), (512, 1, 1));
//! # Ok(())
//! # }
//! ```

pub mod block;
pub mod byteops;
mod driver;
mod error;
mod unpack;
mod walker;

pub use block::BlockReader;
pub use driver::{BandStream, DecodeConfig, HypermapDecoder};
pub use error::{Error, Result};
pub use unpack::{unpack_bunches, unpack_pulses12};
