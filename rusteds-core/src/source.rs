//! The contract between a container implementation and a decoder.

use crate::counts::CountDepth;
use crate::error::{Error, Result};

/// A container handle able to feed a hypermap decoder.
///
/// The outer archive is somebody else's problem: virtual file system
/// walking, block decompression and XML header parsing all stay behind
/// this trait. A decoder only needs the raw byte blocks of the spectrum
/// data item, in order, plus a few geometry and sizing hints taken from
/// the container headers.
pub trait SpectrumSource {
    /// Iterator over the raw data blocks, in stream order.
    type Blocks: Iterator<Item = Vec<u8>>;

    /// The block iterator together with the nominal block size and the
    /// block count. Every block but possibly the last has the nominal
    /// size.
    fn blocks(&self) -> (Self::Blocks, u32, u32);

    /// Channel depth to allocate when the caller gives no cutoff.
    fn channel_count_hint(&self) -> u32;

    /// Cell width expected to hold the accumulated counts of one output
    /// pixel at the given downsample factor.
    fn count_depth_hint(&self, downsample: u32) -> CountDepth;

    /// Raster width in pixels.
    fn width(&self) -> u32;

    /// Raster height in pixels.
    fn height(&self) -> u32;
}

/// An in-memory [`SpectrumSource`] serving a byte buffer in fixed-size
/// blocks.
///
/// Containers that decompress their spectrum item in one piece can hand
/// the result over directly; the decoder test suites use it as their
/// reference source. Geometry and sizing hints are set with the builder
/// methods; the defaults are the full 12-bit channel range and 32-bit
/// cells. A source built with [`BufferSource::with_peak`] derives its
/// depth hint from that per-pixel ceiling instead, scaled by the
/// downsample factor a decode asks about.
#[derive(Debug, Clone)]
pub struct BufferSource {
    data: Vec<u8>,
    block_size: u32,
    width: u32,
    height: u32,
    channels: u32,
    depth: CountDepth,
    peak: Option<u64>,
}

impl BufferSource {
    /// Creates a source over `data`, served in `block_size` chunks.
    ///
    /// # Errors
    /// Returns an error if `block_size` is zero.
    pub fn new(data: Vec<u8>, block_size: u32) -> Result<Self> {
        if block_size == 0 {
            return Err(Error::InvalidBlockSize);
        }
        Ok(Self {
            data,
            block_size,
            width: 0,
            height: 0,
            channels: 4096,
            depth: CountDepth::U32,
            peak: None,
        })
    }

    /// Sets the raster geometry.
    #[must_use]
    pub fn with_raster(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// Sets the channel-count hint.
    #[must_use]
    pub fn with_channels(mut self, channels: u32) -> Self {
        self.channels = channels;
        self
    }

    /// Sets the count-depth hint.
    #[must_use]
    pub fn with_count_depth(mut self, depth: CountDepth) -> Self {
        self.depth = depth;
        self
    }

    /// Sets the highest count one raster pixel is expected to
    /// accumulate; the depth hint is then derived from it rather than
    /// taken from [`BufferSource::with_count_depth`].
    #[must_use]
    pub fn with_peak(mut self, peak: u64) -> Self {
        self.peak = Some(peak);
        self
    }
}

impl SpectrumSource for BufferSource {
    type Blocks = std::vec::IntoIter<Vec<u8>>;

    fn blocks(&self) -> (Self::Blocks, u32, u32) {
        let chunks: Vec<Vec<u8>> = self
            .data
            .chunks(self.block_size as usize)
            .map(<[u8]>::to_vec)
            .collect();
        let count = chunks.len() as u32;
        (chunks.into_iter(), self.block_size, count)
    }

    fn channel_count_hint(&self) -> u32 {
        self.channels
    }

    fn count_depth_hint(&self, downsample: u32) -> CountDepth {
        match self.peak {
            // Downsampling folds s x s pixels into one cell, scaling
            // the ceiling with it.
            Some(peak) => {
                CountDepth::for_peak(peak * u64::from(downsample) * u64::from(downsample))
            }
            None => self.depth,
        }
    }

    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }
}
