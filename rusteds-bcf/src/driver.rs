//! Decoder entry points.

use crate::block::BlockReader;
use crate::error::{Error, Result};
use crate::walker;
use ndarray::Array3;
use rusteds_core::{Count, CountDepth, Cube, EnergyCalibration, SpectrumSource};
use std::ops::Range;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Byte offset of the first map row within the spectrum stream.
const MAP_DATA_OFFSET: usize = 0x1A0;

/// Configuration for hypermap decoding.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DecodeConfig {
    /// Spatial downsample factor: counts of every s x s pixel block are
    /// summed into one output pixel. Must be at least 1.
    pub downsample: u32,
    /// Exclusive upper bound on channel indices written to the cube;
    /// channels at or past it are dropped. `None` allocates the
    /// container's channel-count hint.
    pub cutoff: Option<u32>,
}

impl Default for DecodeConfig {
    fn default() -> Self {
        Self {
            downsample: 1,
            cutoff: None,
        }
    }
}

impl DecodeConfig {
    /// Creates a configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the downsample factor.
    #[must_use]
    pub fn with_downsample(mut self, downsample: u32) -> Self {
        self.downsample = downsample;
        self
    }

    /// Sets the channel cutoff.
    #[must_use]
    pub fn with_cutoff(mut self, cutoff: u32) -> Self {
        self.cutoff = Some(cutoff);
        self
    }

    /// Sets the channel cutoff from an energy in keV, using the
    /// spectrum's calibration to locate the channel.
    #[must_use]
    pub fn with_cutoff_energy(self, kev: f64, calibration: &EnergyCalibration) -> Self {
        self.with_cutoff(calibration.channel_for_energy(kev))
    }
}

/// Streaming decoder for packed hypermap spectra.
///
/// Single-pass and forward-only: every decode walks the block stream of
/// its source exactly once, front to back.
#[derive(Debug, Clone, Default)]
pub struct HypermapDecoder {
    config: DecodeConfig,
}

impl HypermapDecoder {
    /// Creates a decoder with the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self {
            config: DecodeConfig::default(),
        }
    }

    /// Creates a decoder with the given configuration.
    #[must_use]
    pub fn with_config(config: DecodeConfig) -> Self {
        Self { config }
    }

    fn checked_downsample(&self) -> Result<usize> {
        if self.config.downsample == 0 {
            return Err(Error::InvalidConfig(
                "downsample factor must be at least 1".to_string(),
            ));
        }
        Ok(self.config.downsample as usize)
    }

    fn channel_depth<S: SpectrumSource>(&self, source: &S) -> usize {
        self.config
            .cutoff
            .unwrap_or_else(|| source.channel_count_hint()) as usize
    }

    /// Decodes the whole map into one cube.
    ///
    /// The cube has shape `(depth, ceil(W / s), ceil(H / s))` where depth
    /// is the configured cutoff (the container's channel-count hint when
    /// none is set) and the cell width follows the container's depth
    /// hint.
    ///
    /// # Errors
    /// Fails on a truncated or self-contradictory stream, and when the
    /// container hints at 64-bit cells.
    pub fn decode<S: SpectrumSource>(&self, source: &S) -> Result<Cube> {
        let downsample = self.checked_downsample()?;
        let depth = self.channel_depth(source);
        let width = (source.width() as usize).div_ceil(downsample);
        let height = (source.height() as usize).div_ceil(downsample);
        let rows = 0..source.height();

        let (blocks, _block_size, _block_count) = source.blocks();
        let mut reader = BlockReader::new(blocks);
        reader.seek(MAP_DATA_OFFSET)?;

        match source.count_depth_hint(self.config.downsample) {
            CountDepth::U8 => {
                decode_map::<u8, _>(&mut reader, (depth, width, height), rows, downsample)
            }
            CountDepth::U16 => {
                decode_map::<u16, _>(&mut reader, (depth, width, height), rows, downsample)
            }
            CountDepth::U32 => {
                decode_map::<u32, _>(&mut reader, (depth, width, height), rows, downsample)
            }
            hint @ CountDepth::U64 => Err(Error::UnsupportedCountDepth(hint)),
        }
    }

    /// Decodes the map as a lazy sequence of row bands.
    ///
    /// Each yielded cube covers `heights[i]` raster rows at full width,
    /// shape `(depth, W, h_i)`; the same reader carries on where the
    /// previous band stopped, so bands must be consumed in order.
    /// Heights should sum to at most the raster height and, under
    /// downsampling, each be a multiple of the factor; neither is
    /// enforced here.
    ///
    /// # Errors
    /// Fails up front on a bad configuration or a 64-bit depth hint;
    /// stream errors surface on the band in flight.
    pub fn decode_bands<S: SpectrumSource>(
        &self,
        source: &S,
        heights: &[u32],
    ) -> Result<BandStream<S::Blocks>> {
        let downsample = self.checked_downsample()?;
        let depth = self.channel_depth(source);
        let count_depth = source.count_depth_hint(self.config.downsample);
        if count_depth == CountDepth::U64 {
            return Err(Error::UnsupportedCountDepth(count_depth));
        }

        let (blocks, _block_size, _block_count) = source.blocks();
        let mut reader = BlockReader::new(blocks);
        reader.seek(MAP_DATA_OFFSET)?;

        Ok(BandStream {
            reader,
            heights: heights.to_vec().into_iter(),
            row: 0,
            depth,
            width: source.width() as usize,
            downsample,
            count_depth,
            failed: false,
        })
    }
}

fn decode_map<T, I>(
    reader: &mut BlockReader<I>,
    shape: (usize, usize, usize),
    rows: Range<u32>,
    downsample: usize,
) -> Result<Cube>
where
    T: Count,
    I: Iterator<Item = Vec<u8>>,
    Cube: From<Array3<T>>,
{
    let mut cube = Array3::<T>::default(shape);
    walker::walk_rows(reader, &mut cube, rows, 0, downsample)?;
    Ok(Cube::from(cube))
}

/// Lazy sequence of row-band cubes from [`HypermapDecoder::decode_bands`].
///
/// Suspension points are exactly the band boundaries; between yields the
/// reader position is a valid resume point. An error ends the sequence;
/// bands already yielded remain valid.
pub struct BandStream<B: Iterator<Item = Vec<u8>>> {
    reader: BlockReader<B>,
    heights: std::vec::IntoIter<u32>,
    row: u32,
    depth: usize,
    width: usize,
    downsample: usize,
    count_depth: CountDepth,
    failed: bool,
}

impl<B: Iterator<Item = Vec<u8>>> BandStream<B> {
    fn decode_band<T>(&mut self, rows: Range<u32>, band_rows: u32) -> Result<Cube>
    where
        T: Count,
        Cube: From<Array3<T>>,
    {
        let row_origin = rows.start as usize / self.downsample;
        let mut cube = Array3::<T>::default((self.depth, self.width, band_rows as usize));
        walker::walk_rows(&mut self.reader, &mut cube, rows, row_origin, self.downsample)?;
        Ok(Cube::from(cube))
    }
}

impl<B: Iterator<Item = Vec<u8>>> Iterator for BandStream<B> {
    type Item = Result<Cube>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }
        let band_rows = self.heights.next()?;
        let rows = self.row..self.row + band_rows;
        self.row += band_rows;

        let result = match self.count_depth {
            CountDepth::U8 => self.decode_band::<u8>(rows, band_rows),
            CountDepth::U16 => self.decode_band::<u16>(rows, band_rows),
            CountDepth::U32 => self.decode_band::<u32>(rows, band_rows),
            hint @ CountDepth::U64 => Err(Error::UnsupportedCountDepth(hint)),
        };
        if result.is_err() {
            self.failed = true;
        }
        Some(result)
    }
}
