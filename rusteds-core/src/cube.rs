//! The hypermap count cube.

use crate::counts::CountDepth;
use ndarray::Array3;

/// A dense hypermap cube indexed `(channel, x, y)`.
///
/// The cell width is chosen at decode time from the container's depth
/// hint, so the concrete array type is carried behind an enum. The cube
/// starts all-zero and is mutated only by increments.
#[derive(Debug, Clone, PartialEq)]
pub enum Cube {
    /// 8-bit counts.
    U8(Array3<u8>),
    /// 16-bit counts.
    U16(Array3<u16>),
    /// 32-bit counts.
    U32(Array3<u32>),
}

macro_rules! on_array {
    ($cube:expr, $a:ident => $body:expr) => {
        match $cube {
            Cube::U8($a) => $body,
            Cube::U16($a) => $body,
            Cube::U32($a) => $body,
        }
    };
}

impl Cube {
    /// Cell width of this cube.
    #[must_use]
    pub fn count_depth(&self) -> CountDepth {
        match self {
            Cube::U8(_) => CountDepth::U8,
            Cube::U16(_) => CountDepth::U16,
            Cube::U32(_) => CountDepth::U32,
        }
    }

    /// Shape as `(channels, width, height)`.
    #[must_use]
    pub fn shape(&self) -> (usize, usize, usize) {
        on_array!(self, a => a.dim())
    }

    /// Number of channels along the energy axis.
    #[must_use]
    pub fn channels(&self) -> usize {
        self.shape().0
    }

    /// Raster width in pixels.
    #[must_use]
    pub fn width(&self) -> usize {
        self.shape().1
    }

    /// Raster height in pixels.
    #[must_use]
    pub fn height(&self) -> usize {
        self.shape().2
    }

    /// Count at `(channel, x, y)`, widened to u64.
    #[must_use]
    pub fn get(&self, channel: usize, x: usize, y: usize) -> Option<u64> {
        on_array!(self, a => a.get([channel, x, y]).copied().map(u64::from))
    }

    /// Sum of every cell in the cube.
    #[must_use]
    pub fn total_counts(&self) -> u64 {
        on_array!(self, a => a.iter().map(|&v| u64::from(v)).sum())
    }
}

impl From<Array3<u8>> for Cube {
    fn from(array: Array3<u8>) -> Self {
        Cube::U8(array)
    }
}

impl From<Array3<u16>> for Cube {
    fn from(array: Array3<u16>) -> Self {
        Cube::U16(array)
    }
}

impl From<Array3<u32>> for Cube {
    fn from(array: Array3<u32>) -> Self {
        Cube::U32(array)
    }
}
