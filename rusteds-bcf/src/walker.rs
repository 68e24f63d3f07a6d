//! The per-row pixel walk of the spectrum stream.

use crate::block::BlockReader;
use crate::error::{Error, Result};
use crate::unpack;
use log::debug;
use ndarray::{s, Array1, Array3};
use rusteds_core::Count;
use std::ops::Range;

/// Marks a pixel payload as a 12-bit pulse list rather than bunches.
const FLAG_PULSES_12BIT: u16 = 1;

/// The fixed 22-byte record head preceding every pixel payload.
///
/// The reserved fields (per-map and per-pixel channel counts, a constant
/// of unknown meaning, a declared size that sometimes disagrees with the
/// payload) are consumed to keep the stream aligned but drive nothing.
#[derive(Debug, Clone, Copy)]
struct PixelHeader {
    x: u32,
    flag: u16,
    n_pulses: u16,
    payload_len: usize,
}

impl PixelHeader {
    fn read<I>(reader: &mut BlockReader<I>) -> Result<Self>
    where
        I: Iterator<Item = Vec<u8>>,
    {
        let x = reader.read_u32()?;
        let _map_channels = reader.read_u16()?;
        let _pixel_channels = reader.read_u16()?;
        reader.skip(4)?;
        let flag = reader.read_u16()?;
        let _declared_size = reader.read_u16()?;
        let n_pulses = reader.read_u16()?;
        let payload_len = usize::from(reader.read_u16()?);
        reader.skip(2)?;
        Ok(Self {
            x,
            flag,
            n_pulses,
            payload_len,
        })
    }
}

/// Walks `rows` of the pixel map, scattering decoded spectra into `cube`.
///
/// Each row opens with its pixel count; each pixel carries a
/// [`PixelHeader`] and one payload in either packing, plus the
/// additional-pulse list trailing a bunch payload. Destination
/// coordinates are the downsampled `(x / s, row / s)`, with `row_origin`
/// subtracted from the row index so a band decode can reuse the walk
/// with a cube covering only its rows. Increments accumulate when
/// downsampling collapses pixels onto one cell.
pub(crate) fn walk_rows<T, I>(
    reader: &mut BlockReader<I>,
    cube: &mut Array3<T>,
    rows: Range<u32>,
    row_origin: usize,
    downsample: usize,
) -> Result<()>
where
    T: Count,
    I: Iterator<Item = Vec<u8>>,
{
    let (depth, width, height) = cube.dim();
    // Discard target for pixels whose destination falls off the cube.
    let mut scratch = Array1::<T>::default(depth);

    for row in rows {
        let y = row as usize / downsample;
        let pixels = reader.read_u32()?;
        for _ in 0..pixels {
            let header = PixelHeader::read(reader)?;
            let x = header.x as usize / downsample;
            let in_raster = x < width && y >= row_origin && y - row_origin < height;
            if !in_raster {
                debug!(
                    "pixel ({}, {row}) lands outside the {width}x{height} target, dropping it",
                    header.x
                );
            }
            let mut column = if in_raster {
                cube.slice_mut(s![.., x, y - row_origin])
            } else {
                scratch.view_mut()
            };

            if header.flag == FLAG_PULSES_12BIT {
                let payload = reader.take(header.payload_len)?;
                unpack::unpack_pulses12(payload, usize::from(header.n_pulses), &mut column)?;
            } else {
                let Some(bunch_len) = header.payload_len.checked_sub(4) else {
                    return Err(Error::FormatViolation(format!(
                        "pixel payload of {} bytes cannot hold the trailing pulse-list size",
                        header.payload_len
                    )));
                };
                let payload = reader.take(bunch_len)?;
                unpack::unpack_bunches(payload, &mut column)?;

                if header.n_pulses > 0 {
                    // The list size is consumed but its value is not used;
                    // the pulse count already fixes the length.
                    let _list_len = reader.read_u32()?;
                    for _ in 0..header.n_pulses {
                        let channel = usize::from(reader.read_u16()?);
                        if channel < depth {
                            column[channel].bump();
                        }
                    }
                } else {
                    reader.skip(4)?;
                }
            }
        }
    }
    Ok(())
}
