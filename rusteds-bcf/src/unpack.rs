//! Spectrum unpackers.
//!
//! Two packings occur in the wild. Sparse pixels use instructed bunches:
//! runs of consecutive channels sharing a baseline (gain) and a per-value
//! width, where each two-byte bunch head is the instruction for decoding
//! the bytes that follow. Dense pixels use an explicit pulse list of
//! 12-bit channel indices, four to a six-byte group.

use crate::byteops;
use crate::error::{Error, Result};
use log::debug;
use ndarray::ArrayViewMut1;
use rusteds_core::Count;

/// Bounds-checked slice into a bunch payload.
fn bunch_slice(payload: &[u8], offset: usize, len: usize) -> Result<&[u8]> {
    payload.get(offset..offset + len).ok_or_else(|| {
        Error::FormatViolation(format!(
            "bunch data at {offset}+{len} overruns its {}-byte payload",
            payload.len()
        ))
    })
}

/// Decodes an instructed-packed spectrum into a cube column.
///
/// Walks `payload` as a sequence of bunches, keeping a channel cursor
/// that every bunch advances by its channel count. A zero `size` head
/// only skips channels; any other head reads a gain of `size` bytes and
/// then the packed per-channel values, writing `value + gain` per
/// channel. Channels at or past the column length are dropped.
///
/// # Errors
/// Returns a format violation if a bunch would consume bytes past the
/// payload end.
pub fn unpack_bunches<T: Count>(payload: &[u8], column: &mut ArrayViewMut1<'_, T>) -> Result<()> {
    let cutoff = column.len();
    let mut offset = 0usize;
    let mut channel = 0usize;

    while offset < payload.len() {
        let head = bunch_slice(payload, offset, 2)?;
        let (size, channels) = (head[0], usize::from(head[1]));
        offset += 2;

        if size == 0 {
            channel += channels;
            continue;
        }

        let gain = match size {
            1 => u64::from(bunch_slice(payload, offset, 1)?[0]),
            2 => u64::from(byteops::le_u16(bunch_slice(payload, offset, 2)?)),
            4 => u64::from(byteops::le_u32(bunch_slice(payload, offset, 4)?)),
            other => {
                // Legacy wide heads carry an eight-byte gain and u32
                // values; no known producer emits them.
                debug!("wide bunch head (size {other}), taking the eight-byte gain");
                byteops::le_u64(bunch_slice(payload, offset, 8)?)
            }
        };
        offset += match size {
            1 | 2 | 4 => usize::from(size),
            _ => 8,
        };

        if size == 1 {
            // Two values per byte, low nibble first.
            let len = channels.div_ceil(2);
            let data = bunch_slice(payload, offset, len)?;
            offset += len;
            for i in 0..channels {
                let byte = data[i / 2];
                let value = if i % 2 == 0 { byte & 0x0F } else { byte >> 4 };
                if channel + i < cutoff {
                    column[channel + i].accumulate(u64::from(value) + gain);
                }
            }
        } else {
            let width = match size {
                2 => 1,
                4 => 2,
                _ => 4,
            };
            let data = bunch_slice(payload, offset, channels * width)?;
            offset += channels * width;
            for i in 0..channels {
                let value = match width {
                    1 => u64::from(data[i]),
                    2 => u64::from(byteops::le_u16(&data[i * 2..])),
                    _ => u64::from(byteops::le_u32(&data[i * 4..])),
                };
                if channel + i < cutoff {
                    column[channel + i].accumulate(value + gain);
                }
            }
        }

        channel += channels;
    }
    Ok(())
}

/// Decodes a 12-bit pulse list into a cube column.
///
/// `payload` packs `n_pulses` channel indices four to a six-byte group;
/// each decoded index increments its channel by one. Indices at or past
/// the column length are dropped.
///
/// # Errors
/// Returns a format violation if the payload is shorter than the pulse
/// count implies.
pub fn unpack_pulses12<T: Count>(
    payload: &[u8],
    n_pulses: usize,
    column: &mut ArrayViewMut1<'_, T>,
) -> Result<()> {
    let needed = n_pulses.div_ceil(4) * 6;
    if payload.len() < needed {
        return Err(Error::FormatViolation(format!(
            "12-bit pulse list of {n_pulses} pulses needs {needed} bytes, payload holds {}",
            payload.len()
        )));
    }

    let cutoff = column.len();
    for i in 0..n_pulses {
        let g = &payload[(i / 4) * 6..(i / 4) * 6 + 6];
        let channel = match i % 4 {
            0 => (u16::from(g[0]) >> 4) | (u16::from(g[1]) << 4),
            1 => ((u16::from(g[0]) << 8) | u16::from(g[3])) & 0x0FFF,
            2 => (u16::from(g[2]) << 4) | (u16::from(g[5]) >> 4),
            _ => ((u16::from(g[5]) << 8) | u16::from(g[4])) & 0x0FFF,
        };
        if usize::from(channel) < cutoff {
            column[usize::from(channel)].bump();
        }
    }
    Ok(())
}
