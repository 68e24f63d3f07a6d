//! Energy calibration of the channel axis.

use crate::error::{Error, Result};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Linear calibration of the energy axis.
///
/// Channel `i` sits at energy `offset_kev + i * kev_per_channel`. This is
/// how a caller turns a "cut off at N keV" request into the channel
/// cutoff a decoder consumes.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct EnergyCalibration {
    /// Energy of channel zero, in keV.
    pub offset_kev: f64,
    /// Energy step per channel, in keV.
    pub kev_per_channel: f64,
}

impl EnergyCalibration {
    /// Creates a calibration.
    ///
    /// # Errors
    /// Returns an error if the channel width is not positive.
    pub fn new(offset_kev: f64, kev_per_channel: f64) -> Result<Self> {
        if kev_per_channel <= 0.0 {
            return Err(Error::InvalidCalibration(kev_per_channel));
        }
        Ok(Self {
            offset_kev,
            kev_per_channel,
        })
    }

    /// Channel index closest to the given energy, clamped at zero.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn channel_for_energy(&self, kev: f64) -> u32 {
        let channel = ((kev - self.offset_kev) / self.kev_per_channel).round();
        if channel < 0.0 {
            0
        } else {
            channel as u32
        }
    }

    /// Energy at the given channel, in keV.
    #[must_use]
    pub fn energy_of_channel(&self, channel: u32) -> f64 {
        self.offset_kev + f64::from(channel) * self.kev_per_channel
    }
}
