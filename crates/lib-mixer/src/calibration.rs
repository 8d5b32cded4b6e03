//! Channel calibration records.
//!
//! A calibration describes the linear impairments of a physical IQ mixer as
//! one affine correction per channel plus a phase term. Phases are radians
//! internally; configuration files and lab notebooks speak degrees, so the
//! degree-based constructors sit at that boundary.

use serde::{Deserialize, Serialize};

/// Per-channel correction: `measured = scale * ideal + offset`, with the
/// carrier phase-shifted by `phase` radians.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ChannelCal {
    pub scale: f64,
    pub offset: f64,
    /// Carrier phase shift, radians.
    pub phase: f64,
}

impl ChannelCal {
    pub fn new(scale: f64, offset: f64, phase: f64) -> Self {
        Self {
            scale,
            offset,
            phase,
        }
    }

    /// Degree-based boundary constructor.
    pub fn from_degrees(scale: f64, offset: f64, phase_deg: f64) -> Self {
        Self::new(scale, offset, phase_deg.to_radians())
    }

    /// Unit scale, zero offset and phase.
    pub fn identity() -> Self {
        Self::new(1.0, 0.0, 0.0)
    }
}

/// Full mixer calibration: one [`ChannelCal`] per channel. The I channel is
/// the reference; estimation fixes its scale at 1 and its phase at 0.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Calibration {
    pub i: ChannelCal,
    pub q: ChannelCal,
}

impl Calibration {
    /// A calibration that corrects nothing.
    pub fn identity() -> Self {
        Self {
            i: ChannelCal::identity(),
            q: ChannelCal::identity(),
        }
    }
}

impl Default for Calibration {
    fn default() -> Self {
        Self::identity()
    }
}

/// Final linear rescale of an up-converted RF waveform.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct RfTrim {
    pub scale: f64,
    pub offset: f64,
}

impl RfTrim {
    pub fn apply(&self, w: &lib_wave::Waveform) -> lib_wave::Waveform {
        w.scale(self.scale).offset(self.offset)
    }
}

impl Default for RfTrim {
    fn default() -> Self {
        Self {
            scale: 1.0,
            offset: 0.0,
        }
    }
}
