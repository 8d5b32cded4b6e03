//! Waveform sample-rate conversion.
//!
//! Resampling reconstructs a continuous-time interpolant from the existing
//! sample centers and re-samples it at the new rate over the same duration.
//! Upsampling uses cubic interpolation (the new grid falls between old
//! points, where smoothness matters); downsampling uses linear. Equal rates
//! are a no-op. Complex waveforms interpolate I and Q independently.

use crate::error::{DspError, DspResult};
use crate::interpolation::{value_at, InterpKind};
use lib_wave::Waveform;

/// Resample a waveform to a new sample rate, preserving its duration.
pub fn resample(w: &Waveform, new_rate: f64) -> DspResult<Waveform> {
    if new_rate <= 0.0 || !new_rate.is_finite() {
        return Err(DspError::InvalidConfig(format!(
            "new sample rate must be positive, got {}",
            new_rate
        )));
    }
    if w.is_empty() {
        return Err(DspError::InsufficientData { needed: 1, got: 0 });
    }

    if new_rate == w.sample_rate {
        return Ok(w.clone());
    }

    let kind = if new_rate > w.sample_rate {
        InterpKind::Cubic
    } else {
        InterpKind::Linear
    };

    let duration = w.duration().0;
    let new_len = (duration * new_rate).round() as usize;

    let samples = (0..new_len)
        .map(|i| {
            let t = (i as f64 + 0.5) / new_rate;
            value_at(&w.samples, w.sample_rate, t, kind)
        })
        .collect();

    Ok(Waveform::new(samples, new_rate))
}
