//! Uniform-grid interpolation over waveform sample centers.
//!
//! Samples of a waveform at rate `r` sit at `x_j = (j + 0.5) / r`. The
//! interpolants here reconstruct a continuous-time view of those samples:
//! linear for downsampling (where extra smoothness buys nothing) and
//! Catmull-Rom cubic for upsampling and for the calibration time-shift,
//! where sub-sample accuracy matters.
//!
//! Outside the sampled span the interpolants clamp to the edge samples.
//! Complex waveforms interpolate the I and Q channels independently, which
//! the complex arithmetic below does implicitly.

use num_complex::Complex64;
use serde::{Deserialize, Serialize};

/// Interpolation kind for continuous-time reconstruction.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InterpKind {
    Linear,
    Cubic,
}

/// Interpolate a complex sample sequence at time `t` (microseconds).
pub fn value_at(samples: &[Complex64], sample_rate: f64, t: f64, kind: InterpKind) -> Complex64 {
    let n = samples.len();
    if n == 0 {
        return Complex64::new(0.0, 0.0);
    }
    if n == 1 {
        return samples[0];
    }

    // Fractional index over sample centers.
    let u = t * sample_rate - 0.5;
    if u <= 0.0 {
        return samples[0];
    }
    if u >= (n - 1) as f64 {
        return samples[n - 1];
    }

    let j = u.floor() as usize;
    let s = u - j as f64;

    match kind {
        InterpKind::Linear => samples[j] * (1.0 - s) + samples[j + 1] * s,
        InterpKind::Cubic => {
            // Catmull-Rom with edge-clamped neighbors.
            let p0 = samples[j.saturating_sub(1)];
            let p1 = samples[j];
            let p2 = samples[j + 1];
            let p3 = samples[(j + 2).min(n - 1)];

            let a = p1 * 2.0;
            let b = p2 - p0;
            let c = p0 * 2.0 - p1 * 5.0 + p2 * 4.0 - p3;
            let d = p3 - p0 + (p1 - p2) * 3.0;
            (a + b * s + c * s * s + d * s * s * s) * 0.5
        }
    }
}

/// Interpolate a real sample sequence at time `t`.
pub fn value_at_real(samples: &[f64], sample_rate: f64, t: f64, kind: InterpKind) -> f64 {
    // Cheap shim; the complex path is the shared implementation.
    let complex: Vec<Complex64> = samples.iter().map(|&v| Complex64::new(v, 0.0)).collect();
    value_at(&complex, sample_rate, t, kind).re
}
