//! Spectral views of waveforms using rustfft.
//!
//! # Normalization Convention
//!
//! Every bin of the DFT is divided by the sample count, so bin 0 is the DC
//! mean and the transform is scale-invariant to the number of samples.
//!
//! The resulting waveform's `sample_rate` is reinterpreted as the
//! *frequency-domain point spacing*: `size / sample_rate_original` points per
//! MHz, i.e. the time duration of the input. Domain and co-domain swap roles;
//! this is a load-bearing convention, not an approximation: bin `k` sits at
//! frequency `k / duration` MHz, and `spectrum_at` inverts exactly that
//! mapping.
//!
//! The half-spectrum view keeps only bins `0..floor((N + 1) / 2)` and doubles
//! every bin except DC, converting the two-sided signed-frequency transform
//! into a one-sided physical amplitude: a unit real sinusoid reads back as
//! amplitude 1.0 at its carrier bin.

use crate::error::{DspError, DspResult};
use lib_wave::{MegaHertz, Waveform};
use num_complex::Complex64;
use rustfft::FftPlanner;
use serde::{Deserialize, Serialize};

/// Projection applied to complex spectrum bins.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SpectrumMode {
    /// Keep complex bins unchanged.
    Complex,
    /// Bin magnitude.
    Amplitude,
    /// Bin phase angle in degrees.
    PhaseDeg,
    /// Real part.
    Real,
    /// Imaginary part.
    Imag,
}

impl SpectrumMode {
    fn project(self, c: Complex64) -> Complex64 {
        match self {
            SpectrumMode::Complex => c,
            SpectrumMode::Amplitude => Complex64::new(c.norm(), 0.0),
            SpectrumMode::PhaseDeg => Complex64::new(c.arg().to_degrees(), 0.0),
            SpectrumMode::Real => Complex64::new(c.re, 0.0),
            SpectrumMode::Imag => Complex64::new(c.im, 0.0),
        }
    }
}

/// Normalized DFT bins (each divided by the sample count).
fn normalized_bins(w: &Waveform) -> Vec<Complex64> {
    let n = w.len();
    let mut bins = w.samples.clone();
    let mut planner = FftPlanner::new();
    let fft = planner.plan_fft_forward(n);
    fft.process(&mut bins);

    let scale = 1.0 / n as f64;
    for b in bins.iter_mut() {
        *b *= scale;
    }
    bins
}

/// Two-sided spectral view of a waveform.
///
/// The output waveform's `sample_rate` is the frequency-domain point spacing
/// `size / rate` (see module docs).
pub fn spectrum(w: &Waveform, mode: SpectrumMode) -> DspResult<Waveform> {
    if w.is_empty() {
        return Err(DspError::InsufficientData { needed: 1, got: 0 });
    }

    let bins = normalized_bins(w);
    let samples = bins.into_iter().map(|c| mode.project(c)).collect();
    Ok(Waveform::new(samples, w.len() as f64 / w.sample_rate))
}

/// One-sided physical-amplitude spectral view.
///
/// Keeps bins `0..floor((N + 1) / 2)` and doubles every bin except DC.
pub fn half_spectrum(w: &Waveform, mode: SpectrumMode) -> DspResult<Waveform> {
    if w.is_empty() {
        return Err(DspError::InsufficientData { needed: 1, got: 0 });
    }

    let bins = normalized_bins(w);
    let keep = (w.len() + 1) / 2;
    let samples = bins[..keep]
        .iter()
        .enumerate()
        .map(|(k, &c)| mode.project(if k == 0 { c } else { c * 2.0 }))
        .collect();
    Ok(Waveform::new(samples, w.len() as f64 / w.sample_rate))
}

/// Complex readout of the spectrum bin nearest a single frequency.
///
/// The bin index is `round(freq * duration)`; negative frequencies wrap onto
/// the upper half of the transform. With `half` the non-DC readout is doubled
/// to a one-sided physical amplitude. This is the calibration estimator's
/// primitive; projections (magnitude, phase) are taken by the caller on the
/// returned complex value.
pub fn spectrum_at(w: &Waveform, freq: MegaHertz, half: bool) -> DspResult<Complex64> {
    let n = w.len();
    if n == 0 {
        return Err(DspError::InsufficientData { needed: 1, got: 0 });
    }

    let nyquist = w.sample_rate / 2.0;
    if freq.0.abs() > nyquist {
        return Err(DspError::OutOfBand {
            freq: freq.0,
            nyquist,
        });
    }

    let spacing = w.duration().0;
    let idx = (freq.0 * spacing).round() as i64;
    let bin = idx.rem_euclid(n as i64) as usize;

    let bins = normalized_bins(w);
    let value = bins[bin];
    Ok(if half && bin != 0 { value * 2.0 } else { value })
}

#[cfg(test)]
mod tests {
    use super::*;
    use lib_wave::generators::{dc, sine};

    #[test]
    fn test_dc_bin_is_mean() {
        let w = dc(1.0, 1000.0).scale(0.75);
        let s = spectrum(&w, SpectrumMode::Complex).unwrap();

        assert_eq!(s.len(), 1000);
        assert!((s.samples[0].re - 0.75).abs() < 1e-9);
        assert!((s.sample_rate - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_sinusoid_peak_bin() {
        // 50 MHz carrier, 1 us record at 1000 samples/us: energy at bin 50.
        let f = 50.0;
        let w = sine(2.0 * std::f64::consts::PI * f, 0.0, 1.0, 1000.0);
        let amp = spectrum(&w, SpectrumMode::Amplitude).unwrap();

        let peak_bin = amp
            .samples
            .iter()
            .take(500)
            .enumerate()
            .max_by(|a, b| a.1.re.partial_cmp(&b.1.re).unwrap())
            .map(|(i, _)| i)
            .unwrap();
        assert_eq!(peak_bin, 50);

        // Two-sided transform carries half the amplitude per side.
        assert!((amp.samples[50].re - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_half_spectrum_doubles_non_dc() {
        let f = 50.0;
        let w = sine(2.0 * std::f64::consts::PI * f, 0.0, 1.0, 1000.0);
        let half = half_spectrum(&w, SpectrumMode::Amplitude).unwrap();

        assert_eq!(half.len(), 500);
        assert!((half.samples[50].re - 1.0).abs() < 1e-6);

        // DC is not doubled.
        let offset = dc(1.0, 1000.0).scale(0.3);
        let half_dc = half_spectrum(&offset, SpectrumMode::Amplitude).unwrap();
        assert!((half_dc.samples[0].re - 0.3).abs() < 1e-9);
    }

    #[test]
    fn test_spectrum_at_reads_carrier() {
        let f = MegaHertz(50.0);
        let w = sine(f.angular(), 0.0, 1.0, 1000.0);

        let peak = spectrum_at(&w, f, true).unwrap();
        assert!((peak.norm() - 1.0).abs() < 1e-6);

        // sin reads back at -90 degrees, plus the half-sample center offset
        // of 360 * f * dt / 2 = 9 degrees at 50 MHz and 1000 samples/us.
        assert!((peak.arg().to_degrees() - (-90.0 + 9.0)).abs() < 1e-3);
    }

    #[test]
    fn test_spectrum_at_negative_frequency_wraps() {
        let f = MegaHertz(50.0);
        let w = sine(f.angular(), 0.0, 1.0, 1000.0);

        let pos = spectrum_at(&w, f, false).unwrap();
        let neg = spectrum_at(&w, MegaHertz(-50.0), false).unwrap();
        // Real signal: conjugate symmetry.
        assert!((pos - neg.conj()).norm() < 1e-9);
    }

    #[test]
    fn test_spectrum_at_out_of_band() {
        let w = dc(1.0, 100.0);
        assert!(matches!(
            spectrum_at(&w, MegaHertz(60.0), false),
            Err(DspError::OutOfBand { .. })
        ));
    }
}
