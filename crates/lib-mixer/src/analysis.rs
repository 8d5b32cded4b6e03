//! Calibration estimation, application and homodyne demodulation.
//!
//! The estimator reads the spectral peaks of a reference record whose ideal
//! form is the complex carrier `exp(i * 2*pi*freq * t)` (I = cos, Q = sin).
//! Channel offsets come from the DC bins, the amplitude ratio from the
//! carrier-bin magnitudes with I as the unit reference, and the quadrature
//! phase error from the carrier-bin angle difference with a +90 degree
//! correction for the inherent sine/cosine quadrature.
//!
//! Applying a calibration inverts the per-channel affine step and realizes
//! the phase correction as a *time shift* `phase / (2*pi*freq)` through a
//! cubic interpolant. The time-shift trick is only valid in a narrow band
//! around `freq`, which is exactly the regime the calibration loop operates
//! in: it always re-estimates at the frequency it corrects.

use crate::calibration::{Calibration, ChannelCal};
use crate::error::{MixerError, MixerResult};
use lib_dsp::filter::{Filter, GaussianSmooth, IirFilter};
use lib_dsp::interpolation::{value_at, InterpKind};
use lib_dsp::spectrum::spectrum_at;
use lib_wave::generators::complex_exp;
use lib_wave::units::wrap_degrees;
use lib_wave::{MegaHertz, Waveform};
use num_complex::Complex64;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

/// Carrier magnitudes below this are treated as absent.
const CARRIER_FLOOR: f64 = 1e-9;

/// Tunable stages of the per-tone readout chain.
///
/// The defaults are the lab's standing choices; configs override individual
/// fields. Infeasible values surface as filter construction errors when the
/// chain runs.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ReadoutSettings {
    /// Band-pass Butterworth order per edge.
    #[serde(default = "default_band_order")]
    pub band_order: usize,

    /// Fractional bandwidth around the tone (0.1 = +/-10%).
    #[serde(default = "default_band_fraction")]
    pub band_fraction: f64,

    /// Smoothing kernel half-width, samples.
    #[serde(default = "default_smooth_half_width")]
    pub smooth_half_width: usize,

    /// Smoothing kernel spread ratio (sigma = half_width / spread).
    #[serde(default = "default_smooth_spread")]
    pub smooth_spread: f64,
}

fn default_band_order() -> usize {
    3
}
fn default_band_fraction() -> f64 {
    0.1
}
fn default_smooth_half_width() -> usize {
    5
}
fn default_smooth_spread() -> f64 {
    2.5
}

impl Default for ReadoutSettings {
    fn default() -> Self {
        Self {
            band_order: default_band_order(),
            band_fraction: default_band_fraction(),
            smooth_half_width: default_smooth_half_width(),
            smooth_spread: default_smooth_spread(),
        }
    }
}

/// Estimate mixer impairments from a reference record at `freq`.
pub fn estimate_calibration(iq: &Waveform, freq: MegaHertz) -> MixerResult<Calibration> {
    let i = iq.real_part();
    let q = iq.imag_part();

    let offset_i = spectrum_at(&i, MegaHertz(0.0), false)?.re;
    let offset_q = spectrum_at(&q, MegaHertz(0.0), false)?.re;

    let peak_i = spectrum_at(&i, freq, true)?;
    let peak_q = spectrum_at(&q, freq, true)?;
    if peak_i.norm() < CARRIER_FLOOR {
        return Err(MixerError::WeakCarrier { freq: freq.0 });
    }

    let scale_q = peak_q.norm() / peak_i.norm();
    let phase_q_deg =
        wrap_degrees(peak_q.arg().to_degrees() - peak_i.arg().to_degrees() + 90.0);

    Ok(Calibration {
        i: ChannelCal::new(1.0, offset_i, 0.0),
        q: ChannelCal::new(scale_q, offset_q, phase_q_deg.to_radians()),
    })
}

/// Undo mixer impairments on a record, channel by channel.
pub fn calibrate(iq: &Waveform, freq: MegaHertz, cal: &Calibration) -> Waveform {
    let rate = iq.sample_rate;
    let i_chan: Vec<Complex64> = iq.samples.iter().map(|c| Complex64::new(c.re, 0.0)).collect();
    let q_chan: Vec<Complex64> = iq.samples.iter().map(|c| Complex64::new(c.im, 0.0)).collect();

    let shift = |phase: f64| {
        if phase == 0.0 {
            0.0
        } else {
            phase / freq.angular()
        }
    };
    let shift_i = shift(cal.i.phase);
    let shift_q = shift(cal.q.phase);

    let samples = (0..iq.len())
        .map(|k| {
            let t = (k as f64 + 0.5) / rate;
            let vi = value_at(&i_chan, rate, t - shift_i, InterpKind::Cubic).re;
            let vq = value_at(&q_chan, rate, t - shift_q, InterpKind::Cubic).re;
            Complex64::new(
                (vi - cal.i.offset) / cal.i.scale,
                (vq - cal.q.offset) / cal.q.scale,
            )
        })
        .collect();
    Waveform::new(samples, rate)
}

/// Homodyne demodulation: rotate a record down by `freq`.
///
/// With a calibration the record is corrected first. The result's real and
/// imaginary channels are the baseband I/Q quadratures.
pub fn demodulate(
    signal: &Waveform,
    freq: MegaHertz,
    cal: Option<&Calibration>,
) -> MixerResult<Waveform> {
    let base = match cal {
        Some(c) => calibrate(signal, freq, c),
        None => signal.clone(),
    };
    let carrier = complex_exp(-freq.angular(), 0.0, base.duration().0, base.sample_rate);
    Ok(base.mul(&carrier)?)
}

/// Full single-tone readout chain with the default [`ReadoutSettings`].
pub fn demodulate_tone(record: &Waveform, freq: MegaHertz) -> MixerResult<Waveform> {
    demodulate_tone_with(record, freq, &ReadoutSettings::default())
}

/// Full single-tone readout chain, the per-frequency body of
/// [`DemodulationPipeline`].
///
/// Band-pass design (fractional bandwidth around the tone, clamped inside
/// the Nyquist band), self-estimated calibration, calibration application,
/// band-pass, demodulation, then a Gaussian smooth.
pub fn demodulate_tone_with(
    record: &Waveform,
    freq: MegaHertz,
    settings: &ReadoutSettings,
) -> MixerResult<Waveform> {
    let nyquist = record.sample_rate / 2.0;
    let low = MegaHertz(freq.0 * (1.0 - settings.band_fraction));
    let high = MegaHertz((freq.0 * (1.0 + settings.band_fraction)).min(nyquist * 0.999));
    let band = IirFilter::band_pass(settings.band_order, low, high, record.sample_rate)?;

    let cal = estimate_calibration(record, freq)?;
    tracing::debug!(
        freq_mhz = freq.0,
        scale_q = cal.q.scale,
        phase_q_deg = cal.q.phase.to_degrees(),
        "estimated channel calibration"
    );

    let calibrated = calibrate(record, freq, &cal);
    let filtered = band.apply(&calibrated);
    let demodulated = demodulate(&filtered, freq, None)?;

    let smooth = GaussianSmooth::new(settings.smooth_half_width, settings.smooth_spread)?;
    Ok(smooth.apply(&demodulated))
}

/// Lazy multi-tone readout over a shared record.
///
/// Nothing runs until `next()` is called; each call processes exactly one
/// frequency and yields its baseband waveform (or the first error in its
/// chain).
pub struct DemodulationPipeline {
    record: Waveform,
    freqs: std::vec::IntoIter<MegaHertz>,
    settings: ReadoutSettings,
}

impl DemodulationPipeline {
    pub fn new(record: Waveform, freqs: Vec<MegaHertz>) -> Self {
        Self::with_settings(record, freqs, ReadoutSettings::default())
    }

    pub fn with_settings(
        record: Waveform,
        freqs: Vec<MegaHertz>,
        settings: ReadoutSettings,
    ) -> Self {
        Self {
            record,
            freqs: freqs.into_iter(),
            settings,
        }
    }
}

impl Iterator for DemodulationPipeline {
    type Item = MixerResult<Waveform>;

    fn next(&mut self) -> Option<Self::Item> {
        let freq = self.freqs.next()?;
        Some(demodulate_tone_with(&self.record, freq, &self.settings))
    }
}

/// Demodulate every frequency of a record in parallel with the default
/// settings.
pub fn demodulate_all(record: &Waveform, freqs: &[MegaHertz]) -> MixerResult<Vec<Waveform>> {
    demodulate_all_with(record, freqs, &ReadoutSettings::default())
}

/// Demodulate every frequency of a record in parallel.
pub fn demodulate_all_with(
    record: &Waveform,
    freqs: &[MegaHertz],
    settings: &ReadoutSettings,
) -> MixerResult<Vec<Waveform>> {
    freqs
        .par_iter()
        .map(|&f| demodulate_tone_with(record, f, settings))
        .collect()
}
