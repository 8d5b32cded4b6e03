//! Composable digital filters over waveforms.
//!
//! A [`Filter`] is a named transformation `(samples, rate) -> (samples, rate)`
//! that is total: all configuration is validated at construction
//! ([`DspError::InvalidConfig`]), never at `process`. Filters are stateless
//! beyond their construction parameters, so one filter value can be applied
//! to any number of waveforms.
//!
//! IIR filters are Butterworth designs realized as cascaded biquad sections
//! (analog prototype poles mapped through the bilinear transform with
//! frequency prewarping) and are applied zero-phase: forward over the record,
//! then backward. Zero-phase application squares the magnitude response and
//! cancels group delay, which keeps calibrated pulse timing intact.
//!
//! `series` and `parallel` combinators compose filters into new filters:
//! series pipes output to input in order; parallel runs every branch on the
//! same input and averages the results.

use crate::error::{DspError, DspResult};
use lib_wave::{MegaHertz, Waveform};
use num_complex::Complex64;
use rand::rngs::StdRng;
use rand::SeedableRng;
use rand_distr::{Distribution, Normal};
use std::f64::consts::PI;

/// A stateless samples-to-samples transformation.
pub trait Filter {
    /// Transform a sample sequence. Total; never fails for a constructed
    /// filter.
    fn process(&self, samples: &[Complex64], sample_rate: f64) -> (Vec<Complex64>, f64);

    /// Apply the filter to a waveform, producing a new waveform.
    fn apply(&self, w: &Waveform) -> Waveform {
        let (samples, rate) = self.process(&w.samples, w.sample_rate);
        Waveform::new(samples, rate)
    }
}

// ----------------------------------------------------------------------
// IIR (Butterworth) filters
// ----------------------------------------------------------------------

/// Frequency response shape of a prototype section.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Response {
    Lowpass,
    Highpass,
}

/// A single biquad (second-order section).
///
/// Transfer function `H(z) = (b0 + b1 z^-1 + b2 z^-2) / (1 + a1 z^-1 + a2 z^-2)`,
/// run in Direct Form II Transposed. Sections carry coefficients only; the
/// run-time state lives on the stack of the cascade loop.
#[derive(Clone, Copy, Debug, PartialEq)]
struct Biquad {
    b: [f64; 3],
    a: [f64; 2],
}

impl Biquad {
    /// Poles inside the unit circle.
    fn is_stable(&self) -> bool {
        self.a[1].abs() < 1.0 && self.a[0].abs() < 1.0 + self.a[1]
    }
}

/// Butterworth IIR filter applied zero-phase (forward-backward).
#[derive(Clone, Debug)]
pub struct IirFilter {
    sections: Vec<Biquad>,
}

impl IirFilter {
    /// Design a Butterworth lowpass filter.
    ///
    /// `cutoff` is the -3 dB point of a single pass; zero-phase application
    /// doubles the attenuation in dB.
    pub fn low_pass(order: usize, cutoff: MegaHertz, sample_rate: f64) -> DspResult<Self> {
        validate_order(order, 20)?;
        validate_cutoff(cutoff, sample_rate)?;
        Ok(Self {
            sections: design_butterworth(order, cutoff.0, sample_rate, Response::Lowpass),
        })
    }

    /// Design a Butterworth highpass filter.
    pub fn high_pass(order: usize, cutoff: MegaHertz, sample_rate: f64) -> DspResult<Self> {
        validate_order(order, 20)?;
        validate_cutoff(cutoff, sample_rate)?;
        Ok(Self {
            sections: design_butterworth(order, cutoff.0, sample_rate, Response::Highpass),
        })
    }

    /// Design a Butterworth bandpass filter as a lowpass/highpass cascade.
    ///
    /// `order` applies per edge, so the total order is `2 * order`. The
    /// cascade is normalized to unit gain at the band's geometric center,
    /// where the edge-filter roll-offs would otherwise compound (a true
    /// band-pass transform has unit peak gain; narrow bands need this to
    /// keep readout amplitudes meaningful).
    pub fn band_pass(
        order: usize,
        low: MegaHertz,
        high: MegaHertz,
        sample_rate: f64,
    ) -> DspResult<Self> {
        validate_order(order, 10)?;
        validate_cutoff(low, sample_rate)?;
        validate_cutoff(high, sample_rate)?;
        if low.0 >= high.0 {
            return Err(DspError::InvalidConfig(format!(
                "band edges conflict: low {} MHz >= high {} MHz",
                low.0, high.0
            )));
        }

        let mut sections = design_butterworth(order, high.0, sample_rate, Response::Lowpass);
        sections.extend(design_butterworth(order, low.0, sample_rate, Response::Highpass));

        let mut filter = Self { sections };
        let center = MegaHertz((low.0 * high.0).sqrt());
        let gain = filter.frequency_response(center, sample_rate).norm();
        if gain > 0.0 {
            for b in filter.sections[0].b.iter_mut() {
                *b /= gain;
            }
        }
        Ok(filter)
    }

    /// All poles inside the unit circle.
    pub fn is_stable(&self) -> bool {
        self.sections.iter().all(Biquad::is_stable)
    }

    /// Complex frequency response of a single (one-directional) pass.
    pub fn frequency_response(&self, freq: MegaHertz, sample_rate: f64) -> Complex64 {
        let omega = 2.0 * PI * freq.0 / sample_rate;
        let z_inv = Complex64::new(omega.cos(), -omega.sin());
        let z_inv2 = z_inv * z_inv;

        let mut response = Complex64::new(1.0, 0.0);
        for s in &self.sections {
            let num = s.b[0] + s.b[1] * z_inv + s.b[2] * z_inv2;
            let den = 1.0 + s.a[0] * z_inv + s.a[1] * z_inv2;
            response *= num / den;
        }
        response
    }

    /// Run the cascade once, forward, over a sample sequence.
    fn run_forward(&self, input: &[Complex64]) -> Vec<Complex64> {
        let zero = Complex64::new(0.0, 0.0);
        let mut buf = input.to_vec();
        for s in &self.sections {
            let mut state = [zero; 2];
            for x in buf.iter_mut() {
                let y = s.b[0] * *x + state[0];
                state[0] = s.b[1] * *x - s.a[0] * y + state[1];
                state[1] = s.b[2] * *x - s.a[1] * y;
                *x = y;
            }
        }
        buf
    }
}

impl Filter for IirFilter {
    fn process(&self, samples: &[Complex64], sample_rate: f64) -> (Vec<Complex64>, f64) {
        // Zero-phase: forward pass, then the same cascade time-reversed.
        let mut buf = self.run_forward(samples);
        buf.reverse();
        let mut buf = self.run_forward(&buf);
        buf.reverse();
        (buf, sample_rate)
    }
}

fn validate_order(order: usize, max: usize) -> DspResult<()> {
    if order == 0 || order > max {
        return Err(DspError::InvalidConfig(format!(
            "filter order must be in 1..={}, got {}",
            max, order
        )));
    }
    Ok(())
}

fn validate_cutoff(cutoff: MegaHertz, sample_rate: f64) -> DspResult<()> {
    if sample_rate <= 0.0 {
        return Err(DspError::InvalidConfig(format!(
            "sample rate must be positive, got {}",
            sample_rate
        )));
    }
    let nyquist = sample_rate / 2.0;
    if cutoff.0 <= 0.0 || cutoff.0 >= nyquist {
        return Err(DspError::InvalidConfig(format!(
            "cutoff {} MHz outside open Nyquist band (0, {}) MHz",
            cutoff.0, nyquist
        )));
    }
    Ok(())
}

/// Butterworth analog prototype poles on the s-plane unit circle.
fn butterworth_poles(order: usize) -> Vec<Complex64> {
    (0..order)
        .map(|k| {
            let theta = PI * (2 * k + order + 1) as f64 / (2 * order) as f64;
            Complex64::new(theta.cos(), theta.sin())
        })
        .collect()
}

/// Prewarp an analog cutoff for the bilinear transform.
fn prewarp(cutoff: f64, sample_rate: f64) -> f64 {
    2.0 * sample_rate * (PI * cutoff / sample_rate).tan()
}

/// Map analog prototype poles onto digital biquad sections.
fn design_butterworth(
    order: usize,
    cutoff: f64,
    sample_rate: f64,
    response: Response,
) -> Vec<Biquad> {
    let wc = prewarp(cutoff, sample_rate);
    let k = 2.0 * sample_rate;

    // Each upper-half-plane pole yields one biquad (its conjugate is
    // implicit); a near-real pole yields a first-order section.
    let mut sections = Vec::new();
    for p in butterworth_poles(order) {
        if p.im.abs() < 1e-10 {
            sections.push(bilinear_single(p.re * wc, k, response));
        } else if p.im > 0.0 {
            sections.push(bilinear_pair(p * wc, k, response));
        }
    }
    sections
}

/// Bilinear transform of a single real pole into a first-order section.
fn bilinear_single(p: f64, k: f64, response: Response) -> Biquad {
    let alpha = k - p;
    let a1 = -(k + p) / alpha;
    match response {
        Response::Lowpass => Biquad {
            b: [-p / alpha, -p / alpha, 0.0],
            a: [a1, 0.0],
        },
        Response::Highpass => Biquad {
            b: [k / alpha, -k / alpha, 0.0],
            a: [a1, 0.0],
        },
    }
}

/// Bilinear transform of a conjugate pole pair into a second-order section.
fn bilinear_pair(p: Complex64, k: f64, response: Response) -> Biquad {
    let mag_sq = p.norm_sqr();
    let k2 = k * k;
    let d = k2 - 2.0 * k * p.re + mag_sq;
    let a = [2.0 * (mag_sq - k2) / d, (k2 + 2.0 * k * p.re + mag_sq) / d];

    match response {
        Response::Lowpass => Biquad {
            b: [mag_sq / d, 2.0 * mag_sq / d, mag_sq / d],
            a,
        },
        Response::Highpass => Biquad {
            b: [k2 / d, -2.0 * k2 / d, k2 / d],
            a,
        },
    }
}

// ----------------------------------------------------------------------
// Kernel and statistics filters
// ----------------------------------------------------------------------

/// Gaussian smoothing via normalized "same"-mode convolution.
#[derive(Clone, Debug)]
pub struct GaussianSmooth {
    kernel: Vec<Complex64>,
}

impl GaussianSmooth {
    /// Build a discrete Gaussian kernel spanning `-half_width..=half_width`
    /// samples with standard deviation `half_width / spread`.
    pub fn new(half_width: usize, spread: f64) -> DspResult<Self> {
        if half_width == 0 {
            return Err(DspError::InvalidConfig(
                "smoothing half-width must be at least 1 sample".into(),
            ));
        }
        if spread <= 0.0 || !spread.is_finite() {
            return Err(DspError::InvalidConfig(format!(
                "spread ratio must be positive, got {}",
                spread
            )));
        }

        let sigma = half_width as f64 / spread;
        let h = half_width as i64;
        let kernel = (-h..=h)
            .map(|k| {
                let x = k as f64 / sigma;
                Complex64::new((-0.5 * x * x).exp(), 0.0)
            })
            .collect();
        Ok(Self { kernel })
    }
}

impl Filter for GaussianSmooth {
    fn process(&self, samples: &[Complex64], sample_rate: f64) -> (Vec<Complex64>, f64) {
        (convolve_same_normalized(samples, &self.kernel), sample_rate)
    }
}

/// Normalized same-mode convolution; output length equals input length.
fn convolve_same_normalized(samples: &[Complex64], kernel: &[Complex64]) -> Vec<Complex64> {
    let sum: Complex64 = kernel.iter().sum();
    let n = samples.len();
    let m = kernel.len();
    if n == 0 {
        return Vec::new();
    }

    let mut full = vec![Complex64::new(0.0, 0.0); n + m - 1];
    for (i, &x) in samples.iter().enumerate() {
        for (j, &k) in kernel.iter().enumerate() {
            full[i + j] += x * (k / sum);
        }
    }
    let offset = (m - 1) / 2;
    full[offset..offset + n].to_vec()
}

/// White Gaussian noise injector at a target signal-to-noise ratio.
///
/// Noise power is scaled to the mean squared value of the input. Real inputs
/// receive real noise; complex inputs receive independent noise on the I and
/// Q channels with the power split between them.
#[derive(Clone, Debug)]
pub struct WhiteNoise {
    snr_db: f64,
    seed: Option<u64>,
}

impl WhiteNoise {
    pub fn new(snr_db: f64) -> DspResult<Self> {
        if !snr_db.is_finite() {
            return Err(DspError::InvalidConfig(format!(
                "SNR must be finite, got {} dB",
                snr_db
            )));
        }
        Ok(Self { snr_db, seed: None })
    }

    /// Deterministic variant for reproducible records.
    pub fn with_seed(snr_db: f64, seed: u64) -> DspResult<Self> {
        let mut noise = Self::new(snr_db)?;
        noise.seed = Some(seed);
        Ok(noise)
    }
}

impl Filter for WhiteNoise {
    fn process(&self, samples: &[Complex64], sample_rate: f64) -> (Vec<Complex64>, f64) {
        if samples.is_empty() {
            return (Vec::new(), sample_rate);
        }

        let xpower =
            samples.iter().map(|c| c.norm_sqr()).sum::<f64>() / samples.len() as f64;
        let npower = xpower / 10f64.powf(self.snr_db / 10.0);
        if npower == 0.0 {
            return (samples.to_vec(), sample_rate);
        }

        let mut rng: StdRng = match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        let complex = samples.iter().any(|c| c.im != 0.0);
        let sigma = if complex {
            (npower / 2.0).sqrt()
        } else {
            npower.sqrt()
        };
        let normal = Normal::new(0.0, sigma).expect("sigma is finite and positive");

        let out = samples
            .iter()
            .map(|&c| {
                let re = c.re + normal.sample(&mut rng);
                let im = if complex {
                    c.im + normal.sample(&mut rng)
                } else {
                    c.im
                };
                Complex64::new(re, im)
            })
            .collect();
        (out, sample_rate)
    }
}

/// Subtracts the complex sample mean.
#[derive(Clone, Copy, Debug, Default)]
pub struct DcBlocker;

impl Filter for DcBlocker {
    fn process(&self, samples: &[Complex64], sample_rate: f64) -> (Vec<Complex64>, f64) {
        if samples.is_empty() {
            return (Vec::new(), sample_rate);
        }
        let mean = samples.iter().sum::<Complex64>() / samples.len() as f64;
        (samples.iter().map(|&c| c - mean).collect(), sample_rate)
    }
}

// ----------------------------------------------------------------------
// Combinators
// ----------------------------------------------------------------------

/// Apply filters in sequence, piping output to input.
pub struct Series {
    stages: Vec<Box<dyn Filter + Send + Sync>>,
}

impl Series {
    pub fn new(stages: Vec<Box<dyn Filter + Send + Sync>>) -> Self {
        Self { stages }
    }
}

impl Filter for Series {
    fn process(&self, samples: &[Complex64], sample_rate: f64) -> (Vec<Complex64>, f64) {
        let mut buf = samples.to_vec();
        let mut rate = sample_rate;
        for stage in &self.stages {
            let (next, next_rate) = stage.process(&buf, rate);
            buf = next;
            rate = next_rate;
        }
        (buf, rate)
    }
}

/// Apply filters independently to the same input and average the results.
///
/// Branch outputs of different lengths are zero-padded to the longest before
/// averaging; all branches must preserve the sample rate.
pub struct Parallel {
    branches: Vec<Box<dyn Filter + Send + Sync>>,
}

impl Parallel {
    pub fn new(branches: Vec<Box<dyn Filter + Send + Sync>>) -> Self {
        Self { branches }
    }
}

impl Filter for Parallel {
    fn process(&self, samples: &[Complex64], sample_rate: f64) -> (Vec<Complex64>, f64) {
        if self.branches.is_empty() {
            return (samples.to_vec(), sample_rate);
        }

        let outputs: Vec<Vec<Complex64>> = self
            .branches
            .iter()
            .map(|b| b.process(samples, sample_rate).0)
            .collect();

        let len = outputs.iter().map(Vec::len).max().unwrap_or(0);
        let scale = 1.0 / self.branches.len() as f64;
        let zero = Complex64::new(0.0, 0.0);

        let averaged = (0..len)
            .map(|k| {
                outputs
                    .iter()
                    .map(|o| o.get(k).copied().unwrap_or(zero))
                    .sum::<Complex64>()
                    * scale
            })
            .collect();
        (averaged, sample_rate)
    }
}

// Boxed filters are filters, so combinators nest.
impl<F: Filter + ?Sized> Filter for Box<F> {
    fn process(&self, samples: &[Complex64], sample_rate: f64) -> (Vec<Complex64>, f64) {
        (**self).process(samples, sample_rate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lib_wave::generators::{dc, gaussian, sine};
    use crate::spectrum::spectrum_at;

    #[test]
    fn test_construction_fail_fast() {
        assert!(IirFilter::low_pass(0, MegaHertz(10.0), 100.0).is_err());
        assert!(IirFilter::low_pass(4, MegaHertz(60.0), 100.0).is_err());
        assert!(IirFilter::low_pass(4, MegaHertz(-1.0), 100.0).is_err());
        assert!(IirFilter::band_pass(3, MegaHertz(20.0), MegaHertz(10.0), 100.0).is_err());
        assert!(GaussianSmooth::new(0, 2.0).is_err());
        assert!(GaussianSmooth::new(5, 0.0).is_err());
        assert!(WhiteNoise::new(f64::NAN).is_err());
    }

    #[test]
    fn test_butterworth_stability() {
        for order in 1..=8 {
            let f = IirFilter::low_pass(order, MegaHertz(10.0), 100.0).unwrap();
            assert!(f.is_stable(), "order {} unstable", order);
        }
    }

    #[test]
    fn test_lowpass_passes_dc() {
        let f = IirFilter::low_pass(4, MegaHertz(10.0), 100.0).unwrap();
        let w = dc(10.0, 100.0);
        let out = f.apply(&w);

        // Settled interior samples hold the DC level.
        assert!((out.samples[500].re - 1.0).abs() < 1e-3);
        assert!((out.sample_rate - 100.0).abs() < 1e-12);
    }

    #[test]
    fn test_highpass_blocks_dc() {
        let f = IirFilter::high_pass(4, MegaHertz(10.0), 100.0).unwrap();
        let out = f.apply(&dc(10.0, 100.0));
        assert!(out.samples[500].norm() < 1e-3);
    }

    #[test]
    fn test_bandpass_selects_carrier() {
        let rate = 1000.0;
        let in_band = sine(MegaHertz(50.0).angular(), 0.0, 4.0, rate);
        let out_band = sine(MegaHertz(250.0).angular(), 0.0, 4.0, rate);
        let mixed = in_band.add(&out_band).unwrap();

        let f = IirFilter::band_pass(3, MegaHertz(40.0), MegaHertz(60.0), rate).unwrap();
        let filtered = f.apply(&mixed);

        let kept = spectrum_at(&filtered, MegaHertz(50.0), true).unwrap().norm();
        let rejected = spectrum_at(&filtered, MegaHertz(250.0), true).unwrap().norm();
        assert!(kept > 0.4, "in-band carrier lost: {}", kept);
        assert!(rejected < 0.01, "out-of-band carrier leaked: {}", rejected);
    }

    #[test]
    fn test_bandpass_unit_center_gain() {
        let f = IirFilter::band_pass(3, MegaHertz(45.0), MegaHertz(55.0), 1000.0).unwrap();
        let center = MegaHertz((45.0f64 * 55.0).sqrt());
        assert!((f.frequency_response(center, 1000.0).norm() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_zero_phase_preserves_pulse_center() {
        let w = gaussian(4.0, 100.0);
        let f = IirFilter::low_pass(4, MegaHertz(5.0), 100.0).unwrap();
        let out = f.apply(&w);

        let argmax = |w: &Waveform| {
            w.samples
                .iter()
                .enumerate()
                .max_by(|a, b| a.1.re.partial_cmp(&b.1.re).unwrap())
                .map(|(i, _)| i)
                .unwrap()
        };
        let drift = argmax(&out) as i64 - argmax(&w) as i64;
        assert!(drift.abs() <= 1, "group delay leaked: {} samples", drift);
    }

    #[test]
    fn test_gaussian_smooth_preserves_level() {
        let f = GaussianSmooth::new(5, 2.5).unwrap();
        let out = f.apply(&dc(1.0, 100.0).scale(2.0));

        assert_eq!(out.len(), 100);
        assert!((out.samples[50].re - 2.0).abs() < 1e-9);
    }

    #[test]
    fn test_dc_blocker_zero_mean() {
        let out = DcBlocker.apply(&dc(1.0, 100.0).offset(3.0));
        let mean: Complex64 =
            out.samples.iter().sum::<Complex64>() / out.len() as f64;
        assert!(mean.norm() < 1e-12);
    }

    #[test]
    fn test_white_noise_hits_target_snr() {
        let w = dc(10.0, 100.0);
        let f = WhiteNoise::with_seed(20.0, 7).unwrap();
        let out = f.apply(&w);

        let noise_power = out
            .samples
            .iter()
            .zip(w.samples.iter())
            .map(|(y, x)| (y - x).norm_sqr())
            .sum::<f64>()
            / w.len() as f64;
        // Target noise power is 0.01; allow statistical spread.
        assert!((noise_power - 0.01).abs() < 0.003, "got {}", noise_power);
        assert!(!out.is_complex());
    }

    #[test]
    fn test_series_pipes_in_order() {
        let series = Series::new(vec![
            Box::new(DcBlocker),
            Box::new(GaussianSmooth::new(3, 2.0).unwrap()),
        ]);
        let w = dc(1.0, 100.0).offset(4.0);
        let out = series.apply(&w);

        let mean: Complex64 =
            out.samples.iter().sum::<Complex64>() / out.len() as f64;
        assert!(mean.norm() < 1e-9);
    }

    #[test]
    fn test_parallel_averages() {
        let parallel = Parallel::new(vec![
            Box::new(DcBlocker),
            Box::new(GaussianSmooth::new(3, 2.0).unwrap()),
        ]);
        let w = dc(1.0, 100.0).scale(2.0);
        let out = parallel.apply(&w);

        // Branch one removes the level, branch two keeps it: average is half.
        assert!((out.samples[50].re - 1.0).abs() < 1e-9);
    }
}
