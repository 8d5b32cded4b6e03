//! Sampled-waveform value type and its algebra.
//!
//! Waveforms are the primary data structure for pulse generation and signal
//! analysis, representing control signals sampled at uniform intervals.
//!
//! # Sample Semantics
//!
//! Samples represent **point measurements at sample centers**. For a waveform
//! with `N` samples at rate `r` (samples per microsecond), the sample times are:
//!
//! ```text
//! t[i] = (i + 0.5) / r,  for i = 0, 1, ..., N-1
//! ```
//!
//! Closed-form generators evaluate their time function at these centers and
//! zero everything outside the generating domain, which models hardware whose
//! default output is zero.
//!
//! # Value Semantics
//!
//! Every public operation returns a new `Waveform`; no operation mutates a
//! shared buffer. Binary operations require equal sample rates and reconcile
//! lengths by zero-padding the shorter operand, so gate-pulse compositions
//! never lose samples silently.
//!
//! Each sample is complex: the real part carries the in-phase (I) component
//! and the imaginary part the quadrature (Q) component. Purely real waveforms
//! simply carry zero imaginary parts.

use crate::error::{WaveError, WaveResult};
use crate::units::Micros;
use num_complex::Complex64;
use serde::{Deserialize, Serialize};

/// Discrete convolution output mode.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConvolveMode {
    /// Full linear convolution: output length `n + m - 1`.
    Full,
    /// Centered output of the same length as the input signal.
    Same,
    /// Only samples where the kernel fully overlaps: length `n - m + 1`.
    Valid,
}

/// A uniformly-sampled waveform (samples + sample rate).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Waveform {
    /// Sample values. Real part = I, imaginary part = Q.
    pub samples: Vec<Complex64>,

    /// Sample rate in samples per microsecond. Strictly positive.
    pub sample_rate: f64,
}

impl Waveform {
    /// Create a new waveform from complex samples.
    ///
    /// # Panics
    ///
    /// Panics if `sample_rate` is not strictly positive. Use
    /// [`Waveform::try_new`] for a fallible constructor.
    pub fn new(samples: Vec<Complex64>, sample_rate: f64) -> Self {
        assert!(
            sample_rate > 0.0,
            "sample rate must be positive, got {}",
            sample_rate
        );
        Self { samples, sample_rate }
    }

    /// Try to create a new waveform, rejecting non-positive sample rates.
    pub fn try_new(samples: Vec<Complex64>, sample_rate: f64) -> WaveResult<Self> {
        if sample_rate <= 0.0 || !sample_rate.is_finite() {
            return Err(WaveError::InvalidSampleRate(sample_rate));
        }
        Ok(Self { samples, sample_rate })
    }

    /// Create a real-valued waveform from `f64` samples.
    pub fn from_real(samples: Vec<f64>, sample_rate: f64) -> Self {
        let samples = samples
            .into_iter()
            .map(|v| Complex64::new(v, 0.0))
            .collect();
        Self::new(samples, sample_rate)
    }

    /// Create a zero-valued waveform of specified sample count.
    pub fn zeros(len: usize, sample_rate: f64) -> Self {
        Self::new(vec![Complex64::new(0.0, 0.0); len], sample_rate)
    }

    /// Sample a closed-form complex time function over a finite domain.
    ///
    /// The function is evaluated at sample centers
    /// `t_i = start + (i + 0.5) / rate` and forced to zero outside the open
    /// interval `(start, stop)`. The domain endpoints may be given in either
    /// order.
    pub fn from_fn<F>(time_fn: F, domain: (f64, f64), sample_rate: f64) -> Self
    where
        F: Fn(f64) -> Complex64,
    {
        let start = domain.0.min(domain.1);
        let stop = domain.0.max(domain.1);
        // Count of centers strictly inside the span: (i + 0.5) / rate < width.
        // A plain round() would admit one extra sample when width * rate
        // lands exactly on a half.
        let n = ((stop - start) * sample_rate - 0.5).ceil().max(0.0) as usize;

        let dt = 1.0 / sample_rate;
        let samples = (0..n)
            .map(|i| {
                let t = start + (i as f64 + 0.5) * dt;
                if t > start && t < stop {
                    time_fn(t)
                } else {
                    Complex64::new(0.0, 0.0)
                }
            })
            .collect();

        Self::new(samples, sample_rate)
    }

    /// Sample a closed-form real time function over a finite domain.
    pub fn from_real_fn<F>(time_fn: F, domain: (f64, f64), sample_rate: f64) -> Self
    where
        F: Fn(f64) -> f64,
    {
        Self::from_fn(|t| Complex64::new(time_fn(t), 0.0), domain, sample_rate)
    }

    /// Combine two real waveforms into a complex I/Q waveform.
    ///
    /// The real parts of `i` and `q` become the real and imaginary channels.
    /// Lengths are reconciled by zero-padding the shorter operand.
    pub fn from_iq(i: &Waveform, q: &Waveform) -> WaveResult<Self> {
        check_rates(i, q)?;
        let len = i.len().max(q.len());
        let samples = (0..len)
            .map(|k| {
                let re = i.samples.get(k).map_or(0.0, |c| c.re);
                let im = q.samples.get(k).map_or(0.0, |c| c.re);
                Complex64::new(re, im)
            })
            .collect();
        Ok(Self::new(samples, i.sample_rate))
    }

    /// Number of samples in the waveform.
    #[inline]
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Check if the waveform is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Total duration of the waveform.
    #[inline]
    pub fn duration(&self) -> Micros {
        Micros(self.samples.len() as f64 / self.sample_rate)
    }

    /// Whether any sample carries a nonzero quadrature (imaginary) component.
    pub fn is_complex(&self) -> bool {
        self.samples.iter().any(|c| c.im != 0.0)
    }

    /// Time of the sample center at a given index.
    #[inline]
    pub fn time_at(&self, index: usize) -> f64 {
        (index as f64 + 0.5) / self.sample_rate
    }

    /// Iterator over sample-center times in microseconds.
    pub fn times(&self) -> impl Iterator<Item = f64> + '_ {
        (0..self.samples.len()).map(|i| self.time_at(i))
    }

    // ------------------------------------------------------------------
    // Channel views and pointwise maps
    // ------------------------------------------------------------------

    /// In-phase channel (real parts) as a real waveform.
    pub fn real_part(&self) -> Waveform {
        self.map(|c| Complex64::new(c.re, 0.0))
    }

    /// Quadrature channel (imaginary parts) as a real waveform.
    pub fn imag_part(&self) -> Waveform {
        self.map(|c| Complex64::new(c.im, 0.0))
    }

    /// Elementwise magnitude as a real waveform.
    pub fn magnitude(&self) -> Waveform {
        self.map(|c| Complex64::new(c.norm(), 0.0))
    }

    /// Elementwise phase angle in degrees as a real waveform.
    pub fn phase_deg(&self) -> Waveform {
        self.map(|c| Complex64::new(c.arg().to_degrees(), 0.0))
    }

    /// Elementwise complex conjugate.
    pub fn conj(&self) -> Waveform {
        self.map(|c| c.conj())
    }

    /// Elementwise negation.
    pub fn neg(&self) -> Waveform {
        self.map(|c| -c)
    }

    /// Scale every sample by a real factor.
    pub fn scale(&self, factor: f64) -> Waveform {
        self.map(|c| c * factor)
    }

    /// Scale every sample by a complex factor.
    pub fn scale_complex(&self, factor: Complex64) -> Waveform {
        self.map(|c| c * factor)
    }

    /// Add a constant offset to every sample.
    pub fn offset(&self, offset: f64) -> Waveform {
        self.map(|c| c + offset)
    }

    /// Add a complex constant offset to every sample.
    pub fn offset_complex(&self, offset: Complex64) -> Waveform {
        self.map(|c| c + offset)
    }

    /// Elementwise reciprocal scaled by a constant: `v / x[i]`.
    ///
    /// Division by zero samples follows IEEE semantics (inf/nan); callers
    /// control domains to avoid it.
    pub fn recip_scaled(&self, v: f64) -> Waveform {
        self.map(|c| v / c)
    }

    /// Normalize so the largest channel excursion is 1.
    ///
    /// The normalization constant is the maximum of |re| and |im| over all
    /// samples, so both I and Q stay within [-1, 1]. An all-zero waveform is
    /// returned unchanged.
    pub fn normalized(&self) -> Waveform {
        let peak = self
            .samples
            .iter()
            .map(|c| c.re.abs().max(c.im.abs()))
            .fold(0.0, f64::max);
        if peak > 0.0 {
            self.scale(1.0 / peak)
        } else {
            self.clone()
        }
    }

    fn map<F>(&self, f: F) -> Waveform
    where
        F: Fn(Complex64) -> Complex64,
    {
        Waveform {
            samples: self.samples.iter().map(|&c| f(c)).collect(),
            sample_rate: self.sample_rate,
        }
    }

    // ------------------------------------------------------------------
    // Binary algebra
    // ------------------------------------------------------------------

    /// Elementwise sum. Requires equal sample rates; the shorter operand is
    /// zero-padded to the longer one's length.
    pub fn add(&self, other: &Waveform) -> WaveResult<Waveform> {
        self.zip_with(other, |a, b| a + b)
    }

    /// Elementwise difference.
    pub fn sub(&self, other: &Waveform) -> WaveResult<Waveform> {
        self.zip_with(other, |a, b| a - b)
    }

    /// Elementwise product.
    pub fn mul(&self, other: &Waveform) -> WaveResult<Waveform> {
        self.zip_with(other, |a, b| a * b)
    }

    /// Elementwise quotient. Division by zero-padded samples yields inf/nan
    /// per IEEE float semantics; no guard is applied.
    pub fn div(&self, other: &Waveform) -> WaveResult<Waveform> {
        self.zip_with(other, |a, b| a / b)
    }

    fn zip_with<F>(&self, other: &Waveform, f: F) -> WaveResult<Waveform>
    where
        F: Fn(Complex64, Complex64) -> Complex64,
    {
        check_rates(self, other)?;
        let len = self.len().max(other.len());
        let zero = Complex64::new(0.0, 0.0);
        let samples = (0..len)
            .map(|k| {
                let a = self.samples.get(k).copied().unwrap_or(zero);
                let b = other.samples.get(k).copied().unwrap_or(zero);
                f(a, b)
            })
            .collect();
        Ok(Waveform {
            samples,
            sample_rate: self.sample_rate,
        })
    }

    // ------------------------------------------------------------------
    // Time-structure operations
    // ------------------------------------------------------------------

    /// Shift the waveform in time, preserving its length.
    ///
    /// A positive `t` delays the signal: `round(|t| * rate)` zeros are
    /// inserted at the leading edge and the same count dropped from the tail.
    /// A negative `t` advances it, zero-filling the tail instead. Fails if
    /// `|t|` exceeds the waveform duration.
    pub fn shift_by(&self, t: f64) -> WaveResult<Waveform> {
        let duration = self.duration().0;
        if t.abs() > duration {
            return Err(WaveError::ShiftTooLarge {
                shift: t,
                duration,
            });
        }

        let n = (t.abs() * self.sample_rate).round() as usize;
        let keep = self.len() - n;
        let zero = Complex64::new(0.0, 0.0);

        let mut samples = Vec::with_capacity(self.len());
        if t > 0.0 {
            samples.extend(std::iter::repeat(zero).take(n));
            samples.extend_from_slice(&self.samples[..keep]);
        } else {
            samples.extend_from_slice(&self.samples[self.len() - keep..]);
            samples.extend(std::iter::repeat(zero).take(n));
        }

        Ok(Waveform {
            samples,
            sample_rate: self.sample_rate,
        })
    }

    /// Append another waveform in time. Requires equal sample rates.
    pub fn concat(&self, other: &Waveform) -> WaveResult<Waveform> {
        check_rates(self, other)?;
        let mut samples = Vec::with_capacity(self.len() + other.len());
        samples.extend_from_slice(&self.samples);
        samples.extend_from_slice(&other.samples);
        Ok(Waveform {
            samples,
            sample_rate: self.sample_rate,
        })
    }

    /// Concatenate `n` copies of the waveform.
    pub fn repeat(&self, n: usize) -> Waveform {
        let mut samples = Vec::with_capacity(self.len() * n);
        for _ in 0..n {
            samples.extend_from_slice(&self.samples);
        }
        Waveform {
            samples,
            sample_rate: self.sample_rate,
        }
    }

    /// Adjust to an exact sample count, anchored at the start.
    ///
    /// Pads with zeros at the tail when growing, truncates the tail when
    /// shrinking.
    pub fn set_size(&self, n: usize) -> Waveform {
        let mut samples = self.samples.clone();
        samples.resize(n, Complex64::new(0.0, 0.0));
        Waveform {
            samples,
            sample_rate: self.sample_rate,
        }
    }

    /// Adjust to a target duration in microseconds.
    ///
    /// The target sample count is `round(|length| * rate)`. A non-negative
    /// `length` anchors the waveform at its start (pad/truncate at the tail);
    /// a negative `length` anchors it at the end (pad/truncate at the head).
    /// This directional rule is what the arithmetic length reconciliation and
    /// gate-pulse timing rely on.
    pub fn set_length(&self, length: f64) -> Waveform {
        let n = (length.abs() * self.sample_rate).round() as usize;
        if length >= 0.0 {
            return self.set_size(n);
        }

        // Anchor at the end: grow/shrink at the head.
        let zero = Complex64::new(0.0, 0.0);
        let mut samples = Vec::with_capacity(n);
        if n > self.len() {
            samples.extend(std::iter::repeat(zero).take(n - self.len()));
            samples.extend_from_slice(&self.samples);
        } else {
            samples.extend_from_slice(&self.samples[self.len() - n..]);
        }
        Waveform {
            samples,
            sample_rate: self.sample_rate,
        }
    }

    // ------------------------------------------------------------------
    // Calculus and convolution
    // ------------------------------------------------------------------

    /// Discrete derivative: centered first difference scaled by the sample
    /// rate. One-sided differences at the edges; sample count is preserved.
    pub fn derivative(&self) -> Waveform {
        let n = self.len();
        if n < 2 {
            return Waveform {
                samples: vec![Complex64::new(0.0, 0.0); n],
                sample_rate: self.sample_rate,
            };
        }

        let r = self.sample_rate;
        let samples = (0..n)
            .map(|i| {
                if i == 0 {
                    (self.samples[1] - self.samples[0]) * r
                } else if i == n - 1 {
                    (self.samples[n - 1] - self.samples[n - 2]) * r
                } else {
                    (self.samples[i + 1] - self.samples[i - 1]) * (0.5 * r)
                }
            })
            .collect();
        Waveform {
            samples,
            sample_rate: self.sample_rate,
        }
    }

    /// Running integral: cumulative sum scaled by `1 / rate`. Sample count is
    /// preserved.
    pub fn integral(&self) -> Waveform {
        let dt = 1.0 / self.sample_rate;
        let mut acc = Complex64::new(0.0, 0.0);
        let samples = self
            .samples
            .iter()
            .map(|&c| {
                acc += c * dt;
                acc
            })
            .collect();
        Waveform {
            samples,
            sample_rate: self.sample_rate,
        }
    }

    /// Convolve with a kernel waveform. The kernel's sample rate is ignored;
    /// only its sample values matter.
    pub fn convolve(
        &self,
        kernel: &Waveform,
        mode: ConvolveMode,
        normalize: bool,
    ) -> WaveResult<Waveform> {
        self.convolve_with(&kernel.samples, mode, normalize)
    }

    /// Convolve with a plain kernel sequence.
    ///
    /// When `normalize` is true (the default for smoothing) the kernel is
    /// divided by its sum, so a smoothing convolution preserves overall
    /// amplitude.
    pub fn convolve_with(
        &self,
        kernel: &[Complex64],
        mode: ConvolveMode,
        normalize: bool,
    ) -> WaveResult<Waveform> {
        if kernel.is_empty() {
            return Err(WaveError::InvalidKernel("empty kernel".into()));
        }

        let kernel: Vec<Complex64> = if normalize {
            let sum: Complex64 = kernel.iter().sum();
            if sum.norm() == 0.0 {
                return Err(WaveError::InvalidKernel(
                    "kernel sums to zero, cannot normalize".into(),
                ));
            }
            kernel.iter().map(|&k| k / sum).collect()
        } else {
            kernel.to_vec()
        };

        let n = self.len();
        let m = kernel.len();
        if matches!(mode, ConvolveMode::Valid) && m > n {
            return Err(WaveError::InvalidKernel(format!(
                "kernel length {} exceeds signal length {} in valid mode",
                m, n
            )));
        }

        let full_len = n + m - 1;
        let mut full = vec![Complex64::new(0.0, 0.0); full_len];
        for (i, &x) in self.samples.iter().enumerate() {
            for (j, &k) in kernel.iter().enumerate() {
                full[i + j] += x * k;
            }
        }

        let samples = match mode {
            ConvolveMode::Full => full,
            ConvolveMode::Same => {
                let offset = (m - 1) / 2;
                full[offset..offset + n].to_vec()
            }
            ConvolveMode::Valid => full[m - 1..full_len - (m - 1)].to_vec(),
        };

        Ok(Waveform {
            samples,
            sample_rate: self.sample_rate,
        })
    }
}

#[inline]
fn check_rates(a: &Waveform, b: &Waveform) -> WaveResult<()> {
    if a.sample_rate != b.sample_rate {
        return Err(WaveError::RateMismatch {
            left: a.sample_rate,
            right: b.sample_rate,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn real(samples: &[f64], rate: f64) -> Waveform {
        Waveform::from_real(samples.to_vec(), rate)
    }

    #[test]
    fn test_waveform_basics() {
        let wf = real(&[0.0, 0.5, 1.0, 0.5, 0.0], 10.0);

        assert_eq!(wf.len(), 5);
        assert!((wf.duration().0 - 0.5).abs() < 1e-12);
        assert!(!wf.is_complex());
        assert!((wf.time_at(0) - 0.05).abs() < 1e-12);
    }

    #[test]
    fn test_from_fn_half_sample_tie() {
        // 0.25 us at 10 samples/us puts width * rate at 2.5: only the centers
        // 0.05 and 0.15 fall inside the span, so the count is 2, not 3.
        let w = Waveform::from_real_fn(|_| 1.0, (0.0, 0.25), 10.0);
        assert_eq!(w.len(), 2);
        assert!(w.samples.iter().all(|c| (c.re - 1.0).abs() < 1e-12));

        // Integer products are unaffected.
        let whole = Waveform::from_real_fn(|_| 1.0, (0.0, 0.3), 10.0);
        assert_eq!(whole.len(), 3);
    }

    #[test]
    fn test_add_pads_to_longer_operand() {
        let a = real(&[1.0, 2.0, 3.0], 10.0);
        let b = real(&[10.0], 10.0);

        let sum = a.add(&b).unwrap();
        assert_eq!(sum.len(), 3);
        assert!((sum.samples[0].re - 11.0).abs() < 1e-12);
        assert!((sum.samples[1].re - 2.0).abs() < 1e-12);

        // Commutative pointwise
        let sum2 = b.add(&a).unwrap();
        assert_eq!(sum, sum2);
    }

    #[test]
    fn test_rate_mismatch_rejected() {
        let a = real(&[1.0], 10.0);
        let b = real(&[1.0], 20.0);

        assert!(matches!(
            a.add(&b),
            Err(WaveError::RateMismatch { .. })
        ));
        assert!(matches!(
            a.concat(&b),
            Err(WaveError::RateMismatch { .. })
        ));
    }

    #[test]
    fn test_shift_round_trip() {
        let a = real(&[1.0, 2.0, 3.0, 4.0, 0.0, 0.0], 10.0);
        let shifted = a.shift_by(0.2).unwrap();

        assert_eq!(shifted.len(), a.len());
        assert!((shifted.samples[2].re - 1.0).abs() < 1e-12);

        // Round trip restores the samples the shift did not push off the end.
        let back = shifted.shift_by(-0.2).unwrap();
        for (orig, rec) in a.samples[..4].iter().zip(back.samples.iter()) {
            assert!((orig.re - rec.re).abs() < 1e-12);
        }
    }

    #[test]
    fn test_shift_too_large() {
        let a = real(&[1.0, 2.0], 10.0);
        assert!(matches!(
            a.shift_by(0.3),
            Err(WaveError::ShiftTooLarge { .. })
        ));
    }

    #[test]
    fn test_concat_additive_in_size() {
        let a = real(&[1.0, 2.0], 10.0);
        let b = real(&[3.0], 10.0);
        let c = real(&[4.0, 5.0], 10.0);

        let ab_c = a.concat(&b).unwrap().concat(&c).unwrap();
        let a_bc = a.concat(&b.concat(&c).unwrap()).unwrap();

        assert_eq!(ab_c.len(), 5);
        assert_eq!(ab_c, a_bc);
    }

    #[test]
    fn test_set_length_directional() {
        let a = real(&[1.0, 2.0, 3.0], 10.0);

        // Positive: anchor at start, pad tail.
        let grown = a.set_length(0.5);
        assert_eq!(grown.len(), 5);
        assert!((grown.samples[0].re - 1.0).abs() < 1e-12);
        assert!(grown.samples[4].norm() < 1e-12);

        // Negative: anchor at end, pad head.
        let grown_neg = a.set_length(-0.5);
        assert_eq!(grown_neg.len(), 5);
        assert!(grown_neg.samples[0].norm() < 1e-12);
        assert!((grown_neg.samples[4].re - 3.0).abs() < 1e-12);

        // Negative truncation keeps the tail.
        let cut = a.set_length(-0.2);
        assert_eq!(cut.len(), 2);
        assert!((cut.samples[0].re - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_convolve_modes() {
        let a = real(&[1.0, 2.0, 3.0, 4.0], 10.0);
        let k = real(&[1.0, 1.0], 10.0);

        let full = a.convolve(&k, ConvolveMode::Full, false).unwrap();
        assert_eq!(full.len(), 5);
        assert!((full.samples[1].re - 3.0).abs() < 1e-12);

        let same = a.convolve(&k, ConvolveMode::Same, false).unwrap();
        assert_eq!(same.len(), 4);

        let valid = a.convolve(&k, ConvolveMode::Valid, false).unwrap();
        assert_eq!(valid.len(), 3);
    }

    #[test]
    fn test_convolve_normalization_preserves_amplitude() {
        let a = real(&[2.0; 10], 10.0);
        let k = real(&[1.0, 2.0, 1.0], 10.0);

        let smoothed = a.convolve(&k, ConvolveMode::Same, true).unwrap();
        // Interior samples of a constant signal stay at the constant.
        assert!((smoothed.samples[5].re - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_derivative_and_integral() {
        // Linear ramp: derivative constant, integral quadratic.
        let rate = 100.0;
        let ramp = Waveform::from_real_fn(|t| t, (0.0, 1.0), rate);

        let d = ramp.derivative();
        assert_eq!(d.len(), ramp.len());
        assert!((d.samples[50].re - 1.0).abs() < 1e-9);

        let int = ramp.integral();
        assert_eq!(int.len(), ramp.len());
        // Integral of t over [0,1] approaches 0.5.
        assert!((int.samples[ramp.len() - 1].re - 0.5).abs() < 1e-2);
    }

    #[test]
    fn test_from_iq_and_channels() {
        let i = real(&[1.0, 2.0], 10.0);
        let q = real(&[3.0, 4.0, 5.0], 10.0);

        let iq = Waveform::from_iq(&i, &q).unwrap();
        assert_eq!(iq.len(), 3);
        assert!(iq.is_complex());
        assert!((iq.samples[0].im - 3.0).abs() < 1e-12);
        assert!((iq.samples[2].re).abs() < 1e-12);

        assert!(!iq.real_part().is_complex());
        assert!((iq.imag_part().samples[1].re - 4.0).abs() < 1e-12);
    }

    #[test]
    fn test_normalized_spans_both_channels() {
        let w = Waveform::new(
            vec![Complex64::new(0.5, -4.0), Complex64::new(2.0, 0.0)],
            10.0,
        );
        let n = w.normalized();
        assert!((n.samples[0].im + 1.0).abs() < 1e-12);
        assert!((n.samples[1].re - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_try_new_rejects_bad_rate() {
        assert!(Waveform::try_new(vec![], 0.0).is_err());
        assert!(Waveform::try_new(vec![], -5.0).is_err());
        assert!(Waveform::try_new(vec![], 100.0).is_ok());
    }
}
