//! Closed-form pulse generators.
//!
//! Each generator samples a time-domain formula over an explicit finite
//! domain at sample centers (see [`Waveform::from_fn`]), zeroing everything
//! outside the domain. Widths and rates follow the lab convention:
//! microseconds and samples per microsecond.
//!
//! Carrier generators (`sine`, `cosine`, `complex_exp`) take an *angular*
//! frequency `omega` in radians per microsecond, matching the algebra used
//! by the IQ mixer: a 50 MHz carrier is `sine(MegaHertz(50.0).angular(), ...)`.

use crate::waveform::Waveform;
use num_complex::Complex64;

/// Zero waveform of the given width. Width may be zero.
pub fn blank(width: f64, sample_rate: f64) -> Waveform {
    Waveform::from_real_fn(|_| 0.0, (0.0, width), sample_rate)
}

/// Square pulse of unit height over `[0, width]`.
pub fn dc(width: f64, sample_rate: f64) -> Waveform {
    Waveform::from_real_fn(|_| 1.0, (0.0, width), sample_rate)
}

/// Phase-rotated square pulse: `exp(i * phase)` over `[0, width]`.
///
/// With `phase == 0` this reduces to [`dc`]; any other phase produces a
/// complex waveform.
pub fn dc_phased(width: f64, sample_rate: f64, phase: f64) -> Waveform {
    let value = Complex64::from_polar(1.0, phase);
    Waveform::from_fn(|_| value, (0.0, width), sample_rate)
}

/// Gaussian envelope parameterized by full width.
///
/// The underlying standard deviation is `width / (4 * sqrt(2 * ln 2))`, i.e.
/// the envelope reaches half maximum at a quarter of the width from the
/// center (FWHM convention). Gate-pulse timing depends on this exact
/// parameterization.
pub fn gaussian(width: f64, sample_rate: f64) -> Waveform {
    let c = width / (4.0 * (2.0 * std::f64::consts::LN_2).sqrt());
    Waveform::from_real_fn(
        |x| (-0.5 * (x / c) * (x / c)).exp(),
        (-0.5 * width, 0.5 * width),
        sample_rate,
    )
}

/// Raised-cosine pulse: `(cos(2*pi*x/width) + 1) / 2` over the centered
/// domain, unit peak.
pub fn cos_pulse(width: f64, sample_rate: f64) -> Waveform {
    let tau = 2.0 * std::f64::consts::PI;
    Waveform::from_real_fn(
        |x| ((tau / width * x).cos() + 1.0) / 2.0,
        (-0.5 * width, 0.5 * width),
        sample_rate,
    )
}

/// Sine carrier `sin(omega * t + phi)` over `[0, width]`.
pub fn sine(omega: f64, phi: f64, width: f64, sample_rate: f64) -> Waveform {
    Waveform::from_real_fn(|t| (omega * t + phi).sin(), (0.0, width), sample_rate)
}

/// Cosine carrier `cos(omega * t + phi)` over `[0, width]`.
pub fn cosine(omega: f64, phi: f64, width: f64, sample_rate: f64) -> Waveform {
    Waveform::from_real_fn(|t| (omega * t + phi).cos(), (0.0, width), sample_rate)
}

/// Complex exponential carrier `exp(i * (omega * t + phi))` over `[0, width]`.
///
/// Used with a negative `omega` as the homodyne demodulation carrier.
pub fn complex_exp(omega: f64, phi: f64, width: f64, sample_rate: f64) -> Waveform {
    Waveform::from_fn(
        |t| Complex64::from_polar(1.0, omega * t + phi),
        (0.0, width),
        sample_rate,
    )
}

/// DRAG pulse from a Gaussian envelope.
///
/// The in-phase channel is a Gaussian of the given width; the quadrature
/// channel is `alpha` times its derivative, suppressing leakage to higher
/// levels during fast gates.
pub fn drag(width: f64, sample_rate: f64, alpha: f64) -> Waveform {
    drag_from(&gaussian(width, sample_rate), alpha)
}

/// DRAG composition of an arbitrary real envelope:
/// `Q = alpha * derivative(I)`.
pub fn drag_from(envelope: &Waveform, alpha: f64) -> Waveform {
    let q = envelope.derivative().scale(alpha);
    // Same rate by construction, equal lengths: cannot fail.
    Waveform::from_iq(envelope, &q).expect("envelope and derivative share a sample rate")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gaussian_shape() {
        let g = gaussian(20.0, 100.0);

        assert_eq!(g.len(), 2000);
        assert!(g.samples.iter().all(|c| c.re > 0.0));
        assert!(!g.is_complex());

        // Peak at the domain center, approximately unity.
        let peak = g.samples.iter().map(|c| c.re).fold(0.0, f64::max);
        assert!((peak - 1.0).abs() < 1e-4);
        let center = g.samples[999].re.max(g.samples[1000].re);
        assert!((center - peak).abs() < 1e-12);
    }

    #[test]
    fn test_gaussian_fwhm() {
        // Half maximum at +/- width/4 from center.
        let width = 8.0;
        let rate = 1000.0;
        let g = gaussian(width, rate);

        let center = g.len() / 2;
        let quarter = (width / 4.0 * rate) as usize;
        let half_max = g.samples[center + quarter].re;
        assert!((half_max - 0.5).abs() < 1e-3);
    }

    #[test]
    fn test_dc_scaling() {
        let w = dc(10.0, 100.0).scale(2.0);

        assert_eq!(w.len(), 1000);
        assert!(w.samples.iter().all(|c| (c.re - 2.0).abs() < 1e-12));
    }

    #[test]
    fn test_dc_phased_is_complex() {
        let w = dc_phased(1.0, 100.0, std::f64::consts::FRAC_PI_2);
        assert!(w.is_complex());
        assert!(w.samples.iter().all(|c| (c.im - 1.0).abs() < 1e-12));

        let real = dc_phased(1.0, 100.0, 0.0);
        assert!(!real.is_complex());
    }

    #[test]
    fn test_blank_is_zero() {
        let w = blank(2.0, 50.0);
        assert_eq!(w.len(), 100);
        assert!(w.samples.iter().all(|c| c.norm() == 0.0));
    }

    #[test]
    fn test_cos_pulse_edges_vanish() {
        let w = cos_pulse(10.0, 100.0);
        assert_eq!(w.len(), 1000);
        // Edges near zero, center near one.
        assert!(w.samples[0].re < 1e-3);
        assert!(w.samples[500].re > 0.999);
    }

    #[test]
    fn test_complex_exp_unit_magnitude() {
        let w = complex_exp(2.0 * std::f64::consts::PI * 5.0, 0.0, 1.0, 100.0);
        assert_eq!(w.len(), 100);
        assert!(w.samples.iter().all(|c| (c.norm() - 1.0).abs() < 1e-12));
    }

    #[test]
    fn test_sine_cosine_quadrature() {
        let omega = 2.0 * std::f64::consts::PI * 10.0;
        let s = sine(omega, 0.0, 1.0, 1000.0);
        let c = cosine(omega, -std::f64::consts::FRAC_PI_2, 1.0, 1000.0);

        // cos(x - pi/2) == sin(x)
        for (a, b) in s.samples.iter().zip(c.samples.iter()) {
            assert!((a.re - b.re).abs() < 1e-12);
        }
    }

    #[test]
    fn test_drag_quadrature_channel() {
        let d = drag(2.0, 1000.0, 0.5);
        assert!(d.is_complex());

        let i = d.real_part();
        let q = d.imag_part();
        let expected = i.derivative().scale(0.5);
        for (a, b) in q.samples.iter().zip(expected.samples.iter()) {
            assert!((a.re - b.re).abs() < 1e-9);
        }
    }
}
