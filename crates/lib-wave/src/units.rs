//! Lab time and frequency quantities.
//!
//! Pulse timing lives in microseconds and carriers in MHz; the two are
//! reciprocal, so a bare `f64` invites silent unit bugs at every seam.
//! [`Micros`] and [`MegaHertz`] keep the two apart in signatures and offer
//! the conversions that actually occur in practice (reciprocals, angular
//! frequency, degree wrapping at the calibration boundary).
//!
//! Under this convention a `Waveform` sample rate of 1000 means 1000 samples
//! per microsecond, and a `MegaHertz(50.0)` carrier completes 50 cycles per
//! microsecond.

use serde::{Deserialize, Serialize};
use std::ops::{Add, Div, Mul, Sub};

/// Time duration in microseconds.
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
pub struct Micros(pub f64);

impl Micros {
    pub const ZERO: Self = Self(0.0);

    #[inline]
    pub fn from_ns(ns: f64) -> Self {
        Self(ns * 1e-3)
    }

    #[inline]
    pub fn from_ms(ms: f64) -> Self {
        Self(ms * 1e3)
    }

    #[inline]
    pub fn as_ns(&self) -> f64 {
        self.0 * 1e3
    }

    /// Convert to frequency (reciprocal).
    #[inline]
    pub fn to_frequency(&self) -> MegaHertz {
        MegaHertz(1.0 / self.0)
    }
}

impl Add for Micros {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        Self(self.0 + rhs.0)
    }
}

impl Sub for Micros {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self {
        Self(self.0 - rhs.0)
    }
}

impl Mul<f64> for Micros {
    type Output = Self;
    fn mul(self, rhs: f64) -> Self {
        Self(self.0 * rhs)
    }
}

impl Div<f64> for Micros {
    type Output = Self;
    fn div(self, rhs: f64) -> Self {
        Self(self.0 / rhs)
    }
}

impl Div<Micros> for Micros {
    type Output = f64;
    fn div(self, rhs: Micros) -> f64 {
        self.0 / rhs.0
    }
}

/// Frequency in MHz (cycles per microsecond).
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
pub struct MegaHertz(pub f64);

impl MegaHertz {
    pub const ZERO: Self = Self(0.0);

    #[inline]
    pub fn from_khz(khz: f64) -> Self {
        Self(khz * 1e-3)
    }

    #[inline]
    pub fn from_ghz(ghz: f64) -> Self {
        Self(ghz * 1e3)
    }

    #[inline]
    pub fn as_ghz(&self) -> f64 {
        self.0 * 1e-3
    }

    /// Convert to period (reciprocal).
    #[inline]
    pub fn to_period(&self) -> Micros {
        Micros(1.0 / self.0)
    }

    /// Angular frequency (omega = 2 * pi * f), in radians per microsecond.
    #[inline]
    pub fn angular(&self) -> f64 {
        2.0 * std::f64::consts::PI * self.0
    }
}

impl Add for MegaHertz {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        Self(self.0 + rhs.0)
    }
}

impl Sub for MegaHertz {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self {
        Self(self.0 - rhs.0)
    }
}

impl Mul<f64> for MegaHertz {
    type Output = Self;
    fn mul(self, rhs: f64) -> Self {
        Self(self.0 * rhs)
    }
}

impl Div<f64> for MegaHertz {
    type Output = Self;
    fn div(self, rhs: f64) -> Self {
        Self(self.0 / rhs)
    }
}

/// Wrap a phase in degrees into the half-open interval (-180, 180].
///
/// Used at the calibration boundary, where phase corrections are configured
/// in degrees.
#[inline]
pub fn wrap_degrees(deg: f64) -> f64 {
    let wrapped = (deg + 540.0).rem_euclid(360.0) - 180.0;
    // rem_euclid maps exact multiples onto -180; the convention is +180.
    if wrapped == -180.0 {
        180.0
    } else {
        wrapped
    }
}
