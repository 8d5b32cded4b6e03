//! # lib-wave
//!
//! Core waveform types for Pulse-Kernel quantum-control pulse generation.
//!
//! This crate provides the foundational value type used throughout the
//! Pulse-Kernel workspace:
//! - Lab units with compile-time safety (microseconds / MHz)
//! - The `Waveform` sampled-signal type and its algebra
//! - Closed-form pulse generators (Gaussian, DC, carriers, DRAG)

pub mod error;
pub mod generators;
pub mod units;
pub mod waveform;

pub use error::{WaveError, WaveResult};
pub use units::*;
pub use waveform::{ConvolveMode, Waveform};

/// Re-export num_complex for convenience
pub use num_complex::Complex64;
