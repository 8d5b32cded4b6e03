//! Error types for waveform operations.

use thiserror::Error;

/// Errors that can occur when combining or reshaping waveforms.
#[derive(Debug, Error)]
pub enum WaveError {
    /// Binary operation between waveforms with different sample rates.
    ///
    /// Sample-rate mismatches are a usage error and are never silently
    /// resolved by resampling.
    #[error("sample rate mismatch: {left} vs {right} samples/us")]
    RateMismatch { left: f64, right: f64 },

    /// Requested time shift exceeds the waveform duration.
    #[error("shift of {shift} us exceeds waveform duration of {duration} us")]
    ShiftTooLarge { shift: f64, duration: f64 },

    /// Sample rate must be strictly positive.
    #[error("invalid sample rate: {0} samples/us")]
    InvalidSampleRate(f64),

    /// Convolution kernel longer than the signal in `valid` mode, or empty.
    #[error("invalid convolution kernel: {0}")]
    InvalidKernel(String),
}

/// Result type for waveform operations.
pub type WaveResult<T> = Result<T, WaveError>;
