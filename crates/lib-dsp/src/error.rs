//! Error types for DSP operations.

use lib_wave::WaveError;
use thiserror::Error;

/// Errors that can occur during DSP operations.
#[derive(Debug, Error)]
pub enum DspError {
    /// Requested configuration is infeasible (e.g. conflicting band edges).
    ///
    /// Filters are fail-fast: a design error surfaces at construction, never
    /// at `process`.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Insufficient data for operation.
    #[error("insufficient data: need at least {needed}, got {got}")]
    InsufficientData { needed: usize, got: usize },

    /// Requested frequency falls outside the representable band.
    #[error("frequency {freq} MHz outside Nyquist band of {nyquist} MHz")]
    OutOfBand { freq: f64, nyquist: f64 },

    /// Underlying waveform algebra error.
    #[error(transparent)]
    Wave(#[from] WaveError),
}

/// Result type for DSP operations.
pub type DspResult<T> = Result<T, DspError>;
