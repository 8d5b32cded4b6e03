//! Error types for mixer and calibration operations.

use lib_dsp::DspError;
use lib_wave::WaveError;
use thiserror::Error;

/// Errors that can occur during mixing, calibration and demodulation.
#[derive(Debug, Error)]
pub enum MixerError {
    /// The reference carrier is absent (or numerically negligible) in the
    /// record, so no calibration can be estimated against it.
    #[error("no usable carrier at {freq} MHz in calibration record")]
    WeakCarrier { freq: f64 },

    /// Underlying waveform algebra error.
    #[error(transparent)]
    Wave(#[from] WaveError),

    /// Underlying DSP error.
    #[error(transparent)]
    Dsp(#[from] DspError),
}

/// Result type for mixer operations.
pub type MixerResult<T> = Result<T, MixerError>;
