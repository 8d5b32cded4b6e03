//! # lib-mixer
//!
//! Virtual IQ mixer layer over `lib-wave` and `lib-dsp`:
//!
//! - **Calibration records**: per-channel scale/offset/phase corrections with
//!   an RF trim, serializable for lab configs
//! - **Up-conversion**: calibrated modulation of a complex envelope onto a
//!   local-oscillator carrier, plus per-channel carrier loading
//! - **Analysis**: spectral calibration estimation, calibration application
//!   via time-shifted interpolants, homodyne demodulation and a lazy
//!   multi-tone readout pipeline

pub mod analysis;
pub mod calibration;
pub mod error;
pub mod mixer;

pub use analysis::{
    calibrate, demodulate, demodulate_all, demodulate_all_with, demodulate_tone,
    demodulate_tone_with, estimate_calibration, DemodulationPipeline, ReadoutSettings,
};
pub use calibration::{Calibration, ChannelCal, RfTrim};
pub use error::{MixerError, MixerResult};
pub use mixer::{carry_wave, up_convert, up_convert_trimmed};
