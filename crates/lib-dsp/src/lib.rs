//! # lib-dsp
//!
//! Signal-processing layer over `lib-wave` waveforms:
//!
//! - **Spectrum**: normalized DFT views (two-sided, one-sided, single-bin
//!   readout) for carrier estimation
//! - **Interpolation**: linear and Catmull-Rom cubic reconstruction over
//!   sample centers
//! - **Resampling**: duration-preserving rate conversion
//! - **Filters**: composable [`Filter`] transformations, including zero-phase
//!   Butterworth IIR designs, Gaussian smoothing, noise injection and
//!   series/parallel combinators

pub mod error;
pub mod filter;
pub mod interpolation;
pub mod resample;
pub mod spectrum;

pub use error::{DspError, DspResult};
pub use filter::{DcBlocker, Filter, GaussianSmooth, IirFilter, Parallel, Series, WhiteNoise};
pub use interpolation::{value_at, value_at_real, InterpKind};
pub use resample::resample;
pub use spectrum::{half_spectrum, spectrum, spectrum_at, SpectrumMode};
