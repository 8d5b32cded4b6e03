//! Configuration loading and validation.

use anyhow::{Context, Result};
use lib_mixer::{Calibration, ReadoutSettings, RfTrim};
use lib_wave::generators;
use lib_wave::{MegaHertz, Waveform};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Pulse generation configuration.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GenerateConfig {
    /// Optional label carried into output file names.
    #[serde(default)]
    pub name: Option<String>,

    /// Sample rate, samples per microsecond.
    pub sample_rate: f64,

    /// Pulse shape and parameters.
    pub pulse: PulseSpec,
}

/// Closed-form pulse selection.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(tag = "shape", rename_all = "snake_case")]
pub enum PulseSpec {
    /// Zero waveform.
    Blank { width: f64 },

    /// Constant pulse, optionally phase-rotated into the complex plane.
    Dc {
        width: f64,
        #[serde(default)]
        phase_deg: f64,
    },

    /// Gaussian envelope (FWHM width convention).
    Gaussian { width: f64 },

    /// Raised-cosine pulse.
    CosPulse { width: f64 },

    /// Sine carrier.
    Sine {
        freq_mhz: f64,
        #[serde(default)]
        phase_deg: f64,
        width: f64,
    },

    /// Gaussian DRAG pair: Q = alpha * d/dt(I).
    Drag { width: f64, alpha: f64 },
}

impl PulseSpec {
    fn width(&self) -> f64 {
        match *self {
            PulseSpec::Blank { width }
            | PulseSpec::Dc { width, .. }
            | PulseSpec::Gaussian { width }
            | PulseSpec::CosPulse { width }
            | PulseSpec::Sine { width, .. }
            | PulseSpec::Drag { width, .. } => width,
        }
    }
}

impl GenerateConfig {
    /// Build the configured waveform.
    pub fn to_waveform(&self) -> Waveform {
        let rate = self.sample_rate;
        match self.pulse {
            PulseSpec::Blank { width } => generators::blank(width, rate),
            PulseSpec::Dc { width, phase_deg } => {
                if phase_deg == 0.0 {
                    generators::dc(width, rate)
                } else {
                    generators::dc_phased(width, rate, phase_deg.to_radians())
                }
            }
            PulseSpec::Gaussian { width } => generators::gaussian(width, rate),
            PulseSpec::CosPulse { width } => generators::cos_pulse(width, rate),
            PulseSpec::Sine {
                freq_mhz,
                phase_deg,
                width,
            } => generators::sine(
                MegaHertz(freq_mhz).angular(),
                phase_deg.to_radians(),
                width,
                rate,
            ),
            PulseSpec::Drag { width, alpha } => generators::drag(width, rate, alpha),
        }
    }
}

/// Mixer up-conversion configuration.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct MixerConfig {
    /// Local-oscillator frequency, MHz.
    pub lo_mhz: f64,

    /// Channel calibration; identity when omitted.
    #[serde(default)]
    pub calibration: Calibration,

    /// Final RF linear rescale.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rf_trim: Option<RfTrim>,
}

/// Multi-tone readout configuration.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AnalysisConfig {
    /// Readout frequencies, MHz.
    pub freqs_mhz: Vec<f64>,

    /// Demodulate all tones in parallel instead of lazily in order.
    #[serde(default)]
    pub parallel: bool,

    /// Band-pass and smoothing stages of the readout chain.
    #[serde(default)]
    pub readout: ReadoutSettings,
}

/// Load a configuration file, dispatching on extension (JSON or TOML).
pub fn load_config<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {:?}", path))?;

    let config = if path.extension().map_or(false, |e| e == "json") {
        serde_json::from_str(&content)?
    } else {
        toml::from_str(&content).with_context(|| "Failed to parse config as TOML")?
    };

    Ok(config)
}

/// Validate a generation configuration.
pub fn validate_generate(config: &GenerateConfig) -> Result<()> {
    if config.sample_rate <= 0.0 || !config.sample_rate.is_finite() {
        anyhow::bail!("sample_rate must be positive, got {}", config.sample_rate);
    }
    if config.pulse.width() < 0.0 {
        anyhow::bail!(
            "pulse width must be non-negative, got {}",
            config.pulse.width()
        );
    }
    Ok(())
}

/// Validate a mixer configuration.
pub fn validate_mixer(config: &MixerConfig) -> Result<()> {
    if config.lo_mhz <= 0.0 || !config.lo_mhz.is_finite() {
        anyhow::bail!("lo_mhz must be positive, got {}", config.lo_mhz);
    }
    if config.calibration.i.scale == 0.0 || config.calibration.q.scale == 0.0 {
        anyhow::bail!("calibration channel scales must be nonzero");
    }
    Ok(())
}

/// Validate an analysis configuration.
pub fn validate_analysis(config: &AnalysisConfig) -> Result<()> {
    if config.freqs_mhz.is_empty() {
        anyhow::bail!("freqs_mhz must list at least one readout frequency");
    }
    for &f in &config.freqs_mhz {
        if f <= 0.0 || !f.is_finite() {
            anyhow::bail!("readout frequencies must be positive, got {}", f);
        }
    }
    let r = &config.readout;
    if r.band_order == 0 {
        anyhow::bail!("readout.band_order must be at least 1");
    }
    if r.band_fraction <= 0.0 || r.band_fraction >= 1.0 || !r.band_fraction.is_finite() {
        anyhow::bail!(
            "readout.band_fraction must lie in (0, 1), got {}",
            r.band_fraction
        );
    }
    if r.smooth_half_width == 0 {
        anyhow::bail!("readout.smooth_half_width must be at least 1 sample");
    }
    if r.smooth_spread <= 0.0 || !r.smooth_spread.is_finite() {
        anyhow::bail!(
            "readout.smooth_spread must be positive, got {}",
            r.smooth_spread
        );
    }
    Ok(())
}
