//! Pulse-Kernel CLI: waveform generation, IQ up-conversion and multi-tone
//! readout for quantum-lab pulse sequences.

mod config;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand};
use lib_dsp::{half_spectrum, spectrum, SpectrumMode};
use lib_mixer::{demodulate_all_with, up_convert, up_convert_trimmed, DemodulationPipeline};
use lib_wave::MegaHertz;
use std::path::PathBuf;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser)]
#[command(name = "pulse-kernel")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Output format for generated waveforms
    #[arg(short, long, default_value = "csv")]
    format: OutputFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, Debug, Default, clap::ValueEnum)]
enum OutputFormat {
    #[default]
    Csv,
    Json,
}

#[derive(Clone, Copy, Debug, Default, clap::ValueEnum)]
enum SpectrumModeArg {
    #[default]
    Amplitude,
    Complex,
    Phase,
    Real,
    Imag,
}

impl From<SpectrumModeArg> for SpectrumMode {
    fn from(arg: SpectrumModeArg) -> Self {
        match arg {
            SpectrumModeArg::Amplitude => SpectrumMode::Amplitude,
            SpectrumModeArg::Complex => SpectrumMode::Complex,
            SpectrumModeArg::Phase => SpectrumMode::PhaseDeg,
            SpectrumModeArg::Real => SpectrumMode::Real,
            SpectrumModeArg::Imag => SpectrumMode::Imag,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a closed-form pulse waveform
    Generate {
        /// Path to the pulse configuration file (JSON or TOML)
        #[arg(short, long)]
        spec: PathBuf,

        /// Output file path
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Up-convert an IQ envelope onto a local-oscillator carrier
    UpConvert {
        /// Path to the mixer configuration file
        #[arg(short, long)]
        config: PathBuf,

        /// Input IQ waveform (CSV: time_us,i,q)
        input: PathBuf,

        /// Output file path
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Compute the spectrum of a recorded waveform
    Spectrum {
        /// Input IQ waveform (CSV: time_us,i,q)
        input: PathBuf,

        /// Bin projection
        #[arg(short, long, default_value = "amplitude")]
        mode: SpectrumModeArg,

        /// Keep only the non-negative half of the band, doubled
        #[arg(long)]
        half: bool,

        /// Output file path (CSV: freq_mhz,re,im)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Demodulate a record at the configured readout frequencies
    Demodulate {
        /// Path to the analysis configuration file
        #[arg(short, long)]
        config: PathBuf,

        /// Input IQ record (CSV: time_us,i,q)
        input: PathBuf,

        /// Output directory for per-tone baseband waveforms
        #[arg(short, long, default_value = "output")]
        output: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)))
        .init();

    match cli.command {
        Commands::Generate { spec, output } => {
            run_generate(&spec, output, cli.format)?;
        }
        Commands::UpConvert {
            config,
            input,
            output,
        } => {
            run_up_convert(&config, &input, output, cli.format)?;
        }
        Commands::Spectrum {
            input,
            mode,
            half,
            output,
        } => {
            run_spectrum(&input, mode, half, output)?;
        }
        Commands::Demodulate {
            config,
            input,
            output,
        } => {
            run_demodulate(&config, &input, &output)?;
        }
    }

    Ok(())
}

fn write_waveform(
    path: &PathBuf,
    w: &lib_wave::Waveform,
    format: OutputFormat,
) -> Result<()> {
    match format {
        OutputFormat::Csv => output::write_waveform_csv(path, w),
        OutputFormat::Json => output::write_waveform_json(path, w),
    }
}

fn run_generate(spec_path: &PathBuf, out: Option<PathBuf>, format: OutputFormat) -> Result<()> {
    tracing::info!("Loading pulse spec from {:?}", spec_path);

    let spec: config::GenerateConfig = config::load_config(spec_path)?;
    config::validate_generate(&spec)?;

    let w = spec.to_waveform();
    let label = spec.name.as_deref().unwrap_or("Generated pulse");
    output::print_waveform_summary(label, &w);

    if let Some(path) = out {
        write_waveform(&path, &w, format)?;
        println!("  Written to:  {:?}", path);
    }

    Ok(())
}

fn run_up_convert(
    config_path: &PathBuf,
    input: &PathBuf,
    out: Option<PathBuf>,
    format: OutputFormat,
) -> Result<()> {
    tracing::info!("Loading mixer config from {:?}", config_path);

    let mixer: config::MixerConfig = config::load_config(config_path)?;
    config::validate_mixer(&mixer)?;

    let iq = output::read_waveform_csv(input)?;
    tracing::info!(
        "Up-converting {} samples at LO {} MHz",
        iq.len(),
        mixer.lo_mhz
    );

    let lo = MegaHertz(mixer.lo_mhz);
    let rf = match mixer.rf_trim {
        Some(trim) => up_convert_trimmed(lo, &iq, &mixer.calibration, &trim)?,
        None => up_convert(lo, &iq, &mixer.calibration)?,
    };

    output::print_waveform_summary("RF output", &rf);

    if let Some(path) = out {
        write_waveform(&path, &rf, format)?;
        println!("  Written to:  {:?}", path);
    }

    Ok(())
}

fn run_spectrum(
    input: &PathBuf,
    mode: SpectrumModeArg,
    half: bool,
    out: Option<PathBuf>,
) -> Result<()> {
    let w = output::read_waveform_csv(input)?;
    tracing::info!("Computing spectrum of {} samples", w.len());

    let s = if half {
        half_spectrum(&w, mode.into())?
    } else {
        spectrum(&w, mode.into())?
    };

    let spacing = 1.0 / s.sample_rate;
    let (peak_bin, peak_mag) = s
        .samples
        .iter()
        .enumerate()
        .fold((0, 0.0), |(bk, bm), (k, c)| {
            if c.norm() > bm {
                (k, c.norm())
            } else {
                (bk, bm)
            }
        });

    println!("Spectrum:");
    println!("  Bins:        {}", s.len());
    println!("  Spacing:     {} MHz", spacing);
    println!(
        "  Peak bin:    {} ({} MHz, |.| = {:.6})",
        peak_bin,
        peak_bin as f64 * spacing,
        peak_mag
    );

    if let Some(path) = out {
        output::write_spectrum_csv(&path, &s)?;
        println!("  Written to:  {:?}", path);
    }

    Ok(())
}

fn run_demodulate(config_path: &PathBuf, input: &PathBuf, out_dir: &PathBuf) -> Result<()> {
    tracing::info!("Loading analysis config from {:?}", config_path);

    let analysis: config::AnalysisConfig = config::load_config(config_path)?;
    config::validate_analysis(&analysis)?;

    let record = output::read_waveform_csv(input)?;
    let freqs: Vec<MegaHertz> = analysis.freqs_mhz.iter().map(|&f| MegaHertz(f)).collect();

    tracing::info!(
        "Demodulating {} samples at {} readout tones",
        record.len(),
        freqs.len()
    );

    let basebands = if analysis.parallel {
        demodulate_all_with(&record, &freqs, &analysis.readout)?
    } else {
        DemodulationPipeline::with_settings(record, freqs.clone(), analysis.readout)
            .collect::<Result<Vec<_>, _>>()?
    };

    std::fs::create_dir_all(out_dir)?;
    for (freq, baseband) in freqs.iter().zip(basebands.iter()) {
        let path = out_dir.join(format!("baseband_{}mhz.csv", freq.0));
        output::write_waveform_csv(&path, baseband)?;
        output::print_waveform_summary(&format!("Tone {} MHz", freq.0), baseband);
    }

    println!("\nResults written to {:?}", out_dir);
    Ok(())
}
