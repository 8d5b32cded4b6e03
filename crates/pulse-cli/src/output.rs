//! Waveform output formatting, writing and reading.

use anyhow::{Context, Result};
use lib_wave::{Complex64, Waveform};
use std::io::Write;
use std::path::Path;

/// Write a waveform as CSV with `time_us,i,q` columns.
pub fn write_waveform_csv(path: &Path, w: &Waveform) -> Result<()> {
    let mut f = std::fs::File::create(path)
        .with_context(|| format!("Failed to create output file: {:?}", path))?;

    writeln!(f, "time_us,i,q")?;
    for (t, c) in w.times().zip(w.samples.iter()) {
        writeln!(f, "{},{},{}", t, c.re, c.im)?;
    }

    tracing::info!("Wrote waveform to {:?} ({} samples)", path, w.len());
    Ok(())
}

/// Write a waveform as pretty-printed JSON.
pub fn write_waveform_json(path: &Path, w: &Waveform) -> Result<()> {
    let mut f = std::fs::File::create(path)
        .with_context(|| format!("Failed to create output file: {:?}", path))?;

    writeln!(f, "{}", serde_json::to_string_pretty(w)?)?;

    tracing::info!("Wrote waveform to {:?} ({} samples)", path, w.len());
    Ok(())
}

/// Write a spectral view as CSV with `freq_mhz,re,im` columns.
///
/// The spectrum waveform's `sample_rate` is the frequency-domain point
/// spacing's reciprocal, so bin `k` sits at `k / sample_rate` MHz.
pub fn write_spectrum_csv(path: &Path, s: &Waveform) -> Result<()> {
    let mut f = std::fs::File::create(path)
        .with_context(|| format!("Failed to create output file: {:?}", path))?;

    writeln!(f, "freq_mhz,re,im")?;
    let spacing = 1.0 / s.sample_rate;
    for (k, c) in s.samples.iter().enumerate() {
        writeln!(f, "{},{},{}", k as f64 * spacing, c.re, c.im)?;
    }

    tracing::info!("Wrote spectrum to {:?} ({} bins)", path, s.len());
    Ok(())
}

/// Read a waveform from a `time_us,i,q` CSV file.
///
/// The sample rate is recovered from the spacing of the first two time
/// stamps; at least two rows are required.
pub fn read_waveform_csv(path: &Path) -> Result<Waveform> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read waveform file: {:?}", path))?;

    let mut times = Vec::new();
    let mut samples = Vec::new();
    for (lineno, line) in content.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || (lineno == 0 && line.starts_with("time")) {
            continue;
        }

        let mut fields = line.split(',');
        let mut next = |name: &str| -> Result<f64> {
            fields
                .next()
                .ok_or_else(|| anyhow::anyhow!("line {}: missing {} column", lineno + 1, name))?
                .trim()
                .parse::<f64>()
                .with_context(|| format!("line {}: bad {} value", lineno + 1, name))
        };

        times.push(next("time")?);
        let i = next("i")?;
        let q = next("q")?;
        samples.push(Complex64::new(i, q));
    }

    if samples.len() < 2 {
        anyhow::bail!("waveform file needs at least two samples: {:?}", path);
    }

    let dt = times[1] - times[0];
    if dt <= 0.0 {
        anyhow::bail!("time stamps must be strictly increasing: {:?}", path);
    }

    Ok(Waveform::new(samples, 1.0 / dt))
}

/// Print a waveform summary to stdout.
pub fn print_waveform_summary(label: &str, w: &Waveform) {
    println!("{}:", label);
    println!("  Samples:     {}", w.len());
    println!("  Sample rate: {} /us", w.sample_rate);
    println!("  Duration:    {:.4} us", w.duration().0);
    println!("  Complex:     {}", if w.is_complex() { "yes" } else { "no" });

    let peak = w.samples.iter().map(|c| c.norm()).fold(0.0, f64::max);
    println!("  Peak |.|:    {:.6}", peak);
}

#[cfg(test)]
mod tests {
    use super::*;
    use lib_wave::generators::gaussian;

    #[test]
    fn test_csv_round_trip() {
        let dir = std::env::temp_dir();
        let path = dir.join("pulse_cli_csv_round_trip.csv");

        let w = gaussian(2.0, 100.0);
        write_waveform_csv(&path, &w).unwrap();
        let back = read_waveform_csv(&path).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(back.len(), w.len());
        assert!((back.sample_rate - w.sample_rate).abs() < 1e-6);
        for (a, b) in back.samples.iter().zip(w.samples.iter()) {
            assert!((a - b).norm() < 1e-9);
        }
    }

    #[test]
    fn test_spectrum_csv_bins() {
        let dir = std::env::temp_dir();
        let path = dir.join("pulse_cli_spectrum_bins.csv");

        // 200 samples at 100 /us give 0.5 MHz bin spacing.
        let w = gaussian(2.0, 100.0);
        let s = lib_dsp::spectrum(&w, lib_dsp::SpectrumMode::Amplitude).unwrap();
        write_spectrum_csv(&path, &s).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        std::fs::remove_file(&path).ok();

        let mut lines = content.lines();
        assert_eq!(lines.next().unwrap(), "freq_mhz,re,im");
        let first: Vec<&str> = lines.next().unwrap().split(',').collect();
        let second: Vec<&str> = lines.next().unwrap().split(',').collect();
        assert_eq!(first[0], "0");
        assert_eq!(second[0], "0.5");
        assert_eq!(content.lines().count(), s.len() + 1);
    }

    #[test]
    fn test_read_rejects_short_files() {
        let dir = std::env::temp_dir();
        let path = dir.join("pulse_cli_short.csv");
        std::fs::write(&path, "time_us,i,q\n0.005,1.0,0.0\n").unwrap();

        let result = read_waveform_csv(&path);
        std::fs::remove_file(&path).ok();
        assert!(result.is_err());
    }
}
