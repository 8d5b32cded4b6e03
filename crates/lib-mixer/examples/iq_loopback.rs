//! IQ loopback calibration example.
//!
//! This example demonstrates:
//! 1. Up-converting a Gaussian envelope through an impaired virtual mixer
//! 2. Estimating the mixer calibration from a reference carrier record
//! 3. Demodulating the corrected record back to baseband

use lib_mixer::{demodulate_tone, estimate_calibration, up_convert, Calibration, ChannelCal};
use lib_wave::generators::{cosine, drag, sine};
use lib_wave::{MegaHertz, Waveform};

fn main() -> anyhow::Result<()> {
    let lo = MegaHertz(50.0);
    let rate = 1000.0;

    println!("=== Pulse-Kernel IQ Loopback Example ===\n");

    // A mixer with channel impairments, as measured in the lab.
    let impaired = Calibration {
        i: ChannelCal::identity(),
        q: ChannelCal::from_degrees(1.15, -0.03, 7.5),
    };

    // Up-convert a DRAG envelope through the impaired mixer.
    let envelope = drag(2.0, rate, 0.4);
    let rf = up_convert(lo, &envelope, &impaired)?;
    println!(
        "RF trace: {} samples over {:.2} us",
        rf.len(),
        rf.duration().0
    );

    // Reference record of the impaired carrier: ideal form is exp(i*w*t).
    let w = lo.angular();
    let record = Waveform::from_iq(
        &cosine(w, 0.0, 4.0, rate),
        &sine(w, 7.5f64.to_radians(), 4.0, rate).scale(1.15).offset(-0.03),
    )?;

    let cal = estimate_calibration(&record, lo)?;
    println!("\nEstimated calibration:");
    println!("  I offset: {:+.4}", cal.i.offset);
    println!("  Q offset: {:+.4}", cal.q.offset);
    println!("  Q scale:  {:.4}", cal.q.scale);
    println!("  Q phase:  {:+.2} deg", cal.q.phase.to_degrees());

    // Full readout chain on the record.
    let baseband = demodulate_tone(&record, lo)?;
    let mid = baseband.samples[baseband.len() / 2];
    println!(
        "\nBaseband midpoint: {:.4} {:+.4}i (|.| = {:.4})",
        mid.re,
        mid.im,
        mid.norm()
    );

    Ok(())
}
