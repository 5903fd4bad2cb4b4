//! Per-frame RMS energy computation.

use rayon::prelude::*;
use tracing::debug;

use kaiwa_models::EnergyTrace;

use crate::config::AnalysisConfig;
use crate::error::{AudioError, AudioResult};
use crate::signal::Signal;

/// Compute the per-frame RMS energy of a signal, in dB relative to the
/// loudest frame.
///
/// A window of `frame_length` samples slides across the signal with a
/// stride of `hop_length`; the final partial window is truncated, not
/// zero-padded, so its RMS covers only the samples actually present.
/// Frame i starts at sample `i * hop_length` and is stamped
/// `i * hop_length / sample_rate` seconds.
///
/// The loudest frame maps to 0 dB. A zero-RMS frame, or every frame of an
/// all-zero signal, maps to the configured floor, so the trace never
/// contains a non-finite value.
pub fn rms_trace(signal: &Signal, config: &AnalysisConfig) -> AudioResult<EnergyTrace> {
    config.validate()?;

    // A zero rate would stamp frames with non-finite times.
    if signal.sample_rate() == 0 {
        return Err(AudioError::invalid_signal("sample rate must be positive"));
    }
    if signal.is_empty() {
        return Ok(EnergyTrace::default());
    }

    let samples = signal.samples();
    let frame_length = config.frame_length;
    let hop_length = config.hop_length;
    let frame_count = samples.len().div_ceil(hop_length);

    // Per-frame RMS; frames are independent, so compute them in parallel.
    let rms: Vec<f64> = (0..frame_count)
        .into_par_iter()
        .map(|i| {
            let start = i * hop_length;
            let end = (start + frame_length).min(samples.len());
            let window = &samples[start..end];
            let sum_sq: f64 = window.iter().map(|&s| f64::from(s) * f64::from(s)).sum();
            (sum_sq / window.len() as f64).sqrt()
        })
        .collect();

    let peak = rms.iter().copied().fold(0.0, f64::max);

    let db: Vec<f64> = rms
        .iter()
        .map(|&value| {
            if value > 0.0 && peak > 0.0 {
                (20.0 * (value / peak).log10()).max(config.db_floor)
            } else {
                config.db_floor
            }
        })
        .collect();

    let sample_rate = f64::from(signal.sample_rate());
    let times: Vec<f64> = (0..frame_count)
        .map(|i| (i * hop_length) as f64 / sample_rate)
        .collect();

    debug!(
        frames = frame_count,
        peak_rms = peak,
        "Computed RMS energy trace"
    );

    Ok(EnergyTrace::new(times, db))
}
