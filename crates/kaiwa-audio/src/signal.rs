//! Decoded audio signal.

use kaiwa_models::round2;

use crate::error::{AudioError, AudioResult};

/// A decoded mono sample sequence plus its sample rate.
///
/// Immutable once loaded; every engine stage reads the same signal.
#[derive(Debug, Clone, PartialEq)]
pub struct Signal {
    samples: Vec<f32>,
    sample_rate: u32,
}

impl Signal {
    /// Wrap decoded samples. The rate may be zero here; duration and
    /// framing computations reject it when they run.
    pub fn new(samples: Vec<f32>, sample_rate: u32) -> Self {
        Self {
            samples,
            sample_rate,
        }
    }

    /// The mono samples, nominally in [-1, 1].
    pub fn samples(&self) -> &[f32] {
        &self.samples
    }

    /// Samples per second.
    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// Number of samples.
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// True when the signal holds no samples.
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }
}

/// Total recording length in seconds, rounded to two decimals.
pub fn total_duration(signal: &Signal) -> AudioResult<f64> {
    if signal.sample_rate() == 0 {
        return Err(AudioError::invalid_signal("sample rate must be positive"));
    }
    Ok(round2(
        signal.len() as f64 / f64::from(signal.sample_rate()),
    ))
}
