//! Configuration for silence analysis.
//!
//! One immutable value carries every tunable of the engine, so analyses
//! with different thresholds can run side by side without shared state.

use serde::{Deserialize, Serialize};

use crate::error::{AudioError, AudioResult};

/// Threshold choices offered to callers, dB relative to peak RMS.
pub const DB_THRESHOLD_OPTIONS: [f64; 2] = [-35.0, -40.0];

/// Configuration for the silence-detection engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisConfig {
    /// Samples per RMS analysis window.
    pub frame_length: usize,

    /// Stride between consecutive windows, in samples.
    pub hop_length: usize,

    /// Frames strictly below this level count as silent (dB re peak RMS).
    ///
    /// A frame exactly at the threshold is not silent.
    pub db_threshold: f64,

    /// Candidate silences shorter than this are discarded, seconds.
    pub min_silence_secs: f64,

    /// Lower bound of the `1.5-2s` category, inclusive.
    pub short_min_secs: f64,

    /// Lower bound of the `2s+` category, inclusive. Also the exclusive
    /// upper bound of `1.5-2s`.
    pub long_min_secs: f64,

    /// Floor applied to dB values so zero-RMS frames stay finite.
    pub db_floor: f64,

    /// Maximum entries in the longest-silences ranking.
    pub top_n: usize,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            frame_length: 2048,
            hop_length: 512,
            db_threshold: DB_THRESHOLD_OPTIONS[0],
            min_silence_secs: 0.5,
            short_min_secs: 1.5,
            long_min_secs: 2.0,
            db_floor: -120.0,
            top_n: 10,
        }
    }
}

impl AnalysisConfig {
    /// Builder-style setter for the silence threshold.
    pub fn with_db_threshold(mut self, db: f64) -> Self {
        self.db_threshold = db;
        self
    }

    /// Builder-style setter for the minimum silence duration.
    pub fn with_min_silence_secs(mut self, secs: f64) -> Self {
        self.min_silence_secs = secs;
        self
    }

    /// Builder-style setter for window and hop sizes.
    pub fn with_framing(mut self, frame_length: usize, hop_length: usize) -> Self {
        self.frame_length = frame_length;
        self.hop_length = hop_length;
        self
    }

    /// Reject nonsensical parameters before any computation starts.
    pub fn validate(&self) -> AudioResult<()> {
        if self.frame_length == 0 {
            return Err(AudioError::invalid_config("frame_length must be positive"));
        }
        if self.hop_length == 0 {
            return Err(AudioError::invalid_config("hop_length must be positive"));
        }
        if !self.db_threshold.is_finite() {
            return Err(AudioError::invalid_config("db_threshold must be finite"));
        }
        if !self.db_floor.is_finite() || self.db_floor >= 0.0 {
            return Err(AudioError::invalid_config(
                "db_floor must be finite and negative",
            ));
        }
        if self.min_silence_secs < 0.0 || !self.min_silence_secs.is_finite() {
            return Err(AudioError::invalid_config(
                "min_silence_secs must be non-negative",
            ));
        }
        if !(0.0 < self.short_min_secs && self.short_min_secs < self.long_min_secs) {
            return Err(AudioError::invalid_config(
                "category bounds must satisfy 0 < short_min_secs < long_min_secs",
            ));
        }
        Ok(())
    }
}
