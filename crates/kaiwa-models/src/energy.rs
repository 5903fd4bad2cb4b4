//! Per-frame energy trace for waveform export and segmentation.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Per-frame RMS energy in decibels relative to the loudest frame.
///
/// Two parallel sequences of equal length: frame time offsets in seconds
/// (monotonically non-decreasing, hop-spaced) and energy levels in dB.
/// Levels are at most 0 (the loudest frame) and clamped to a finite floor,
/// so every value is finite.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct EnergyTrace {
    /// Frame time offsets, seconds.
    pub times: Vec<f64>,
    /// Frame energy levels, dB relative to peak RMS.
    pub db: Vec<f64>,
}

impl EnergyTrace {
    /// Build a trace from parallel time/level sequences.
    pub fn new(times: Vec<f64>, db: Vec<f64>) -> Self {
        debug_assert_eq!(times.len(), db.len());
        Self { times, db }
    }

    /// Number of frames.
    pub fn len(&self) -> usize {
        self.times.len()
    }

    /// True when the trace has no frames.
    pub fn is_empty(&self) -> bool {
        self.times.is_empty()
    }

    /// Timestamp of the final frame, if any.
    pub fn last_time(&self) -> Option<f64> {
        self.times.last().copied()
    }

    /// The trace as an x/y series for plotting.
    pub fn points(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.times.iter().copied().zip(self.db.iter().copied())
    }

    /// Flat records for spreadsheet export.
    pub fn rows(&self) -> Vec<WaveformRow> {
        self.points()
            .map(|(time_s, db)| WaveformRow { time_s, db })
            .collect()
    }
}

/// Flat export record for one waveform frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct WaveformRow {
    pub time_s: f64,
    pub db: f64,
}
