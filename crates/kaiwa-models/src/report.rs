//! Per-request analysis report.

use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use crate::energy::EnergyTrace;
use crate::silence::SilenceStats;
use crate::transcript::Transcript;

/// Unique identifier for one analysis request.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(transparent)]
pub struct ReportId(pub String);

impl ReportId {
    /// Generate a new random report ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Create from an existing string.
    pub fn from_string(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    /// Get the inner string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for ReportId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ReportId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Everything produced by one analysis run.
///
/// Built once per request and never mutated afterwards. The energy trace
/// and silence statistics come from the engine; transcript, memo and
/// speaker lines from the hosted collaborators.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct AnalysisReport {
    /// Unique request id.
    pub id: ReportId,
    /// When the analysis completed.
    pub created_at: DateTime<Utc>,
    /// Silence threshold used, dB relative to peak RMS.
    pub db_threshold: f64,
    /// Total recording length, seconds, rounded to two decimals.
    pub duration_secs: f64,
    /// Aggregate silence statistics.
    pub silence: SilenceStats,
    /// Per-frame RMS trace for waveform export.
    pub energy: EnergyTrace,
    /// Full transcription.
    pub transcript: Transcript,
    /// Generated analysis memo, absent when generation was not requested.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub memo: Option<String>,
    /// Speaker-attributed transcript lines; empty when diarization was
    /// disabled or skipped.
    #[serde(default)]
    pub speaker_lines: Vec<String>,
}
