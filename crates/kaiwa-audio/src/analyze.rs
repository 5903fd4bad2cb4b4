//! Engine entry point: one decoded signal in, silence statistics out.

use tracing::debug;

use kaiwa_models::{EnergyTrace, SilenceStats};

use crate::config::AnalysisConfig;
use crate::energy::rms_trace;
use crate::error::AudioResult;
use crate::segment::detect_silences;
use crate::signal::{total_duration, Signal};
use crate::stats::aggregate;

/// Output of one full engine run over a signal.
#[derive(Debug, Clone, PartialEq)]
pub struct SilenceAnalysis {
    /// Total recording length, seconds, rounded to two decimals.
    pub duration_secs: f64,
    /// Per-frame RMS trace.
    pub energy: EnergyTrace,
    /// Aggregate silence statistics.
    pub stats: SilenceStats,
}

/// Run every engine stage over a decoded signal.
///
/// Synchronous and deterministic: the same signal and configuration always
/// produce the same analysis. Parameters are validated before any
/// computation starts.
pub fn analyze_signal(signal: &Signal, config: &AnalysisConfig) -> AudioResult<SilenceAnalysis> {
    config.validate()?;

    let duration_secs = total_duration(signal)?;
    let energy = rms_trace(signal, config)?;
    let intervals = detect_silences(&energy, config)?;
    let stats = aggregate(&intervals, config);

    debug!(
        duration_secs,
        frames = energy.len(),
        silences = stats.all_silences.len(),
        "Signal analysis complete"
    );

    Ok(SilenceAnalysis {
        duration_secs,
        energy,
        stats,
    })
}
