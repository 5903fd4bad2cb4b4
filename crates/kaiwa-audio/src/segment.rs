//! Run-length segmentation of silent frames into intervals.
//!
//! The scanner walks the energy trace chronologically, merging maximal
//! runs of silent frames into candidate intervals. A candidate spans from
//! the first silent frame of the run to the first non-silent frame after
//! it; a run still open at the end of the trace closes at the trace's
//! final timestamp. Candidates shorter than the configured minimum are
//! discarded, never emitted.

use tracing::debug;

use kaiwa_models::{round2, EnergyTrace, SilenceCategory, SilenceInterval};

use crate::config::AnalysisConfig;
use crate::error::AudioResult;

/// Assign the length category for a silence duration.
///
/// Total over durations at or above the minimum filter; pure policy:
/// `[short_min, long_min)` is `1.5-2s`, `[long_min, ∞)` is `2s+`,
/// anything below `short_min` is `other`.
pub fn classify(duration_secs: f64, config: &AnalysisConfig) -> SilenceCategory {
    if duration_secs >= config.long_min_secs {
        SilenceCategory::Long
    } else if duration_secs >= config.short_min_secs {
        SilenceCategory::Short
    } else {
        SilenceCategory::Other
    }
}

/// Scanner state: either between silences or inside a run that started at
/// the recorded timestamp.
enum State {
    InSound,
    InSilence { start_secs: f64 },
}

/// Detect silence intervals in an energy trace.
///
/// A frame is silent iff its level is strictly below the threshold;
/// equality counts as sound. Returns intervals in chronological order,
/// categories already assigned.
pub fn detect_silences(
    trace: &EnergyTrace,
    config: &AnalysisConfig,
) -> AudioResult<Vec<SilenceInterval>> {
    config.validate()?;

    let mut intervals = Vec::new();
    let mut state = State::InSound;

    for (time, db) in trace.points() {
        let is_silent = db < config.db_threshold;

        match (&state, is_silent) {
            (State::InSound, true) => {
                state = State::InSilence { start_secs: time };
            }
            (State::InSilence { start_secs }, false) => {
                push_candidate(&mut intervals, *start_secs, time, config);
                state = State::InSound;
            }
            _ => {}
        }
    }

    // Trace ended inside a silent run: close at the final timestamp
    if let State::InSilence { start_secs } = state {
        if let Some(end) = trace.last_time() {
            push_candidate(&mut intervals, start_secs, end, config);
        }
    }

    debug!(
        frames = trace.len(),
        intervals = intervals.len(),
        db_threshold = config.db_threshold,
        "Silence segmentation complete"
    );

    Ok(intervals)
}

fn push_candidate(out: &mut Vec<SilenceInterval>, start: f64, end: f64, config: &AnalysisConfig) {
    let duration = end - start;
    if duration < config.min_silence_secs {
        return;
    }
    out.push(SilenceInterval {
        start: round2(start),
        end: round2(end),
        duration: round2(duration),
        category: classify(duration, config),
    });
}
