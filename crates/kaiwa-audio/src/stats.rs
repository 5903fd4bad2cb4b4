//! Aggregate statistics over classified silence intervals.

use tracing::debug;

use kaiwa_models::{round2, CategoryStats, SilenceCategory, SilenceInterval, SilenceStats};

use crate::config::AnalysisConfig;

/// Compute aggregate silence statistics.
///
/// Headline numbers cover the `1.5-2s` and `2s+` buckets; `other`
/// intervals stay visible in `all_silences` only. The longest-silences
/// ranking holds `2s+` intervals sorted by duration descending (stable,
/// so ties keep chronological order), truncated to the configured top-N.
///
/// Input intervals are expected in chronological order with non-negative
/// durations; a negative duration is a programming error upstream.
pub fn aggregate(intervals: &[SilenceInterval], config: &AnalysisConfig) -> SilenceStats {
    debug_assert!(
        intervals.iter().all(|e| e.duration >= 0.0),
        "negative interval duration"
    );

    let bucket = |category: SilenceCategory| -> CategoryStats {
        let matching = intervals.iter().filter(|e| e.category == category);
        let (count, total) = matching.fold((0usize, 0.0f64), |(n, sum), e| {
            (n + 1, sum + e.duration)
        });
        CategoryStats {
            count,
            total_time: round2(total),
        }
    };

    let short = bucket(SilenceCategory::Short);
    let long = bucket(SilenceCategory::Long);

    let mut longest: Vec<SilenceInterval> = intervals
        .iter()
        .filter(|e| e.category == SilenceCategory::Long)
        .cloned()
        .collect();
    // Stable sort: equal durations keep detection order
    longest.sort_by(|a, b| b.duration.total_cmp(&a.duration));
    longest.truncate(config.top_n);

    debug!(
        total = intervals.len(),
        short_count = short.count,
        long_count = long.count,
        "Aggregated silence statistics"
    );

    SilenceStats {
        total_silence_time: long.total_time,
        short,
        long,
        longest_silences: longest,
        all_silences: intervals.to_vec(),
    }
}
