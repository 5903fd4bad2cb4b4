//! Silence interval and statistics models.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Length category of a detected silence.
///
/// Serialized names match the report keys consumed downstream
/// (`1.5-2s`, `2s+`, `other`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
pub enum SilenceCategory {
    /// 1.5s (inclusive) up to 2.0s (exclusive).
    #[serde(rename = "1.5-2s")]
    Short,
    /// 2.0s and above.
    #[serde(rename = "2s+")]
    Long,
    /// Above the minimum-duration filter but below 1.5s.
    ///
    /// Tracked in the full interval list, excluded from headline
    /// aggregates. That exclusion is a product decision, not an oversight.
    #[serde(rename = "other")]
    Other,
}

/// A contiguous stretch of audio below the silence threshold.
///
/// Bounds and duration are rounded to two decimal places at construction;
/// the minimum-duration filter and the category are decided on the
/// unrounded duration. Intervals never overlap and are always at least as
/// long as the configured minimum.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct SilenceInterval {
    /// Start offset in seconds.
    pub start: f64,
    /// End offset in seconds, greater than `start`.
    pub end: f64,
    /// `end - start`, in seconds.
    pub duration: f64,
    /// Length category.
    pub category: SilenceCategory,
}

/// Count and cumulative time for one category bucket.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct CategoryStats {
    /// Number of intervals in the bucket.
    pub count: usize,
    /// Sum of their durations, seconds, rounded to two decimals.
    pub total_time: f64,
}

/// Aggregate silence statistics for one recording.
///
/// Headline numbers cover the `1.5-2s` and `2s+` buckets only; `other`
/// intervals survive in `all_silences` but are filtered from aggregates.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct SilenceStats {
    /// Total duration of `2s+` silences, seconds.
    pub total_silence_time: f64,
    /// Bucket for 1.5s-2s silences.
    #[serde(rename = "1.5-2s")]
    pub short: CategoryStats,
    /// Bucket for 2s+ silences.
    #[serde(rename = "2s+")]
    pub long: CategoryStats,
    /// `2s+` intervals sorted by duration descending, at most ten entries.
    /// Ties keep their chronological order.
    pub longest_silences: Vec<SilenceInterval>,
    /// Every retained interval in chronological order, any category.
    pub all_silences: Vec<SilenceInterval>,
}

impl SilenceStats {
    /// Duration of the single longest retained silence, or 0.0 if none.
    pub fn longest_duration(&self) -> f64 {
        self.all_silences
            .iter()
            .map(|e| e.duration)
            .fold(0.0, f64::max)
    }

    /// One flat summary record for spreadsheet export.
    pub fn summary_row(&self) -> SummaryRow {
        SummaryRow {
            total_silence_time_s: self.total_silence_time,
            long_count: self.long.count,
            long_total_time_s: self.long.total_time,
        }
    }

    /// Flat per-interval records for the full interval list.
    pub fn silence_rows(&self) -> Vec<SilenceRow> {
        self.all_silences.iter().map(SilenceRow::from).collect()
    }
}

/// Flat export record for one silence interval.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct SilenceRow {
    pub start: f64,
    pub end: f64,
    pub duration: f64,
    pub category: SilenceCategory,
}

impl From<&SilenceInterval> for SilenceRow {
    fn from(interval: &SilenceInterval) -> Self {
        Self {
            start: interval.start,
            end: interval.end,
            duration: interval.duration,
            category: interval.category,
        }
    }
}

/// Flat export record for the headline statistics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct SummaryRow {
    pub total_silence_time_s: f64,
    pub long_count: usize,
    pub long_total_time_s: f64,
}
