//! Transcription and diarization span models.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// One timed span of recognized speech.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct TranscriptSegment {
    /// Start offset, seconds.
    pub start: f64,
    /// End offset, seconds.
    pub end: f64,
    /// Recognized text for the span.
    pub text: String,
}

impl TranscriptSegment {
    /// Temporal midpoint of the span, used for speaker attribution.
    pub fn midpoint(&self) -> f64 {
        (self.start + self.end) / 2.0
    }
}

/// Full transcription result: the complete text plus optional timed spans.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Transcript {
    /// The full recognized text.
    pub text: String,
    /// Timed spans, present only when segment timestamps were requested.
    #[serde(default)]
    pub segments: Vec<TranscriptSegment>,
}

/// One speaker turn from diarization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct SpeakerSegment {
    /// Turn start, seconds.
    pub start: f64,
    /// Turn end, seconds.
    pub end: f64,
    /// Speaker label as emitted by the diarization model.
    pub speaker: String,
}

impl SpeakerSegment {
    /// True when `t` falls inside this turn (inclusive bounds).
    pub fn contains(&self, t: f64) -> bool {
        self.start <= t && t <= self.end
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_midpoint() {
        let seg = TranscriptSegment {
            start: 2.0,
            end: 5.0,
            text: "hello".to_string(),
        };
        assert!((seg.midpoint() - 3.5).abs() < 1e-9);
    }

    #[test]
    fn test_speaker_contains() {
        let turn = SpeakerSegment {
            start: 1.0,
            end: 4.0,
            speaker: "SPEAKER_00".to_string(),
        };
        assert!(turn.contains(1.0));
        assert!(turn.contains(4.0));
        assert!(turn.contains(2.5));
        assert!(!turn.contains(4.001));
    }
}
