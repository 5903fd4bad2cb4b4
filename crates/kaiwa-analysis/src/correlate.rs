//! Speaker attribution: match transcript spans to diarization turns.

use kaiwa_models::{SpeakerSegment, TranscriptSegment};

/// Attribute transcript spans to speaker turns by midpoint containment:
/// a span belongs to a turn iff its temporal midpoint lies inside the
/// turn. Produces one `"speaker: text"` line per turn that collected any
/// text; turns with none are dropped.
pub fn correlate_speakers(
    turns: &[SpeakerSegment],
    segments: &[TranscriptSegment],
) -> Vec<String> {
    turns
        .iter()
        .filter_map(|turn| {
            let text: String = segments
                .iter()
                .filter(|seg| turn.contains(seg.midpoint()))
                .map(|seg| seg.text.as_str())
                .collect();
            let text = text.trim();
            if text.is_empty() {
                None
            } else {
                Some(format!("{}: {}", turn.speaker, text))
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn turn(start: f64, end: f64, speaker: &str) -> SpeakerSegment {
        SpeakerSegment {
            start,
            end,
            speaker: speaker.to_string(),
        }
    }

    fn span(start: f64, end: f64, text: &str) -> TranscriptSegment {
        TranscriptSegment {
            start,
            end,
            text: text.to_string(),
        }
    }

    #[test]
    fn test_spans_attach_by_midpoint() {
        let turns = vec![turn(0.0, 5.0, "SPEAKER_00"), turn(5.0, 10.0, "SPEAKER_01")];
        let segments = vec![
            span(0.0, 2.0, "おはよう"),
            span(2.0, 4.0, "ございます"),
            // Midpoint 5.5 lands in the second turn even though it starts
            // inside the first
            span(4.5, 6.5, "はい"),
        ];

        let lines = correlate_speakers(&turns, &segments);
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0], "SPEAKER_00: おはようございます");
        assert_eq!(lines[1], "SPEAKER_01: はい");
    }

    #[test]
    fn test_empty_turns_dropped() {
        let turns = vec![turn(0.0, 1.0, "SPEAKER_00"), turn(8.0, 9.0, "SPEAKER_01")];
        let segments = vec![span(8.2, 8.8, "yes")];

        let lines = correlate_speakers(&turns, &segments);
        assert_eq!(lines, vec!["SPEAKER_01: yes".to_string()]);
    }

    #[test]
    fn test_whitespace_only_text_dropped() {
        let turns = vec![turn(0.0, 5.0, "SPEAKER_00")];
        let segments = vec![span(1.0, 2.0, "  ")];
        assert!(correlate_speakers(&turns, &segments).is_empty());
    }

    #[test]
    fn test_no_segments_yields_no_lines() {
        let turns = vec![turn(0.0, 5.0, "SPEAKER_00")];
        assert!(correlate_speakers(&turns, &[]).is_empty());
    }
}
