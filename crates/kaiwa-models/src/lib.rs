//! Shared data models for the kaiwa backend.
//!
//! This crate provides Serde-serializable types for:
//! - Silence intervals, categories and aggregate statistics
//! - Per-frame energy traces for waveform export
//! - Transcription and diarization spans
//! - The per-request analysis report
//! - Flat row records for spreadsheet export

pub mod energy;
pub mod report;
pub mod silence;
pub mod transcript;
pub mod utils;

// Re-export common types
pub use energy::{EnergyTrace, WaveformRow};
pub use report::{AnalysisReport, ReportId};
pub use silence::{CategoryStats, SilenceCategory, SilenceInterval, SilenceRow, SilenceStats, SummaryRow};
pub use transcript::{SpeakerSegment, Transcript, TranscriptSegment};
pub use utils::round2;
