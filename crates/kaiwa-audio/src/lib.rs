//! Silence-detection engine for conversational audio.
//!
//! This crate provides:
//! - Format-agnostic decoding to a mono signal (MP3, WAV, M4A)
//! - Per-frame RMS energy relative to the recording's peak
//! - Threshold-based run-length segmentation into silence intervals
//! - Length categorization and aggregate statistics with a top-10 ranking
//!
//! The engine is synchronous, stateless across invocations, and carries
//! its tunables in an immutable [`AnalysisConfig`] so analyses with
//! different thresholds can run concurrently.

pub mod analyze;
pub mod config;
pub mod decode;
pub mod energy;
pub mod error;
pub mod segment;
pub mod signal;
pub mod stats;

pub use analyze::{analyze_signal, SilenceAnalysis};
pub use config::{AnalysisConfig, DB_THRESHOLD_OPTIONS};
pub use decode::decode_signal;
pub use energy::rms_trace;
pub use error::{AudioError, AudioResult};
pub use segment::{classify, detect_silences};
pub use signal::{total_duration, Signal};
pub use stats::aggregate;
