//! Analysis orchestration for conversational audio.
//!
//! Validates an uploaded file, runs the silence engine, calls the hosted
//! transcription/diarization/memo services, and assembles one
//! [`kaiwa_models::AnalysisReport`] per request. Only this layer decides
//! which collaborator failures are recoverable: diarization degrades,
//! transcription and memo do not.

pub mod correlate;
pub mod error;
pub mod pipeline;
pub mod upload;

pub use correlate::correlate_speakers;
pub use error::{AnalysisError, AnalysisResult};
pub use pipeline::{AnalysisOptions, Analyzer};
pub use upload::{validate_upload, MAX_FILE_SIZE_MB, SUPPORTED_FORMATS};
