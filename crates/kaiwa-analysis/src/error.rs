//! Orchestration error types.
//!
//! The engine and the clients raise their own errors; this layer decides
//! which collaborator failures are fatal. Diarization failures never
//! appear here — they degrade to "no speaker labels" inside the pipeline.

use thiserror::Error;

use kaiwa_audio::AudioError;
use kaiwa_speech::SpeechError;

pub type AnalysisResult<T> = Result<T, AnalysisError>;

#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("Invalid upload: {0}")]
    InvalidUpload(String),

    #[error(transparent)]
    Audio(#[from] AudioError),

    #[error("Missing or invalid speech credentials: {0}")]
    Credentials(#[source] SpeechError),

    #[error("Transcription failed: {0}")]
    Transcription(#[source] SpeechError),

    #[error("Memo generation failed: {0}")]
    Memo(#[source] SpeechError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
