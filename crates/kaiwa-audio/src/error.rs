//! Error types for the audio engine.

use std::path::PathBuf;
use thiserror::Error;

/// Result type for engine operations.
pub type AudioResult<T> = Result<T, AudioError>;

/// Errors that can occur while decoding or analyzing audio.
#[derive(Debug, Error)]
pub enum AudioError {
    #[error("File not found: {0}")]
    FileNotFound(PathBuf),

    #[error("Unsupported audio format: {0}")]
    UnsupportedFormat(String),

    #[error("Failed to decode audio: {0}")]
    DecodeFailed(String),

    #[error("No decodable audio track in file")]
    NoAudioTrack,

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Invalid signal: {0}")]
    InvalidSignal(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl AudioError {
    /// Create a decode failure error.
    pub fn decode_failed(message: impl Into<String>) -> Self {
        Self::DecodeFailed(message.into())
    }

    /// Create an invalid configuration error.
    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig(message.into())
    }

    /// Create an invalid signal error.
    pub fn invalid_signal(message: impl Into<String>) -> Self {
        Self::InvalidSignal(message.into())
    }

    /// True for errors caused by the input file rather than by the caller.
    pub fn is_decode_error(&self) -> bool {
        matches!(
            self,
            Self::UnsupportedFormat(_) | Self::DecodeFailed(_) | Self::NoAudioTrack
        )
    }
}
