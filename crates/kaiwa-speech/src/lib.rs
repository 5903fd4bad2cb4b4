//! HTTP clients for the hosted speech collaborators.
//!
//! Three narrow interfaces over network services:
//! - [`TranscriptionClient`] — full-text transcription with optional
//!   segment timestamps (fatal on failure)
//! - [`DiarizationClient`] — speaker turns (callers degrade on failure)
//! - [`MemoClient`] — short analysis memo from transcript + statistics
//!
//! Retryable failures (network, 5xx, 429) back off exponentially up to a
//! configured retry budget; everything else surfaces immediately.

pub mod config;
pub mod diarize;
pub mod error;
pub mod memo;
mod retry;
pub mod transcribe;

pub use config::{DiarizationConfig, OpenAiConfig};
pub use diarize::DiarizationClient;
pub use error::{SpeechError, SpeechResult};
pub use memo::{build_memo_prompt, MemoClient};
pub use transcribe::TranscriptionClient;
