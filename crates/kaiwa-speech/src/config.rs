//! Client configuration for the hosted speech services.

use std::time::Duration;

use crate::error::{SpeechError, SpeechResult};

/// Configuration for the OpenAI-backed clients (transcription, memo).
#[derive(Debug, Clone)]
pub struct OpenAiConfig {
    /// API key (bearer auth).
    pub api_key: String,
    /// API base URL, overridable for tests and proxies.
    pub base_url: String,
    /// Speech-recognition model.
    pub whisper_model: String,
    /// Chat model for memo generation.
    pub chat_model: String,
    /// Request timeout.
    pub timeout: Duration,
    /// Max retries for retryable failures.
    pub max_retries: u32,
}

impl OpenAiConfig {
    /// Create config from environment variables.
    ///
    /// Fails when `OPENAI_API_KEY` is absent; transcription and memo
    /// generation are the product's core value and cannot degrade.
    pub fn from_env() -> SpeechResult<Self> {
        let api_key = std::env::var("OPENAI_API_KEY")
            .map_err(|_| SpeechError::MissingCredentials("OPENAI_API_KEY".to_string()))?;

        Ok(Self {
            api_key,
            base_url: std::env::var("OPENAI_BASE_URL")
                .unwrap_or_else(|_| "https://api.openai.com/v1".to_string()),
            whisper_model: std::env::var("WHISPER_MODEL")
                .unwrap_or_else(|_| "whisper-1".to_string()),
            chat_model: std::env::var("GPT_MODEL").unwrap_or_else(|_| "gpt-4o-mini".to_string()),
            timeout: Duration::from_secs(
                std::env::var("OPENAI_TIMEOUT_SECS")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(300),
            ),
            max_retries: std::env::var("OPENAI_RETRIES")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(2),
        })
    }

    /// Config pointing at a given base URL, for tests.
    pub fn for_base_url(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: base_url.into(),
            whisper_model: "whisper-1".to_string(),
            chat_model: "gpt-4o-mini".to_string(),
            timeout: Duration::from_secs(30),
            max_retries: 0,
        }
    }
}

/// Configuration for the hosted diarization pipeline.
#[derive(Debug, Clone)]
pub struct DiarizationConfig {
    /// Endpoint receiving raw audio bytes.
    pub endpoint: String,
    /// Hugging Face token; absent means diarization is unavailable.
    pub hf_token: Option<String>,
    /// Request timeout.
    pub timeout: Duration,
    /// Max retries for retryable failures.
    pub max_retries: u32,
}

impl DiarizationConfig {
    /// Create config from environment variables. Never fails: a missing
    /// token surfaces later so the caller can degrade to "no speakers".
    pub fn from_env() -> Self {
        Self {
            endpoint: std::env::var("DIARIZATION_URL").unwrap_or_else(|_| {
                "https://api-inference.huggingface.co/models/pyannote/speaker-diarization-3.1"
                    .to_string()
            }),
            hf_token: std::env::var("HF_TOKEN").ok(),
            timeout: Duration::from_secs(
                std::env::var("DIARIZATION_TIMEOUT_SECS")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(300),
            ),
            max_retries: std::env::var("DIARIZATION_RETRIES")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(2),
        }
    }

    /// Config pointing at a given endpoint, for tests.
    pub fn for_endpoint(endpoint: impl Into<String>, hf_token: Option<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            hf_token,
            timeout: Duration::from_secs(30),
            max_retries: 0,
        }
    }
}
