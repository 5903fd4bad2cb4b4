//! Hosted speaker-diarization client.

use std::path::Path;

use reqwest::Client;
use tracing::debug;

use kaiwa_models::SpeakerSegment;

use crate::config::DiarizationConfig;
use crate::error::{SpeechError, SpeechResult};
use crate::retry::with_retry;

/// Client for the hosted diarization pipeline.
///
/// Construction fails without a token; callers treat any failure here as
/// "skip diarization", never as a reason to abort the analysis.
#[derive(Debug)]
pub struct DiarizationClient {
    http: Client,
    config: DiarizationConfig,
    token: String,
}

impl DiarizationClient {
    /// Create a new diarization client.
    pub fn new(config: DiarizationConfig) -> SpeechResult<Self> {
        let token = config
            .hf_token
            .clone()
            .ok_or_else(|| SpeechError::MissingCredentials("HF_TOKEN".to_string()))?;
        let http = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(SpeechError::Network)?;
        Ok(Self {
            http,
            config,
            token,
        })
    }

    /// Create from environment variables.
    pub fn from_env() -> SpeechResult<Self> {
        Self::new(DiarizationConfig::from_env())
    }

    /// Run diarization on an audio file.
    ///
    /// Returns speaker turns in chronological order as emitted by the
    /// model.
    pub async fn diarize(&self, path: &Path) -> SpeechResult<Vec<SpeakerSegment>> {
        let bytes = tokio::fs::read(path).await?;

        debug!(
            endpoint = %self.config.endpoint,
            bytes = bytes.len(),
            "Sending diarization request"
        );

        let response = with_retry(self.config.max_retries, || async {
            let response = self
                .http
                .post(&self.config.endpoint)
                .bearer_auth(&self.token)
                .header(reqwest::header::CONTENT_TYPE, "application/octet-stream")
                .body(bytes.clone())
                .send()
                .await
                .map_err(SpeechError::Network)?;

            let status = response.status();
            if status.is_server_error() || status.as_u16() == 429 {
                return Err(SpeechError::ServiceUnavailable(format!(
                    "diarization service returned {}",
                    status
                )));
            }
            Ok(response)
        })
        .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(SpeechError::RequestFailed(format!(
                "diarization service returned {}: {}",
                status, body
            )));
        }

        let segments: Vec<SpeakerSegment> = response.json().await?;
        Ok(segments)
    }
}
