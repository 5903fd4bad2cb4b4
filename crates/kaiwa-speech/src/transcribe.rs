//! Hosted speech-recognition client (Whisper API).

use std::path::Path;

use reqwest::multipart::{Form, Part};
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

use kaiwa_models::{Transcript, TranscriptSegment};

use crate::config::OpenAiConfig;
use crate::error::{SpeechError, SpeechResult};
use crate::retry::with_retry;

/// Client for the hosted transcription API.
pub struct TranscriptionClient {
    http: Client,
    config: OpenAiConfig,
}

#[derive(Debug, Deserialize)]
struct TranscriptionResponse {
    text: String,
    #[serde(default)]
    segments: Vec<ApiSegment>,
}

#[derive(Debug, Deserialize)]
struct ApiSegment {
    start: f64,
    end: f64,
    text: String,
}

impl TranscriptionClient {
    /// Create a new transcription client.
    pub fn new(config: OpenAiConfig) -> SpeechResult<Self> {
        let http = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(SpeechError::Network)?;
        Ok(Self { http, config })
    }

    /// Create from environment variables.
    pub fn from_env() -> SpeechResult<Self> {
        Self::new(OpenAiConfig::from_env()?)
    }

    /// Transcribe an audio file.
    ///
    /// `language` is a recognition hint (ISO 639-1). When `with_segments`
    /// is set the request asks for segment timestamps and the returned
    /// transcript carries timed spans; otherwise only the full text.
    pub async fn transcribe(
        &self,
        path: &Path,
        language: &str,
        with_segments: bool,
    ) -> SpeechResult<Transcript> {
        let url = format!("{}/audio/transcriptions", self.config.base_url);
        let bytes = tokio::fs::read(path).await?;
        let file_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("audio")
            .to_string();

        debug!(
            url = %url,
            file = %file_name,
            bytes = bytes.len(),
            with_segments,
            "Sending transcription request"
        );

        let response = with_retry(self.config.max_retries, || async {
            let mut form = Form::new()
                .text("model", self.config.whisper_model.clone())
                .text("language", language.to_string())
                .part(
                    "file",
                    Part::bytes(bytes.clone()).file_name(file_name.clone()),
                );
            if with_segments {
                form = form
                    .text("response_format", "verbose_json")
                    .text("timestamp_granularities[]", "segment");
            }

            let response = self
                .http
                .post(&url)
                .bearer_auth(&self.config.api_key)
                .multipart(form)
                .send()
                .await
                .map_err(SpeechError::Network)?;

            let status = response.status();
            if status.is_server_error() || status.as_u16() == 429 {
                return Err(SpeechError::ServiceUnavailable(format!(
                    "transcription service returned {}",
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
                "transcription service returned {}: {}",
                status, body
            )));
        }

        let parsed: TranscriptionResponse = response.json().await?;
        Ok(Transcript {
            text: parsed.text,
            segments: parsed
                .segments
                .into_iter()
                .map(|s| TranscriptSegment {
                    start: s.start,
                    end: s.end,
                    text: s.text,
                })
                .collect(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::io::Write;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn audio_file() -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::with_suffix(".wav").unwrap();
        file.write_all(b"fake audio bytes").unwrap();
        file
    }

    #[tokio::test]
    async fn test_transcribe_text_only() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/audio/transcriptions"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "text": "こんにちは、今日はいい天気ですね。"
            })))
            .mount(&server)
            .await;

        let client =
            TranscriptionClient::new(OpenAiConfig::for_base_url(server.uri(), "sk-test")).unwrap();
        let file = audio_file();
        let transcript = client.transcribe(file.path(), "ja", false).await.unwrap();

        assert_eq!(transcript.text, "こんにちは、今日はいい天気ですね。");
        assert!(transcript.segments.is_empty());
    }

    #[tokio::test]
    async fn test_transcribe_with_segments() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/audio/transcriptions"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "text": "hello world",
                "segments": [
                    { "start": 0.0, "end": 1.2, "text": "hello" },
                    { "start": 1.2, "end": 2.4, "text": "world" }
                ]
            })))
            .mount(&server)
            .await;

        let client =
            TranscriptionClient::new(OpenAiConfig::for_base_url(server.uri(), "sk-test")).unwrap();
        let file = audio_file();
        let transcript = client.transcribe(file.path(), "ja", true).await.unwrap();

        assert_eq!(transcript.segments.len(), 2);
        assert_eq!(transcript.segments[1].text, "world");
        assert!((transcript.segments[1].midpoint() - 1.8).abs() < 1e-9);
    }

    #[tokio::test]
    async fn test_client_error_is_fatal() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/audio/transcriptions"))
            .respond_with(ResponseTemplate::new(400).set_body_string("bad audio"))
            .mount(&server)
            .await;

        let client =
            TranscriptionClient::new(OpenAiConfig::for_base_url(server.uri(), "sk-test")).unwrap();
        let file = audio_file();
        let err = client.transcribe(file.path(), "ja", false).await.unwrap_err();

        assert!(matches!(err, SpeechError::RequestFailed(_)));
        assert!(!err.is_retryable());
    }

    #[tokio::test]
    async fn test_server_error_is_retryable_class() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/audio/transcriptions"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let client =
            TranscriptionClient::new(OpenAiConfig::for_base_url(server.uri(), "sk-test")).unwrap();
        let file = audio_file();
        let err = client.transcribe(file.path(), "ja", false).await.unwrap_err();

        assert!(matches!(err, SpeechError::ServiceUnavailable(_)));
        assert!(err.is_retryable());
    }
}
