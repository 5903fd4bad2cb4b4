//! The analysis pipeline.
//!
//! One request flows decode → (silence engine ‖ transcription) →
//! diarization (best effort) → memo. The decoded signal is immutable and
//! scoped to the request; the engine run and the transcription request
//! overlap because both only read it.

use std::path::Path;
use std::sync::Arc;

use chrono::Utc;
use tracing::{info, warn};

use kaiwa_audio::{analyze_signal, decode_signal, AnalysisConfig, Signal};
use kaiwa_models::{AnalysisReport, ReportId};
use kaiwa_speech::{DiarizationClient, MemoClient, TranscriptionClient};

use crate::correlate::correlate_speakers;
use crate::error::{AnalysisError, AnalysisResult};
use crate::upload::validate_upload;

/// Per-request knobs.
#[derive(Debug, Clone)]
pub struct AnalysisOptions {
    /// Override for the configured silence threshold, dB.
    pub db_threshold: Option<f64>,
    /// Request speaker labels. Failures degrade to no labels.
    pub with_diarization: bool,
    /// Generate the analysis memo. Failures are fatal when requested.
    pub with_memo: bool,
    /// Language hint for recognition (ISO 639-1).
    pub language: String,
}

impl Default for AnalysisOptions {
    fn default() -> Self {
        Self {
            db_threshold: None,
            with_diarization: false,
            with_memo: true,
            language: "ja".to_string(),
        }
    }
}

/// Orchestrates the engine and the hosted collaborators for one request
/// at a time. Holds no per-request state.
pub struct Analyzer {
    config: AnalysisConfig,
    transcription: TranscriptionClient,
    memo: MemoClient,
    diarization: Option<DiarizationClient>,
}

impl Analyzer {
    /// Assemble an analyzer from explicit parts.
    pub fn new(
        config: AnalysisConfig,
        transcription: TranscriptionClient,
        memo: MemoClient,
        diarization: Option<DiarizationClient>,
    ) -> Self {
        Self {
            config,
            transcription,
            memo,
            diarization,
        }
    }

    /// Assemble an analyzer from environment variables.
    ///
    /// Transcription and memo credentials are required. Diarization is
    /// optional: without a token the analyzer starts anyway and every
    /// diarization request is skipped.
    pub fn from_env(config: AnalysisConfig) -> AnalysisResult<Self> {
        let transcription =
            TranscriptionClient::from_env().map_err(AnalysisError::Credentials)?;
        let memo = MemoClient::from_env().map_err(AnalysisError::Credentials)?;
        let diarization = match DiarizationClient::from_env() {
            Ok(client) => Some(client),
            Err(e) => {
                warn!(error = %e, "Diarization unavailable, speaker labels will be skipped");
                None
            }
        };
        Ok(Self::new(config, transcription, memo, diarization))
    }

    /// Analyze one recording end to end.
    pub async fn analyze(
        &self,
        path: &Path,
        options: &AnalysisOptions,
    ) -> AnalysisResult<AnalysisReport> {
        validate_upload(path)?;

        let config = match options.db_threshold {
            Some(db) => self.config.clone().with_db_threshold(db),
            None => self.config.clone(),
        };
        config.validate().map_err(AnalysisError::Audio)?;

        info!(
            path = %path.display(),
            db_threshold = config.db_threshold,
            with_diarization = options.with_diarization,
            "Starting analysis"
        );

        // Decode off the async runtime; decoding is CPU-bound.
        let input = path.to_path_buf();
        let signal: Arc<Signal> = Arc::new(
            tokio::task::spawn_blocking(move || decode_signal(&input))
                .await
                .map_err(|e| AnalysisError::Io(std::io::Error::other(e)))??,
        );

        // The engine and the transcription request read the same
        // immutable input, so they run concurrently. Segment timestamps
        // are only needed when speaker labels were requested.
        let engine_task = tokio::task::spawn_blocking({
            let signal = Arc::clone(&signal);
            let config = config.clone();
            move || analyze_signal(&signal, &config)
        });
        let (analysis, transcript) = tokio::join!(
            engine_task,
            self.transcription
                .transcribe(path, &options.language, options.with_diarization)
        );
        let analysis = analysis.map_err(|e| AnalysisError::Io(std::io::Error::other(e)))??;
        let transcript = transcript.map_err(AnalysisError::Transcription)?;

        let speaker_lines = if options.with_diarization {
            match &self.diarization {
                Some(client) => match client.diarize(path).await {
                    Ok(turns) => correlate_speakers(&turns, &transcript.segments),
                    Err(e) => {
                        warn!(error = %e, "Diarization failed, continuing without speaker labels");
                        Vec::new()
                    }
                },
                None => {
                    warn!("No diarization credentials, continuing without speaker labels");
                    Vec::new()
                }
            }
        } else {
            Vec::new()
        };

        let memo = if options.with_memo {
            let text = self
                .memo
                .generate_memo(&transcript.text, &analysis.stats, analysis.duration_secs)
                .await
                .map_err(AnalysisError::Memo)?;
            Some(text)
        } else {
            None
        };

        let report = AnalysisReport {
            id: ReportId::new(),
            created_at: Utc::now(),
            db_threshold: config.db_threshold,
            duration_secs: analysis.duration_secs,
            silence: analysis.stats,
            energy: analysis.energy,
            transcript,
            memo,
            speaker_lines,
        };

        info!(
            report_id = %report.id,
            duration_secs = report.duration_secs,
            silences = report.silence.all_silences.len(),
            speaker_lines = report.speaker_lines.len(),
            "Analysis complete"
        );

        Ok(report)
    }
}
