//! End-to-end pipeline runs against mocked speech services.

use std::f64::consts::PI;
use std::path::Path;

use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use kaiwa_analysis::{AnalysisError, AnalysisOptions, Analyzer};
use kaiwa_audio::AnalysisConfig;
use kaiwa_speech::{
    DiarizationClient, DiarizationConfig, MemoClient, OpenAiConfig, TranscriptionClient,
};

const SAMPLE_RATE: u32 = 16_000;

/// 3s tone, 1.8s pause, 3s tone: one silence in the 1.5-2s bucket.
fn write_fixture(path: &Path) {
    let spec = hound::WavSpec {
        channels: 1,
        sample_rate: SAMPLE_RATE,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    };
    let mut writer = hound::WavWriter::create(path, spec).unwrap();
    let tone_len = 3 * SAMPLE_RATE as usize;
    let quiet_len = (1.8 * SAMPLE_RATE as f64) as usize;
    for i in 0..tone_len {
        let s = 0.6 * (2.0 * PI * 440.0 * i as f64 / SAMPLE_RATE as f64).sin();
        writer.write_sample((s * i16::MAX as f64) as i16).unwrap();
    }
    for _ in 0..quiet_len {
        writer.write_sample(0i16).unwrap();
    }
    for i in 0..tone_len {
        let s = 0.6 * (2.0 * PI * 440.0 * i as f64 / SAMPLE_RATE as f64).sin();
        writer.write_sample((s * i16::MAX as f64) as i16).unwrap();
    }
    writer.finalize().unwrap();
}

fn analyzer_for(server: &MockServer, diarization: bool) -> Analyzer {
    let openai = OpenAiConfig::for_base_url(server.uri(), "sk-test");
    let diarization = if diarization {
        Some(
            DiarizationClient::new(DiarizationConfig::for_endpoint(
                format!("{}/diarize", server.uri()),
                Some("hf-test".to_string()),
            ))
            .unwrap(),
        )
    } else {
        None
    };
    Analyzer::new(
        AnalysisConfig::default(),
        TranscriptionClient::new(openai.clone()).unwrap(),
        MemoClient::new(openai).unwrap(),
        diarization,
    )
}

async fn mount_transcription(server: &MockServer, body: serde_json::Value) {
    Mock::given(method("POST"))
        .and(path("/audio/transcriptions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

async fn mount_memo(server: &MockServer, content: &str) {
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "choices": [ { "message": { "role": "assistant", "content": content } } ]
        })))
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_full_run_with_speakers_and_memo() {
    let server = MockServer::start().await;
    mount_transcription(
        &server,
        json!({
            "text": "おはようございます。はい、始めましょう。",
            "segments": [
                { "start": 0.0, "end": 2.8, "text": "おはようございます。" },
                { "start": 4.9, "end": 7.6, "text": "はい、始めましょう。" }
            ]
        }),
    )
    .await;
    mount_memo(&server, "会話の分析メモです。").await;
    Mock::given(method("POST"))
        .and(path("/diarize"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "speaker": "SPEAKER_00", "start": 0.0, "end": 3.5 },
            { "speaker": "SPEAKER_01", "start": 4.5, "end": 7.8 }
        ])))
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let audio = dir.path().join("conversation.wav");
    write_fixture(&audio);

    let analyzer = analyzer_for(&server, true);
    let options = AnalysisOptions {
        with_diarization: true,
        ..AnalysisOptions::default()
    };
    let report = analyzer.analyze(&audio, &options).await.unwrap();

    assert_eq!(report.db_threshold, -35.0);
    assert_eq!(report.duration_secs, 7.8);
    assert_eq!(report.transcript.text, "おはようございます。はい、始めましょう。");
    assert_eq!(report.memo.as_deref(), Some("会話の分析メモです。"));

    assert_eq!(report.silence.all_silences.len(), 1);
    assert_eq!(report.silence.short.count, 1);
    assert_eq!(report.silence.long.count, 0);

    assert_eq!(
        report.speaker_lines,
        vec![
            "SPEAKER_00: おはようございます。".to_string(),
            "SPEAKER_01: はい、始めましょう。".to_string(),
        ]
    );
}

#[tokio::test]
async fn test_diarization_failure_degrades_to_no_speakers() {
    let server = MockServer::start().await;
    mount_transcription(&server, json!({ "text": "hello", "segments": [] })).await;
    mount_memo(&server, "memo").await;
    Mock::given(method("POST"))
        .and(path("/diarize"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let audio = dir.path().join("a.wav");
    write_fixture(&audio);

    let analyzer = analyzer_for(&server, true);
    let options = AnalysisOptions {
        with_diarization: true,
        ..AnalysisOptions::default()
    };
    let report = analyzer.analyze(&audio, &options).await.unwrap();

    assert!(report.speaker_lines.is_empty());
    assert_eq!(report.transcript.text, "hello");
    assert!(report.memo.is_some());
}

#[tokio::test]
async fn test_missing_diarization_client_degrades() {
    let server = MockServer::start().await;
    mount_transcription(&server, json!({ "text": "hello", "segments": [] })).await;
    mount_memo(&server, "memo").await;

    let dir = tempfile::tempdir().unwrap();
    let audio = dir.path().join("a.wav");
    write_fixture(&audio);

    let analyzer = analyzer_for(&server, false);
    let options = AnalysisOptions {
        with_diarization: true,
        ..AnalysisOptions::default()
    };
    let report = analyzer.analyze(&audio, &options).await.unwrap();
    assert!(report.speaker_lines.is_empty());
}

#[tokio::test]
async fn test_memo_disabled() {
    let server = MockServer::start().await;
    mount_transcription(&server, json!({ "text": "hello" })).await;

    let dir = tempfile::tempdir().unwrap();
    let audio = dir.path().join("a.wav");
    write_fixture(&audio);

    let analyzer = analyzer_for(&server, false);
    let options = AnalysisOptions {
        with_memo: false,
        ..AnalysisOptions::default()
    };
    let report = analyzer.analyze(&audio, &options).await.unwrap();
    assert!(report.memo.is_none());
}

#[tokio::test]
async fn test_transcription_failure_is_fatal() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/audio/transcriptions"))
        .respond_with(ResponseTemplate::new(400).set_body_string("bad audio"))
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let audio = dir.path().join("a.wav");
    write_fixture(&audio);

    let analyzer = analyzer_for(&server, false);
    let err = analyzer
        .analyze(&audio, &AnalysisOptions::default())
        .await
        .unwrap_err();
    assert!(matches!(err, AnalysisError::Transcription(_)));
}

#[tokio::test]
async fn test_unsupported_upload_never_reaches_the_network() {
    // No mocks mounted: a request would fail loudly.
    let server = MockServer::start().await;

    let dir = tempfile::tempdir().unwrap();
    let audio = dir.path().join("notes.txt");
    std::fs::write(&audio, b"not audio").unwrap();

    let analyzer = analyzer_for(&server, false);
    let err = analyzer
        .analyze(&audio, &AnalysisOptions::default())
        .await
        .unwrap_err();
    assert!(matches!(err, AnalysisError::InvalidUpload(_)));
}

#[tokio::test]
async fn test_threshold_override_recorded_in_report() {
    let server = MockServer::start().await;
    mount_transcription(&server, json!({ "text": "hello" })).await;

    let dir = tempfile::tempdir().unwrap();
    let audio = dir.path().join("a.wav");
    write_fixture(&audio);

    let analyzer = analyzer_for(&server, false);
    let options = AnalysisOptions {
        db_threshold: Some(-40.0),
        with_memo: false,
        ..AnalysisOptions::default()
    };
    let report = analyzer.analyze(&audio, &options).await.unwrap();
    assert_eq!(report.db_threshold, -40.0);
}

#[tokio::test]
async fn test_report_serializes_wire_categories() {
    let server = MockServer::start().await;
    mount_transcription(&server, json!({ "text": "hello" })).await;

    let dir = tempfile::tempdir().unwrap();
    let audio = dir.path().join("a.wav");
    write_fixture(&audio);

    let analyzer = analyzer_for(&server, false);
    let options = AnalysisOptions {
        with_memo: false,
        ..AnalysisOptions::default()
    };
    let report = analyzer.analyze(&audio, &options).await.unwrap();

    let value = serde_json::to_value(&report).unwrap();
    let silence = &value["silence"];
    assert!(silence.get("1.5-2s").is_some());
    assert!(silence.get("2s+").is_some());
    assert_eq!(silence["1.5-2s"]["count"], 1);
    // Memo was not requested and must not appear in the payload.
    assert!(value.get("memo").is_none());
}
