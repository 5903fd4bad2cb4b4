//! Analysis memo generation via a hosted chat model.

use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use kaiwa_models::SilenceStats;

use crate::config::OpenAiConfig;
use crate::error::{SpeechError, SpeechResult};
use crate::retry::with_retry;

/// Maximum transcript characters embedded into the prompt.
const PROMPT_TRANSCRIPT_CHARS: usize = 1000;

/// Client for memo generation.
pub struct MemoClient {
    http: Client,
    config: OpenAiConfig,
}

#[derive(Debug, Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    temperature: f64,
    max_tokens: u32,
}

#[derive(Debug, Serialize)]
struct ChatMessage {
    role: &'static str,
    content: String,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChatChoiceMessage {
    content: String,
}

impl MemoClient {
    /// Create a new memo client.
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

    /// Generate a short analysis memo from the transcript and silence
    /// statistics. Opaque, best-effort prose; the caller treats the
    /// returned text as-is.
    pub async fn generate_memo(
        &self,
        transcript: &str,
        stats: &SilenceStats,
        total_duration: f64,
    ) -> SpeechResult<String> {
        let url = format!("{}/chat/completions", self.config.base_url);
        let prompt = build_memo_prompt(transcript, stats, total_duration);

        debug!(url = %url, model = %self.config.chat_model, "Sending memo request");

        let request = ChatRequest {
            model: self.config.chat_model.clone(),
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: "あなたは会話分析の専門家です。与えられたデータから簡潔で実用的な分析メモを生成します。"
                        .to_string(),
                },
                ChatMessage {
                    role: "user",
                    content: prompt,
                },
            ],
            temperature: 0.7,
            max_tokens: 500,
        };

        let response = with_retry(self.config.max_retries, || async {
            let response = self
                .http
                .post(&url)
                .bearer_auth(&self.config.api_key)
                .json(&request)
                .send()
                .await
                .map_err(SpeechError::Network)?;

            let status = response.status();
            if status.is_server_error() || status.as_u16() == 429 {
                return Err(SpeechError::ServiceUnavailable(format!(
                    "chat service returned {}",
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
                "chat service returned {}: {}",
                status, body
            )));
        }

        let parsed: ChatResponse = response.json().await?;
        parsed
            .choices
            .into_iter()
            .next()
            .map(|c| c.message.content)
            .ok_or_else(|| SpeechError::InvalidResponse("no choices in chat response".to_string()))
    }
}

/// Build the memo prompt from the analysis data.
pub fn build_memo_prompt(transcript: &str, stats: &SilenceStats, total_duration: f64) -> String {
    let total_silence = stats.total_silence_time;
    let silence_percentage = if total_duration > 0.0 {
        ((total_silence / total_duration * 100.0) * 10.0).round() / 10.0
    } else {
        0.0
    };
    let excerpt: String = transcript.chars().take(PROMPT_TRANSCRIPT_CHARS).collect();

    format!(
        "以下の会話音声の分析データを基に、簡潔な分析メモを生成してください。

【音声データ】
- 全体の長さ: {}
- 文字起こし:
{}... (以下省略)

【沈黙統計】
- 全体の沈黙時間: {} ({}%)
- 1.5～2秒の沈黙: {}回（計{}）
- 2秒以上の沈黙: {}回（計{}）
- 最長沈黙: {}

【出力形式】
以下の3項目を簡潔に出力してください：
1. 【特徴】 - 沈黙パターンや会話の流れの特徴（2-3行）
2. 【注目区間】 - 長い沈黙や重要そうな箇所の解釈（2-3行、具体的な時間を含む）
3. 【注意点】 - 音声品質や特記事項があれば（1-2行、なければ「なし」）

簡潔に、箇条書きで出力してください。",
        format_mmss(total_duration),
        excerpt,
        format_mmss(total_silence),
        silence_percentage,
        stats.short.count,
        format_mmss(stats.short.total_time),
        stats.long.count,
        format_mmss(stats.long.total_time),
        format_mmss(stats.longest_duration()),
    )
}

/// Format seconds as `MmSSs` (e.g. 125.3 -> "2m5s").
fn format_mmss(seconds: f64) -> String {
    let whole = seconds.max(0.0) as u64;
    format!("{}m{}s", whole / 60, whole % 60)
}
