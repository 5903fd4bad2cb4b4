//! Conversation analysis binary.
//!
//! Prints the finished report as JSON on stdout.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use kaiwa_analysis::{AnalysisOptions, Analyzer};
use kaiwa_audio::AnalysisConfig;

/// Silence analysis for conversational audio recordings
#[derive(Parser, Debug)]
#[command(name = "kaiwa-analysis", version, about)]
struct Cli {
    /// Audio file to analyze (mp3, wav or m4a)
    input: PathBuf,

    /// Silence threshold override, dB relative to peak RMS
    #[arg(long, allow_negative_numbers = true)]
    threshold: Option<f64>,

    /// Request speaker labels from the diarization service
    #[arg(long)]
    diarize: bool,

    /// Skip memo generation
    #[arg(long)]
    no_memo: bool,

    /// Recognition language hint (ISO 639-1)
    #[arg(long, default_value = "ja")]
    language: String,
}

impl Cli {
    fn options(&self) -> AnalysisOptions {
        AnalysisOptions {
            db_threshold: self.threshold,
            with_diarization: self.diarize,
            with_memo: !self.no_memo,
            language: self.language.clone(),
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();

    // Colored output for dev, JSON for production
    let use_json = std::env::var("LOG_FORMAT")
        .map(|v| v.to_lowercase() == "json")
        .unwrap_or(false);

    let env_filter = EnvFilter::from_default_env()
        .add_directive("kaiwa=info".parse().expect("static directive"));

    if use_json {
        tracing_subscriber::registry()
            .with(fmt::layer().json())
            .with(env_filter)
            .init();
    } else {
        tracing_subscriber::registry()
            .with(
                fmt::layer()
                    .with_ansi(true)
                    .with_target(true)
                    .with_thread_ids(false)
                    .with_file(false)
                    .with_line_number(false),
            )
            .with(env_filter)
            .init();
    }

    let cli = Cli::parse();

    info!(input = %cli.input.display(), "Starting analysis");

    let analyzer = match Analyzer::from_env(AnalysisConfig::default()) {
        Ok(a) => a,
        Err(e) => {
            error!("Failed to create analyzer: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let report = match analyzer.analyze(&cli.input, &cli.options()).await {
        Ok(r) => r,
        Err(e) => {
            error!("Analysis failed: {}", e);
            return ExitCode::FAILURE;
        }
    };

    match serde_json::to_string_pretty(&report) {
        Ok(json) => println!("{}", json),
        Err(e) => {
            error!("Failed to serialize report: {}", e);
            return ExitCode::FAILURE;
        }
    }

    ExitCode::SUCCESS
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cli = Cli::try_parse_from(["kaiwa-analysis", "call.wav"]).unwrap();
        assert_eq!(cli.input, PathBuf::from("call.wav"));

        let options = cli.options();
        assert_eq!(options.db_threshold, None);
        assert!(!options.with_diarization);
        assert!(options.with_memo);
        assert_eq!(options.language, "ja");
    }

    #[test]
    fn test_all_flags() {
        let cli = Cli::try_parse_from([
            "kaiwa-analysis",
            "call.m4a",
            "--threshold",
            "-40",
            "--diarize",
            "--no-memo",
            "--language",
            "en",
        ])
        .unwrap();

        let options = cli.options();
        assert_eq!(options.db_threshold, Some(-40.0));
        assert!(options.with_diarization);
        assert!(!options.with_memo);
        assert_eq!(options.language, "en");
    }

    #[test]
    fn test_input_is_required() {
        assert!(Cli::try_parse_from(["kaiwa-analysis"]).is_err());
    }

    #[test]
    fn test_bad_threshold_rejected() {
        let result = Cli::try_parse_from(["kaiwa-analysis", "call.wav", "--threshold", "loud"]);
        assert!(result.is_err());
    }
}
