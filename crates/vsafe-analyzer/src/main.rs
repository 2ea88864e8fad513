//! Video safety analyzer binary.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::error::ErrorKind;
use clap::Parser;
use tracing::{debug, info};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use vsafe_analyzer::{AnalyzerConfig, MediaInput, Pipeline};
use vsafe_models::FinalReport;

/// Analyze a video for safety concerns with Gemini.
#[derive(Debug, Parser)]
#[command(name = "vsafe")]
#[command(version)]
struct Cli {
    /// Video URL to download and analyze
    #[arg(long)]
    url: Option<String>,

    /// Local video file to analyze
    #[arg(long)]
    file: Option<PathBuf>,

    /// Gemini model name [default: gemini-2.0-flash]
    #[arg(long)]
    model: Option<String>,

    /// Gemini API key (overrides GEMINI_API_KEY)
    #[arg(long = "api_key", alias = "api-key")]
    api_key: Option<String>,
}

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            e.exit()
        }
        Err(e) => return fail(&e.to_string()),
    };

    // Install rustls crypto provider (required for TLS/HTTPS)
    let _ = rustls::crypto::ring::default_provider().install_default();

    // Load environment variables
    dotenvy::dotenv().ok();

    init_tracing();

    let runtime = match tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
    {
        Ok(rt) => rt,
        Err(e) => return fail(&format!("Failed to start runtime: {}", e)),
    };

    match runtime.block_on(run(cli)) {
        Ok(report) => match serde_json::to_string_pretty(&report) {
            Ok(json) => {
                println!("{}", json);
                ExitCode::SUCCESS
            }
            Err(e) => fail(&e.to_string()),
        },
        Err(e) => fail(&e.to_string()),
    }
}

async fn run(cli: Cli) -> anyhow::Result<FinalReport> {
    let config = AnalyzerConfig::from_env()
        .with_api_key(cli.api_key)
        .with_model(cli.model);
    debug!("Analyzer config: {:?}", config);

    let input = MediaInput::from_args(cli.url, cli.file)?;
    input.validate()?;
    let pipeline = Pipeline::from_config(config)?;
    pipeline
        .media()
        .check_tools(matches!(input, MediaInput::Url(_)))?;

    info!(input = %input.describe(), "Starting analysis");
    let report = pipeline.run(&input).await?;
    Ok(report)
}

/// Print the error object on stdout and report failure.
fn fail(message: &str) -> ExitCode {
    println!("{}", serde_json::json!({ "error": message }));
    ExitCode::FAILURE
}

/// Logs go to stderr so stdout carries only the report.
fn init_tracing() {
    let use_json = std::env::var("LOG_FORMAT")
        .map(|v| v.to_lowercase() == "json")
        .unwrap_or(false);

    let mut env_filter = EnvFilter::from_default_env();
    if let Ok(directive) = "vsafe=info".parse() {
        env_filter = env_filter.add_directive(directive);
    }

    if use_json {
        tracing_subscriber::registry()
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .with(env_filter)
            .init();
    } else {
        tracing_subscriber::registry()
            .with(
                fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_ansi(true)
                    .with_target(true)
                    .with_thread_ids(false),
            )
            .with(env_filter)
            .init();
    }
}
