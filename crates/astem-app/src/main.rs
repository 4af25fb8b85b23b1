//! AudioStem client binary.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use astem_app::{
    AppConfig, ConsoleView, Panel, SelectedFile, SelectionController, SessionOutcome, Workflow,
};
use astem_client::StemServiceClient;
use astem_models::{ProcessingParams, DEMUCS_MODELS, QUALITY_PROFILES};

/// Upload a video to an AudioStem server and track extraction to
/// completion.
#[derive(Debug, Parser)]
#[command(name = "astem", version, about)]
struct Cli {
    /// Video file to process
    file: Option<PathBuf>,

    /// Separation model id
    #[arg(long, default_value = "htdemucs")]
    model: String,

    /// Number of shifts (quality profile)
    #[arg(long, default_value = "1")]
    shifts: String,

    /// Backend base URL (overrides ASTEM_SERVER)
    #[arg(long)]
    server: Option<String>,

    /// Delay between status polls, in milliseconds
    #[arg(long)]
    poll_interval_ms: Option<u64>,

    /// Maximum poll cycles before giving up (0 = unlimited)
    #[arg(long)]
    max_polls: Option<u32>,

    /// List the available models and quality profiles, then exit
    #[arg(long)]
    list_options: bool,
}

fn init_tracing() {
    let use_json = std::env::var("LOG_FORMAT")
        .map(|v| v.to_lowercase() == "json")
        .unwrap_or(false);

    let env_filter = EnvFilter::from_default_env()
        .add_directive("astem=info".parse().expect("valid directive"));

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
                    .with_target(false)
                    .with_file(false)
                    .with_line_number(false),
            )
            .with(env_filter)
            .init();
    }
}

fn list_options() {
    println!("Models:");
    for (id, label) in DEMUCS_MODELS {
        println!("  {id:<14} {label}");
    }
    println!("Quality profiles (--shifts):");
    for (shifts, label) in QUALITY_PROFILES {
        println!("  {shifts:<14} {label}");
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();

    let cli = Cli::parse();

    if cli.list_options {
        list_options();
        return Ok(());
    }

    let path = cli
        .file
        .context("no input file given (see --help, or --list-options)")?;

    let mut config = AppConfig::from_env();
    if let Some(server) = cli.server {
        config.server_url = server;
    }
    if let Some(ms) = cli.poll_interval_ms {
        config.poll_interval = Duration::from_millis(ms);
    }
    if let Some(max) = cli.max_polls {
        config.max_polls = (max > 0).then_some(max);
    }

    let params = ProcessingParams::new(cli.model, cli.shifts);
    if !params.is_known_model() {
        warn!(model = %params.model_name, "Unknown model id; the server will fall back to its default");
    }
    if !params.is_known_shifts() {
        warn!(shifts = %params.shifts, "Unknown shifts value; the server will fall back to its default");
    }

    let candidate = SelectedFile::from_path(&path)
        .await
        .with_context(|| format!("failed to read {}", path.display()))?;

    let mut view = ConsoleView::new();
    let mut selection = SelectionController::new();
    if !selection.offer(&mut view, candidate) {
        anyhow::bail!(
            "unsupported file type: {} (expected one of {})",
            path.display(),
            astem_models::ALLOWED_VIDEO_EXTENSIONS.join(", ")
        );
    }

    let client = StemServiceClient::new(&config.server_url)?;
    let mut workflow = Workflow::new(client, config.clone());

    info!(server = %config.server_url, "Connecting");
    if let Some(report) = workflow.check_health().await {
        if !report.ffmpeg_ok {
            warn!(message = %report.ffmpeg_message, "Server reports FFmpeg unavailable");
        }
    }

    let file = selection.take().expect("selection verified above");
    let outcome = workflow.run(&mut view, file, params).await?;

    match outcome {
        SessionOutcome::Completed { .. } => Ok(()),
        SessionOutcome::Failed => {
            debug_assert_eq!(view.model().panel, Panel::Error);
            std::process::exit(1);
        }
    }
}
