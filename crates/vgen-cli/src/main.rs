//! Video generation CLI.

mod config;

use anyhow::{bail, Context};
use tracing::{error, info, warn};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use vgen_client::ApiClient;
use vgen_download::{derive_filename, download_video};
use vgen_models::{GenerationRequest, JobStatus, Resolution};
use vgen_poller::JobController;

use config::CliConfig;

struct CliArgs {
    prompt: String,
    duration_secs: u32,
    resolution: Resolution,
}

fn parse_args() -> anyhow::Result<CliArgs> {
    let mut args = std::env::args().skip(1);

    let Some(prompt) = args.next() else {
        bail!("usage: vgen <prompt> [duration-secs] [WIDTHxHEIGHT]");
    };

    let duration_secs = match args.next() {
        Some(s) => s
            .parse()
            .with_context(|| format!("invalid duration '{s}'"))?,
        None => 5,
    };

    let resolution = match args.next() {
        Some(s) => s
            .parse()
            .with_context(|| format!("invalid resolution '{s}'"))?,
        None => Resolution::new(854, 480),
    };

    Ok(CliArgs {
        prompt,
        duration_secs,
        resolution,
    })
}

#[tokio::main]
async fn main() {
    // Install rustls crypto provider (required for TLS/HTTPS)
    rustls::crypto::ring::default_provider()
        .install_default()
        .expect("Failed to install rustls crypto provider");

    // Load environment variables
    dotenvy::dotenv().ok();

    // Initialize tracing with colored output for dev, JSON for production
    let use_json = std::env::var("LOG_FORMAT")
        .map(|v| v.to_lowercase() == "json")
        .unwrap_or(false);

    let env_filter = EnvFilter::from_default_env().add_directive("vgen=info".parse().unwrap());

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

    if let Err(e) = run().await {
        error!("{e:#}");
        std::process::exit(1);
    }
}

async fn run() -> anyhow::Result<()> {
    let args = parse_args()?;
    let config = CliConfig::from_env();

    let client = ApiClient::new(config.api.clone()).context("Failed to create API client")?;
    let mut controller = JobController::new(client, config.poller.clone(), config.limits.clone());

    let request = GenerationRequest::new(args.prompt, args.duration_secs, args.resolution);
    let handle = controller.submit(request)?;

    info!("Request submitted, waiting for the video");

    // Render every state change until the poll task stops.
    let mut rx = handle.updates();
    let mut last_line = String::new();
    loop {
        let job = rx.borrow_and_update().clone();

        let line = format!(
            "{} {}%{}",
            job.status,
            job.progress,
            job.status_note
                .as_deref()
                .map(|n| format!(" ({n})"))
                .unwrap_or_default()
        );
        if line != last_line {
            info!(
                status = %job.status,
                progress = job.progress,
                provider_status = job.provider_status.as_deref().unwrap_or("-"),
                "{}",
                job.status_note.as_deref().unwrap_or("Job update")
            );
            last_line = line;
        }

        if job.is_terminal() {
            break;
        }
        if rx.changed().await.is_err() {
            break;
        }
    }

    let job = handle.snapshot();
    match job.status {
        JobStatus::Completed => {
            let Some(url) = job.video_url() else {
                bail!("job completed but no video URL was reported");
            };
            let filename = derive_filename(&job.request.prompt);
            let path = download_video(url, &config.output_dir, &filename)
                .await
                .with_context(|| {
                    format!("download failed; the video is still available at {url}")
                })?;
            info!(path = %path.display(), "Done");
            Ok(())
        }
        JobStatus::Failed => {
            bail!(
                "generation failed: {}",
                job.error_message.as_deref().unwrap_or("unknown error")
            );
        }
        _ => {
            if let Some(message) = &job.error_message {
                warn!("Last known state: {} {}%", job.status, job.progress);
                bail!("lost contact with the backend: {message}");
            }
            bail!("polling stopped unexpectedly");
        }
    }
}
