//! Movie generation command-line runner.
//!
//! Usage: `starmaker [genre] [duration-seconds] <photo> [photo ...]`

use anyhow::{bail, Context, Result};
use tracing::{debug, info};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use starmaker_models::{format_duration, Photo, ProgressEvent};
use starmaker_studio::{MovieRequest, MovieStudio, StudioConfig};
use starmaker_video::ProgressChannel;

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Colored output for dev, JSON for production
    let use_json = std::env::var("LOG_FORMAT")
        .map(|v| v.to_lowercase() == "json")
        .unwrap_or(false);

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,starmaker=info"));

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

    info!("Starting starmaker");

    let args = CliArgs::parse(std::env::args().skip(1))?;

    let mut photos = Vec::with_capacity(args.photo_paths.len());
    for (index, path) in args.photo_paths.iter().enumerate() {
        let data = tokio::fs::read(path)
            .await
            .with_context(|| format!("Failed to read photo {}", path))?;
        photos.push(Photo::jpeg(format!("photo_{}", index + 1), data));
    }

    let config = StudioConfig::from_env();
    info!("Studio config: {:?}", config);
    info!(live = ?config.live_providers(), "Provider modes");

    let studio = MovieStudio::new(&config);
    let (progress, mut events) = ProgressChannel::new();

    let reporter = tokio::spawn(async move {
        while let Some(event) = events.recv().await {
            match event {
                ProgressEvent::Stage { stage } => info!(stage = stage.as_str(), "Pipeline stage"),
                ProgressEvent::Video { progress, step, .. } => {
                    debug!(progress, step = step.as_deref().unwrap_or(""), "Video progress")
                }
            }
        }
    });

    let request = MovieRequest::new(photos, args.genre, args.duration_seconds);
    let result = studio.create_movie(request, &progress).await?;
    drop(progress);
    reporter.await.ok();

    info!(
        title = %result.script.title,
        status = %result.job.status,
        length = %format_duration(result.script.duration),
        "Movie ready"
    );
    println!("{}", serde_json::to_string_pretty(&result)?);

    Ok(())
}

/// Positional command-line arguments.
#[derive(Debug)]
struct CliArgs {
    genre: String,
    duration_seconds: u32,
    photo_paths: Vec<String>,
}

impl CliArgs {
    fn parse(mut args: impl Iterator<Item = String>) -> Result<Self> {
        let genre = args.next().unwrap_or_else(|| "action".to_string());
        let duration_seconds: u32 = match args.next() {
            Some(raw) => raw
                .parse()
                .with_context(|| format!("Invalid duration: {}", raw))?,
            None => 60,
        };
        if duration_seconds == 0 {
            bail!("Duration must be positive");
        }

        let photo_paths: Vec<String> = args.collect();
        if photo_paths.is_empty() {
            bail!("At least one photo path is required");
        }

        Ok(Self {
            genre,
            duration_seconds,
            photo_paths,
        })
    }
}
