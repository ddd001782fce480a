//! Structured logging for video jobs.

use starmaker_models::{JobId, VideoJob};
use tracing::{error, info, info_span, warn, Span};

use crate::error::VideoError;

/// Execution path of a job.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GenerationMode {
    Live,
    Simulated,
}

impl GenerationMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            GenerationMode::Live => "live",
            GenerationMode::Simulated => "simulated",
        }
    }
}

/// Lifecycle events of one video job.
///
/// The span carries the title and mode. Each event repeats the job id so
/// lines stay searchable when a subscriber drops span context.
#[derive(Debug, Clone)]
pub struct JobLogger {
    job_id: JobId,
    mode: GenerationMode,
}

impl JobLogger {
    pub fn new(job_id: &JobId, mode: GenerationMode) -> Self {
        Self {
            job_id: job_id.clone(),
            mode,
        }
    }

    /// Span wrapping the whole generation.
    pub fn span(&self, title: &str, scene_count: usize) -> Span {
        info_span!(
            "video_job",
            job_id = %self.job_id,
            mode = self.mode.as_str(),
            title = %title,
            scenes = scene_count
        )
    }

    pub fn started(&self, scene_count: usize) {
        info!(job_id = %self.job_id, scenes = scene_count, "Video generation started");
    }

    pub fn scene_rendered(&self, scene: usize, total: usize, provider: &str, clip_seconds: f64) {
        info!(
            job_id = %self.job_id,
            scene,
            total,
            provider,
            clip_seconds,
            "Scene rendered"
        );
    }

    pub fn provider_failed(&self, scene: usize, provider: &str, error: &VideoError) {
        warn!(
            job_id = %self.job_id,
            scene,
            provider,
            status = ?error_status(error),
            "Provider failed: {}", error
        );
    }

    pub fn step(&self, step: &str, progress: u8) {
        info!(job_id = %self.job_id, progress, "Simulation step: {}", step);
    }

    pub fn completed(&self, job: &VideoJob) {
        info!(
            job_id = %self.job_id,
            clips = job.scenes.len(),
            duration = job.duration.unwrap_or_default(),
            video_url = job.video_url.as_deref().unwrap_or(""),
            "Video generation completed"
        );
    }

    pub fn cancelled(&self, job: &VideoJob) {
        warn!(
            job_id = %self.job_id,
            progress = job.progress,
            clips = job.scenes.len(),
            "Video generation cancelled"
        );
    }

    pub fn failed(&self, error: &VideoError) {
        error!(job_id = %self.job_id, "Video generation failed: {}", error);
    }
}

fn error_status(error: &VideoError) -> Option<u16> {
    match error {
        VideoError::ProviderError(status, _) => Some(*status),
        VideoError::Network(e) => e.status().map(|s| s.as_u16()),
        _ => None,
    }
}
