//! Video generation client.
//!
//! Two execution paths share one job lifecycle:
//!
//! - **Live** (a Runway or Pika key is set): one provider call per script
//!   scene, then the clips are combined.
//! - **Simulation** (no key): six fixed, paced steps ending with a demo
//!   video.
//!
//! Both paths register the job and publish a registry snapshot together with
//! every progress event. Cancellation is checked after each paced step and
//! once more when the job is sealed. The job is released when it ends.

use std::sync::Arc;
use std::time::Duration;

use starmaker_models::{AudioResource, JobId, Photo, SceneClip, Script, VideoJob, VideoSettings};
use tracing::Instrument;

use crate::combine::combine_clips;
use crate::config::VideoConfig;
use crate::error::{VideoError, VideoResult};
use crate::logging::{GenerationMode, JobLogger};
use crate::metrics::{names, record_scene};
use crate::progress::ProgressChannel;
use crate::prompt::{build_scene_prompt, demo_video_url};
use crate::provider::{provider_chain, simulated_clip, SceneRequest, VideoProvider};
use crate::registry::{JobRegistry, SyncOutcome};

/// Rough wall-clock cost of generating one scene.
pub const SECONDS_PER_SCENE_ESTIMATE: u32 = 30;

/// Named steps of the simulated generation.
pub const SIMULATION_STEPS: [&str; 6] = [
    "Analyzing photos...",
    "Generating scene 1...",
    "Generating scene 2...",
    "Generating scene 3...",
    "Adding voice audio...",
    "Finalizing video...",
];

/// Inputs shared by both paths.
struct Generation<'a> {
    script: &'a Script,
    photos: &'a [Photo],
    voice_audio: Option<&'a AudioResource>,
    settings: &'a VideoSettings,
    progress: &'a ProgressChannel,
    logger: JobLogger,
}

pub struct VideoGenerationClient {
    providers: Vec<Box<dyn VideoProvider>>,
    registry: Arc<JobRegistry>,
    scene_delay: Duration,
    simulation_step_delay: Duration,
}

impl VideoGenerationClient {
    pub fn new(config: &VideoConfig, registry: Arc<JobRegistry>) -> Self {
        Self {
            providers: provider_chain(config),
            registry,
            scene_delay: config.scene_delay,
            simulation_step_delay: config.simulation_step_delay,
        }
    }

    /// True when at least one live provider is in the chain.
    pub fn is_live(&self) -> bool {
        self.providers.iter().any(|p| p.is_live())
    }

    pub fn registry(&self) -> &Arc<JobRegistry> {
        &self.registry
    }

    /// Generate a video for a script.
    ///
    /// Always returns the job. Failures and cancellation are reported through
    /// its status rather than as errors.
    pub async fn generate_video(
        &self,
        script: &Script,
        photos: &[Photo],
        voice_audio: Option<&AudioResource>,
        settings: &VideoSettings,
        progress: &ProgressChannel,
    ) -> VideoJob {
        let job = VideoJob::new(&script.title, settings.duration_seconds);
        let mode = if self.is_live() {
            GenerationMode::Live
        } else {
            GenerationMode::Simulated
        };
        let logger = JobLogger::new(&job.id, mode);
        let span = logger.span(&script.title, script.scenes.len());

        self.registry.register(&job).await;

        let generation = Generation {
            script,
            photos,
            voice_audio,
            settings,
            progress,
            logger,
        };

        match mode {
            GenerationMode::Live => self.run_live(job, &generation).instrument(span).await,
            GenerationMode::Simulated => {
                self.run_simulation(job, &generation).instrument(span).await
            }
        }
    }

    /// Snapshot of an active job.
    pub async fn get_generation_status(&self, id: &JobId) -> Option<VideoJob> {
        self.registry.get(id).await
    }

    /// Request cancellation of an active job.
    ///
    /// Returns false for unknown jobs and for jobs already past their final
    /// checkpoint, which run to completion.
    pub async fn cancel_generation(&self, id: &JobId) -> bool {
        self.registry.cancel(id).await
    }

    /// Estimated wall-clock seconds to generate `scene_count` scenes.
    pub fn estimate_generation_time(scene_count: usize) -> u32 {
        (scene_count as u32).saturating_mul(SECONDS_PER_SCENE_ESTIMATE)
    }

    async fn run_live(&self, mut job: VideoJob, ctx: &Generation<'_>) -> VideoJob {
        ctx.logger.started(ctx.script.scenes.len());

        match self.render_scenes(&mut job, ctx).await {
            Ok(SyncOutcome::Active) => {}
            Ok(SyncOutcome::Cancelled) => return self.finish_cancelled(job, ctx).await,
            Err(e) => return self.finish_failed(job, ctx, e).await,
        }
        if self.registry.seal(&job.id).await == SyncOutcome::Cancelled {
            return self.finish_cancelled(job, ctx).await;
        }

        match combine_clips(&job.scenes, ctx.voice_audio) {
            Ok(combined) => {
                job.complete(combined.url, combined.duration);
                self.finish_completed(job, ctx).await
            }
            Err(e) => self.finish_failed(job, ctx, e).await,
        }
    }

    async fn render_scenes(
        &self,
        job: &mut VideoJob,
        ctx: &Generation<'_>,
    ) -> VideoResult<SyncOutcome> {
        let total = ctx.script.scenes.len();

        for (index, scene) in ctx.script.scenes.iter().enumerate() {
            job.set_step(format!("Generating scene {}...", index + 1));

            let request = SceneRequest {
                prompt: build_scene_prompt(&scene.description, ctx.settings),
                description: &scene.description,
                photos: ctx.photos,
                duration_seconds: ctx.settings.duration_seconds,
            };
            let (clip, provider) = self.attempt_scene(index + 1, &request, &ctx.logger).await?;
            ctx.logger.scene_rendered(index + 1, total, provider, clip.duration);

            job.push_clip(clip);
            job.set_progress(((index + 1) * 100 / total) as u8);
            self.publish(job, ctx).await;

            tokio::time::sleep(self.scene_delay).await;

            if self.registry.checkpoint(&job.id).await == SyncOutcome::Cancelled {
                return Ok(SyncOutcome::Cancelled);
            }
        }

        Ok(SyncOutcome::Active)
    }

    /// First provider in the chain that returns a clip, with that provider's name.
    async fn attempt_scene(
        &self,
        scene: usize,
        request: &SceneRequest<'_>,
        logger: &JobLogger,
    ) -> VideoResult<(SceneClip, &'static str)> {
        let mut last_error = None;
        let mut failed_live = false;

        for provider in &self.providers {
            match provider.attempt(request).await {
                Ok(clip) => {
                    let outcome = match (provider.is_live(), failed_live) {
                        (true, _) => names::OUTCOME_LIVE,
                        (false, true) => names::OUTCOME_FALLBACK,
                        (false, false) => names::OUTCOME_SIMULATED,
                    };
                    record_scene(provider.name(), outcome);
                    return Ok((clip, provider.name()));
                }
                Err(e) => {
                    logger.provider_failed(scene, provider.name(), &e);
                    failed_live |= provider.is_live();
                    last_error = Some(e);
                }
            }
        }

        Err(last_error.unwrap_or(VideoError::NotConfigured("video provider")))
    }

    async fn run_simulation(&self, mut job: VideoJob, ctx: &Generation<'_>) -> VideoJob {
        ctx.logger.started(SIMULATION_STEPS.len());
        let total = SIMULATION_STEPS.len();
        let mut scene_index = 0;

        for (index, step) in SIMULATION_STEPS.iter().enumerate() {
            job.set_step(*step);

            if step.starts_with("Generating scene") {
                let description = ctx
                    .script
                    .scenes
                    .get(scene_index)
                    .map(|s| s.description.as_str())
                    .unwrap_or(*step);
                job.push_clip(simulated_clip(description));
                record_scene("simulated", names::OUTCOME_SIMULATED);
                scene_index += 1;
            }

            job.set_progress(((index + 1) * 100 / total) as u8);
            ctx.logger.step(step, job.progress);
            self.publish(&job, ctx).await;

            tokio::time::sleep(self.simulation_step_delay).await;

            if self.registry.checkpoint(&job.id).await == SyncOutcome::Cancelled {
                return self.finish_cancelled(job, ctx).await;
            }
        }
        if self.registry.seal(&job.id).await == SyncOutcome::Cancelled {
            return self.finish_cancelled(job, ctx).await;
        }

        let duration = f64::from(job.estimated_duration);
        job.complete(demo_video_url(), duration);
        self.finish_completed(job, ctx).await
    }

    /// Store the snapshot, then notify listeners.
    async fn publish(&self, job: &VideoJob, ctx: &Generation<'_>) {
        self.registry.update(job).await;
        ctx.progress.video(job);
    }

    async fn finish_completed(&self, job: VideoJob, ctx: &Generation<'_>) -> VideoJob {
        ctx.progress.video(&job);
        self.registry.release(&job.id).await;
        ctx.logger.completed(&job);
        job
    }

    async fn finish_cancelled(&self, mut job: VideoJob, ctx: &Generation<'_>) -> VideoJob {
        job.cancel();
        ctx.progress.video(&job);
        self.registry.release(&job.id).await;
        ctx.logger.cancelled(&job);
        job
    }

    async fn finish_failed(
        &self,
        mut job: VideoJob,
        ctx: &Generation<'_>,
        error: VideoError,
    ) -> VideoJob {
        job.fail(error.to_string());
        ctx.progress.video(&job);
        self.registry.release(&job.id).await;
        ctx.logger.failed(&error);
        job
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use starmaker_models::{ProgressEvent, Scene, VideoJobStatus};

    fn script(scenes: usize) -> Script {
        Script {
            title: "Test Movie".into(),
            scenes: (1..=scenes as u32)
                .map(|id| Scene::new(id, format!("Scene {}", id), 30))
                .collect(),
            dialogue: vec![],
            duration: 60,
            raw_text: String::new(),
        }
    }

    fn simulated_client() -> VideoGenerationClient {
        VideoGenerationClient::new(
            &VideoConfig::simulated().without_delays(),
            Arc::new(JobRegistry::new()),
        )
    }

    #[test]
    fn test_estimate_generation_time() {
        assert_eq!(VideoGenerationClient::estimate_generation_time(0), 0);
        assert_eq!(VideoGenerationClient::estimate_generation_time(4), 120);
    }

    #[tokio::test]
    async fn test_simulation_completes_with_three_clips() {
        let client = simulated_client();
        assert!(!client.is_live());

        let (progress, mut rx) = ProgressChannel::new();
        let job = client
            .generate_video(&script(3), &[], None, &VideoSettings::default(), &progress)
            .await;

        assert_eq!(job.status, VideoJobStatus::Completed);
        assert_eq!(job.progress, 100);
        assert_eq!(job.scenes.len(), 3);
        assert_eq!(job.scenes[0].prompt, "Scene 1");
        assert_eq!(job.duration, Some(60.0));
        assert!(job.video_url.is_some());
        assert_eq!(client.registry().active_count().await, 0);

        let mut last = 0;
        let mut count = 0;
        while let Ok(event) = rx.try_recv() {
            let value = event.progress().unwrap();
            assert!(value >= last, "progress went from {} to {}", last, value);
            last = value;
            count += 1;
        }
        assert_eq!(last, 100);
        assert_eq!(count, SIMULATION_STEPS.len() + 1);
    }

    #[tokio::test]
    async fn test_simulation_steps_progress_values() {
        let client = simulated_client();
        let (progress, mut rx) = ProgressChannel::new();
        client
            .generate_video(&script(1), &[], None, &VideoSettings::default(), &progress)
            .await;

        let mut values = Vec::new();
        while let Ok(ProgressEvent::Video { progress, .. }) = rx.try_recv() {
            values.push(progress);
        }
        assert_eq!(values, vec![16, 33, 50, 66, 83, 100, 100]);
    }

    #[tokio::test]
    async fn test_cancel_running_simulation() {
        let config = VideoConfig {
            simulation_step_delay: Duration::from_millis(50),
            ..VideoConfig::simulated()
        };
        let client = Arc::new(VideoGenerationClient::new(&config, Arc::new(JobRegistry::new())));
        let (progress, mut rx) = ProgressChannel::new();

        let runner = {
            let client = client.clone();
            tokio::spawn(async move {
                client
                    .generate_video(&script(3), &[], None, &VideoSettings::default(), &progress)
                    .await
            })
        };

        let (job_id, first_progress) = match rx.recv().await {
            Some(ProgressEvent::Video { job_id, progress, .. }) => (job_id, progress),
            other => panic!("unexpected event {:?}", other),
        };
        let snapshot = client.get_generation_status(&job_id).await.unwrap();
        assert_eq!(snapshot.progress, first_progress);
        assert_eq!(snapshot.current_step.as_deref(), Some(SIMULATION_STEPS[0]));
        assert!(client.cancel_generation(&job_id).await);

        let job = runner.await.unwrap();
        assert_eq!(job.status, VideoJobStatus::Cancelled);
        assert!(job.progress < 100);
        assert!(client.get_generation_status(&job_id).await.is_none());
        assert_eq!(client.registry().active_count().await, 0);
        assert!(!client.cancel_generation(&job_id).await);
    }
}
