//! Movie pipeline orchestration.
//!
//! One call to [`MovieStudio::create_movie`] runs:
//!
//! 1. photo analysis
//! 2. voice cloning (only with a voice sample)
//! 3. script writing
//! 4. narration synthesis
//! 5. video generation
//!
//! Steps run strictly in order. Provider failures are absorbed by each
//! client, so only invalid input surfaces as an error. A failed or cancelled
//! video job is part of the result.

use std::sync::Arc;

use serde::Serialize;
use starmaker_ai::{
    MusicGenerationClient, PhotoAnalysisClient, ScriptGenerationClient, VoiceClient,
};
use starmaker_models::{
    AudioSample, JobId, Photo, PhotoFeatureSet, PipelineStage, Script, VideoJob, VideoSettings,
    VoiceCloneResult, VoiceTrack, VoiceTrackRequest, DEFAULT_VOICE_NAME,
};
use starmaker_payment::PaymentClient;
use starmaker_video::{JobRegistry, ProgressChannel, VideoGenerationClient};
use tracing::{info, info_span, Instrument};

use crate::config::StudioConfig;
use crate::error::{StudioError, StudioResult};

/// Everything needed to make one movie.
#[derive(Debug, Clone)]
pub struct MovieRequest {
    pub photos: Vec<Photo>,
    pub voice_sample: Option<AudioSample>,
    pub genre: String,
    pub duration_seconds: u32,
    /// Free-text description of the user, fed to the screenwriter
    pub personality: String,
    pub style: String,
}

impl MovieRequest {
    pub fn new(photos: Vec<Photo>, genre: impl Into<String>, duration_seconds: u32) -> Self {
        Self {
            photos,
            voice_sample: None,
            genre: genre.into(),
            duration_seconds,
            personality: String::new(),
            style: VideoSettings::default().style,
        }
    }

    pub fn with_voice_sample(mut self, sample: AudioSample) -> Self {
        self.voice_sample = Some(sample);
        self
    }

    pub fn with_personality(mut self, personality: impl Into<String>) -> Self {
        self.personality = personality.into();
        self
    }

    pub fn with_style(mut self, style: impl Into<String>) -> Self {
        self.style = style.into();
        self
    }

    fn validate(&self) -> StudioResult<()> {
        if self.photos.is_empty() {
            return Err(StudioError::invalid_argument("At least one photo is required"));
        }
        if self.duration_seconds == 0 {
            return Err(StudioError::invalid_argument("Duration must be positive"));
        }
        Ok(())
    }

    fn video_settings(&self) -> VideoSettings {
        let defaults = VideoSettings::default();
        VideoSettings {
            duration_seconds: self.duration_seconds,
            style: or_default(&self.style, defaults.style),
            genre: or_default(&self.genre, defaults.genre),
        }
    }
}

fn or_default(value: &str, default: String) -> String {
    if value.trim().is_empty() {
        default
    } else {
        value.to_string()
    }
}

/// Output of a pipeline run.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MovieResult {
    pub script: Script,
    pub photo_features: Vec<PhotoFeatureSet>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub voice_clone: Option<VoiceCloneResult>,
    pub voice_track: VoiceTrack,
    pub job: VideoJob,
}

/// Drives the AI, video and payment clients.
pub struct MovieStudio {
    scripts: ScriptGenerationClient,
    voices: VoiceClient,
    photos: PhotoAnalysisClient,
    music: MusicGenerationClient,
    video: VideoGenerationClient,
    payments: PaymentClient,
}

impl MovieStudio {
    pub fn new(config: &StudioConfig) -> Self {
        Self::with_registry(config, Arc::new(JobRegistry::new()))
    }

    /// Build with a registry shared with other components.
    pub fn with_registry(config: &StudioConfig, registry: Arc<JobRegistry>) -> Self {
        Self {
            scripts: ScriptGenerationClient::new(&config.ai),
            voices: VoiceClient::new(&config.ai),
            photos: PhotoAnalysisClient::new(&config.ai),
            music: MusicGenerationClient::new(&config.ai),
            video: VideoGenerationClient::new(&config.video, registry),
            payments: PaymentClient::new(&config.payment),
        }
    }

    pub fn payments(&self) -> &PaymentClient {
        &self.payments
    }

    pub fn music(&self) -> &MusicGenerationClient {
        &self.music
    }

    /// Run the full pipeline.
    pub async fn create_movie(
        &self,
        request: MovieRequest,
        progress: &ProgressChannel,
    ) -> StudioResult<MovieResult> {
        request.validate()?;

        let span = info_span!(
            "create_movie",
            genre = %request.genre,
            photos = request.photos.len()
        );
        self.run_pipeline(request, progress).instrument(span).await
    }

    async fn run_pipeline(
        &self,
        request: MovieRequest,
        progress: &ProgressChannel,
    ) -> StudioResult<MovieResult> {
        progress.stage(PipelineStage::AnalyzingPhotos);
        let photo_features = self.photos.analyze_photos(&request.photos).await;

        let voice_clone = match &request.voice_sample {
            Some(sample) if !sample.is_empty() => {
                progress.stage(PipelineStage::CloningVoice);
                Some(self.voices.clone_voice(sample, DEFAULT_VOICE_NAME).await)
            }
            _ => None,
        };

        progress.stage(PipelineStage::WritingScript);
        let script = self
            .scripts
            .generate_script(&request.genre, request.duration_seconds, &request.personality)
            .await;
        info!(title = %script.title, scenes = script.scenes.len(), "Script ready");

        progress.stage(PipelineStage::SynthesizingVoice);
        let mut track_request = VoiceTrackRequest::new(script.narration_text());
        if let Some(clone) = &voice_clone {
            track_request = track_request.with_voice_id(clone.voice_id.clone());
        }
        let voice_track = self.voices.generate_voice_track(&track_request).await?;

        progress.stage(PipelineStage::GeneratingVideo);
        let job = self
            .video
            .generate_video(
                &script,
                &request.photos,
                Some(&voice_track.audio_data),
                &request.video_settings(),
                progress,
            )
            .await;

        progress.stage(PipelineStage::Completed);
        info!(job_id = %job.id, status = %job.status, "Movie pipeline finished");

        Ok(MovieResult {
            script,
            photo_features,
            voice_clone,
            voice_track,
            job,
        })
    }

    /// Request cancellation of a running video job.
    pub async fn cancel(&self, job_id: &JobId) -> bool {
        self.video.cancel_generation(job_id).await
    }

    /// Snapshot of a running video job.
    pub async fn job_status(&self, job_id: &JobId) -> Option<VideoJob> {
        self.video.get_generation_status(job_id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_validation() {
        let empty = MovieRequest::new(vec![], "action", 60);
        assert!(empty.validate().is_err());

        let zero = MovieRequest::new(vec![Photo::jpeg("p", vec![1])], "action", 0);
        assert!(zero.validate().is_err());

        let ok = MovieRequest::new(vec![Photo::jpeg("p", vec![1])], "action", 60);
        assert!(ok.validate().is_ok());
    }

    #[test]
    fn test_video_settings_from_request() {
        let request = MovieRequest::new(vec![], "comedy", 90).with_style("");
        let settings = request.video_settings();
        assert_eq!(settings.duration_seconds, 90);
        assert_eq!(settings.style, "cinematic");
        assert_eq!(settings.genre, "comedy");
    }
}
