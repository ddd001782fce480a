//! Progress event schemas.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::video::{JobId, VideoJob, VideoJobStatus};

/// Step of the movie pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum PipelineStage {
    AnalyzingPhotos,
    CloningVoice,
    WritingScript,
    SynthesizingVoice,
    GeneratingVideo,
    Completed,
}

impl PipelineStage {
    pub fn as_str(&self) -> &'static str {
        match self {
            PipelineStage::AnalyzingPhotos => "analyzing_photos",
            PipelineStage::CloningVoice => "cloning_voice",
            PipelineStage::WritingScript => "writing_script",
            PipelineStage::SynthesizingVoice => "synthesizing_voice",
            PipelineStage::GeneratingVideo => "generating_video",
            PipelineStage::Completed => "completed",
        }
    }
}

/// Progress notification envelope.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ProgressEvent {
    /// Video job progress (0-100)
    Video {
        #[serde(rename = "jobId")]
        job_id: JobId,
        progress: u8,
        status: VideoJobStatus,
        #[serde(skip_serializing_if = "Option::is_none")]
        step: Option<String>,
    },

    /// Orchestrator moved to a new pipeline stage
    Stage { stage: PipelineStage },
}

impl ProgressEvent {
    /// Snapshot a job's progress.
    pub fn video(job: &VideoJob) -> Self {
        Self::Video {
            job_id: job.id.clone(),
            progress: job.progress,
            status: job.status,
            step: job.current_step.clone(),
        }
    }

    pub fn stage(stage: PipelineStage) -> Self {
        Self::Stage { stage }
    }

    /// Progress value for video events.
    pub fn progress(&self) -> Option<u8> {
        match self {
            ProgressEvent::Video { progress, .. } => Some(*progress),
            ProgressEvent::Stage { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_video_event_serialization() {
        let mut job = VideoJob::new("t", 60);
        job.set_progress(40);
        let json = serde_json::to_value(ProgressEvent::video(&job)).unwrap();
        assert_eq!(json["type"], "video");
        assert_eq!(json["progress"], 40);
        assert_eq!(json["status"], "generating");
        assert_eq!(json["jobId"], job.id.as_str());
    }

    #[test]
    fn test_stage_event_has_no_progress() {
        let event = ProgressEvent::stage(PipelineStage::WritingScript);
        assert_eq!(event.progress(), None);
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["stage"], "writing_script");
    }
}
