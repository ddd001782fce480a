//! Video generation jobs.
//!
//! A [`VideoJob`] is the progress record for one generation attempt. Once it
//! reaches a terminal status every mutator becomes a no-op.

use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Unique identifier for a generation attempt.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(transparent)]
pub struct JobId(pub String);

impl JobId {
    /// Generate a new timestamp-derived job ID.
    ///
    /// Format: `<unix-millis>-<8 hex chars>`.
    pub fn new() -> Self {
        let suffix = Uuid::new_v4().simple().to_string();
        Self(format!("{}-{}", Utc::now().timestamp_millis(), &suffix[..8]))
    }

    /// Create from an existing string.
    pub fn from_string(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    /// Get the inner string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for JobId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for JobId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Video job status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema, Default)]
#[serde(rename_all = "snake_case")]
pub enum VideoJobStatus {
    /// Scenes are being generated
    #[default]
    Generating,
    /// Final video is available
    Completed,
    /// Generation hit an error
    Failed,
    /// Cancelled by request while generating
    Cancelled,
}

impl VideoJobStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            VideoJobStatus::Generating => "generating",
            VideoJobStatus::Completed => "completed",
            VideoJobStatus::Failed => "failed",
            VideoJobStatus::Cancelled => "cancelled",
        }
    }

    /// Check if this is a terminal state (no more updates expected).
    pub fn is_terminal(&self) -> bool {
        !matches!(self, VideoJobStatus::Generating)
    }
}

impl fmt::Display for VideoJobStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A generated clip for one scene.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct SceneClip {
    pub url: String,
    /// Clip length in seconds
    pub duration: f64,
    /// Prompt the clip was generated from
    pub prompt: String,
}

/// Caller-supplied generation settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct VideoSettings {
    /// Target movie length in seconds
    #[serde(default = "default_duration_seconds")]
    pub duration_seconds: u32,
    #[serde(default = "default_style")]
    pub style: String,
    #[serde(default = "default_genre")]
    pub genre: String,
}

fn default_duration_seconds() -> u32 {
    60
}

fn default_style() -> String {
    "cinematic".to_string()
}

fn default_genre() -> String {
    "action".to_string()
}

impl Default for VideoSettings {
    fn default() -> Self {
        Self {
            duration_seconds: default_duration_seconds(),
            style: default_style(),
            genre: default_genre(),
        }
    }
}

/// Progress record for one generation attempt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct VideoJob {
    pub id: JobId,
    pub title: String,
    pub status: VideoJobStatus,
    /// Progress percentage (0-100), never decreasing
    pub progress: u8,
    /// Clips generated so far, in scene order
    pub scenes: Vec<SceneClip>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub video_url: Option<String>,
    /// Final video length in seconds
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<f64>,
    /// Requested length in seconds
    pub estimated_duration: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
    /// Current processing step description
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_step: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl VideoJob {
    /// Create a new job in the `generating` state.
    pub fn new(title: impl Into<String>, estimated_duration: u32) -> Self {
        let now = Utc::now();
        Self {
            id: JobId::new(),
            title: title.into(),
            status: VideoJobStatus::Generating,
            progress: 0,
            scenes: Vec::new(),
            video_url: None,
            duration: None,
            estimated_duration,
            error_message: None,
            current_step: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Check if the job is in a terminal state.
    pub fn is_terminal(&self) -> bool {
        self.status.is_terminal()
    }

    /// Raise progress. Lower values and updates after a terminal state are ignored.
    pub fn set_progress(&mut self, progress: u8) -> bool {
        let progress = progress.min(100);
        if self.is_terminal() || progress < self.progress {
            return false;
        }
        self.progress = progress;
        self.updated_at = Utc::now();
        true
    }

    /// Record the current step description.
    pub fn set_step(&mut self, step: impl Into<String>) -> bool {
        if self.is_terminal() {
            return false;
        }
        self.current_step = Some(step.into());
        self.updated_at = Utc::now();
        true
    }

    /// Append a generated clip.
    pub fn push_clip(&mut self, clip: SceneClip) -> bool {
        if self.is_terminal() {
            return false;
        }
        self.scenes.push(clip);
        self.updated_at = Utc::now();
        true
    }

    /// Mark job as completed with its final video.
    pub fn complete(&mut self, video_url: impl Into<String>, duration: f64) -> bool {
        if self.is_terminal() {
            return false;
        }
        self.status = VideoJobStatus::Completed;
        self.progress = 100;
        self.video_url = Some(video_url.into());
        self.duration = Some(duration);
        self.current_step = Some("Complete".into());
        self.updated_at = Utc::now();
        true
    }

    /// Mark job as failed with an error message.
    pub fn fail(&mut self, error: impl Into<String>) -> bool {
        if self.is_terminal() {
            return false;
        }
        self.status = VideoJobStatus::Failed;
        self.error_message = Some(error.into());
        self.updated_at = Utc::now();
        true
    }

    /// Mark job as cancelled.
    pub fn cancel(&mut self) -> bool {
        if self.is_terminal() {
            return false;
        }
        self.status = VideoJobStatus::Cancelled;
        self.updated_at = Utc::now();
        true
    }
}
