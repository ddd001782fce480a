//! Shared data models for the Starmaker movie studio.
//!
//! This crate provides Serde-serializable types for:
//! - Scripts, scenes and dialogue
//! - Voice samples, clones and synthesized tracks
//! - Uploaded photos and their feature tags
//! - Video generation jobs and scene clips
//! - The subscription plan catalog and payment records
//! - Progress event schemas

pub mod payment;
pub mod photo;
pub mod plan;
pub mod progress;
pub mod script;
pub mod utils;
pub mod video;
pub mod voice;

// Re-export common types
pub use payment::{
    CancelSubscriptionResult, CardDetails, PaymentIntent, PaymentMethod, PaymentRecord,
    PaymentResult, Subscription,
};
pub use photo::{Photo, PhotoFeatureSet};
pub use plan::{PlanTier, SubscriptionPlan, PLAN_CATALOG};
pub use progress::{PipelineStage, ProgressEvent};
pub use script::{DialogueLine, Genre, Scene, Script};
pub use utils::{ceil_div, format_duration, non_blank, unix_millis, word_count};
pub use video::{JobId, SceneClip, VideoJob, VideoJobStatus, VideoSettings};
pub use voice::{
    AudioResource, AudioSample, VoiceCloneResult, VoiceTrack, VoiceTrackRequest,
    DEFAULT_CHARACTER_NAME, DEFAULT_VOICE_NAME, DEFAULT_VOICE_TYPE,
};
